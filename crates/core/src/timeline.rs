//! Progress-bar position for each state.

use crate::state::BookingState;

/// Last index on the happy path.
pub const TIMELINE_LAST_STEP: u8 = 8;

/// Position of `state` on the booking progress bar (`0..=8`).
///
/// `None` means the booking left the happy path (cancelled or disputed);
/// the UI hides the bar in that case.
pub const fn timeline_step_index(state: BookingState) -> Option<u8> {
    match state {
        BookingState::Draft => Some(0),
        BookingState::PendingPayment => Some(1),
        BookingState::Confirmed => Some(2),
        BookingState::Active => Some(3),
        BookingState::Returned => Some(4),
        BookingState::InspectedGood | BookingState::DamageReported => Some(5),
        BookingState::PendingOwner | BookingState::PendingRenter => Some(6),
        BookingState::FundsReleased => Some(7),
        BookingState::Completed => Some(TIMELINE_LAST_STEP),
        BookingState::Cancelled | BookingState::Disputed => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_is_monotonic() {
        let path = [
            BookingState::Draft,
            BookingState::PendingPayment,
            BookingState::Confirmed,
            BookingState::Active,
            BookingState::Returned,
            BookingState::InspectedGood,
            BookingState::FundsReleased,
            BookingState::Completed,
        ];
        let indices: Vec<u8> = path.iter().filter_map(|s| timeline_step_index(*s)).collect();
        assert_eq!(indices.len(), path.len());
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn index_map_covers_every_state() {
        let table = [
            (BookingState::Draft, Some(0)),
            (BookingState::PendingPayment, Some(1)),
            (BookingState::Confirmed, Some(2)),
            (BookingState::Active, Some(3)),
            (BookingState::Returned, Some(4)),
            (BookingState::InspectedGood, Some(5)),
            (BookingState::DamageReported, Some(5)),
            (BookingState::PendingOwner, Some(6)),
            (BookingState::PendingRenter, Some(6)),
            (BookingState::FundsReleased, Some(7)),
            (BookingState::Completed, Some(TIMELINE_LAST_STEP)),
            (BookingState::Cancelled, None),
            (BookingState::Disputed, None),
        ];
        assert_eq!(table.len(), BookingState::ALL.len());
        for state in BookingState::ALL {
            assert!(table.iter().any(|(s, _)| *s == state), "{:?} missing", state);
        }
        for (state, expected) in table {
            assert_eq!(timeline_step_index(state), expected, "{:?}", state);
        }
    }

    #[test]
    fn off_path_states_have_no_index() {
        assert_eq!(timeline_step_index(BookingState::Cancelled), None);
        assert_eq!(timeline_step_index(BookingState::Disputed), None);
    }

    #[test]
    fn indices_stay_in_range() {
        for state in BookingState::ALL {
            if let Some(i) = timeline_step_index(state) {
                assert!(i <= TIMELINE_LAST_STEP);
            }
        }
        assert_eq!(timeline_step_index(BookingState::Active), Some(3));
        assert_eq!(timeline_step_index(BookingState::Confirmed), Some(2));
    }
}
