//! Static transition table.
//!
//! Callers check a proposed move here before invoking the RPC that
//! performs it. The table never changes at runtime.

use crate::state::BookingState;

/// States directly reachable from `from`. Empty for terminal states.
pub const fn next_states(from: BookingState) -> &'static [BookingState] {
    use BookingState::*;
    match from {
        Draft => &[PendingPayment, Cancelled],
        PendingPayment => &[Confirmed, Cancelled],
        Confirmed => &[Active, Cancelled],
        Active => &[Returned, Disputed],
        Returned => &[
            InspectedGood,
            DamageReported,
            PendingOwner,
            PendingRenter,
            FundsReleased,
        ],
        InspectedGood => &[FundsReleased, Disputed],
        DamageReported => &[Disputed, FundsReleased],
        PendingOwner => &[FundsReleased, Disputed],
        PendingRenter => &[FundsReleased, Disputed],
        Disputed => &[FundsReleased, Cancelled],
        FundsReleased => &[Completed],
        Completed => &[],
        Cancelled => &[],
    }
}

/// True iff `to` is listed as directly reachable from `from`.
///
/// Self-transitions are never listed, so `can_transition(s, s)` is false.
pub fn can_transition(from: BookingState, to: BookingState) -> bool {
    next_states(from).contains(&to)
}

/// True iff the state has no outgoing transitions.
pub fn is_terminal_state(state: BookingState) -> bool {
    next_states(state).is_empty()
}

/// Every `(from, to)` edge of the table in lifecycle order.
pub fn transition_edges() -> Vec<(BookingState, BookingState)> {
    BookingState::ALL
        .iter()
        .flat_map(|&from| next_states(from).iter().map(move |&to| (from, to)))
        .collect()
}
