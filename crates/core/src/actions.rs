//! Who can do what in each state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::derive::derive_state;
use crate::error::ParseError;
use crate::state::BookingState;

/// Party to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Renter,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Owner, Role::Renter];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Renter => "renter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "renter" => Ok(Role::Renter),
            _ => Err(ParseError::UnknownRole(s.to_string())),
        }
    }
}

/// Action identifiers handed to the UI, which maps each to an affordance
/// and eventually an RPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Pay,
    Cancel,
    CheckIn,
    MarkReturned,
    SubmitInspection,
    Confirm,
    ConfirmRelease,
    AcceptDamage,
    DisputeDamage,
    ProvideEvidence,
    Review,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::Pay,
        Action::Cancel,
        Action::CheckIn,
        Action::MarkReturned,
        Action::SubmitInspection,
        Action::Confirm,
        Action::ConfirmRelease,
        Action::AcceptDamage,
        Action::DisputeDamage,
        Action::ProvideEvidence,
        Action::Review,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::Pay => "pay",
            Action::Cancel => "cancel",
            Action::CheckIn => "check_in",
            Action::MarkReturned => "mark_returned",
            Action::SubmitInspection => "submit_inspection",
            Action::Confirm => "confirm",
            Action::ConfirmRelease => "confirm_release",
            Action::AcceptDamage => "accept_damage",
            Action::DisputeDamage => "dispute_damage",
            Action::ProvideEvidence => "provide_evidence",
            Action::Review => "review",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ParseError::UnknownAction(s.to_string()))
    }
}

/// Actions `role` may take while the booking is in `state`.
pub const fn available_actions(state: BookingState, role: Role) -> &'static [Action] {
    use Action::*;
    use BookingState as S;
    match (state, role) {
        (S::Draft, Role::Renter) => &[Pay, Cancel],
        (S::PendingPayment, Role::Owner) => &[Cancel],
        (S::PendingPayment, Role::Renter) => &[Pay, Cancel],
        (S::Confirmed, Role::Owner) => &[CheckIn],
        (S::Confirmed, Role::Renter) => &[Cancel],
        (S::Active, Role::Renter) => &[MarkReturned],
        (S::Returned, Role::Owner) => &[SubmitInspection],
        (S::Returned, Role::Renter) => &[Confirm],
        (S::InspectedGood, Role::Renter) => &[ConfirmRelease],
        (S::DamageReported, Role::Renter) => &[AcceptDamage, DisputeDamage],
        (S::PendingOwner, Role::Owner) => &[Confirm],
        (S::PendingRenter, Role::Renter) => &[Confirm],
        (S::Disputed, _) => &[ProvideEvidence],
        (S::FundsReleased, _) => &[Review],
        _ => &[],
    }
}

/// Like [`available_actions`] but takes the role as free text.
///
/// An unrecognized role yields no actions rather than an error.
pub fn available_actions_for(state: BookingState, role: &str) -> &'static [Action] {
    match role.parse::<Role>() {
        Ok(role) => available_actions(state, role),
        Err(_) => &[],
    }
}

/// True when `role` has at least one action in the booking's current state.
pub fn requires_action_from(booking: Option<&Booking>, role: Role) -> bool {
    !available_actions(derive_state(booking), role).is_empty()
}

/// Hint shown to `role` when the booking is waiting on them.
pub fn pending_message(booking: Option<&Booking>, role: Role) -> Option<&'static str> {
    let state = derive_state(booking);
    match (state, role) {
        (BookingState::PendingOwner, Role::Owner) => {
            Some("El locatario ya confirmó. Confirmá la devolución para liberar los fondos.")
        }
        (BookingState::PendingRenter, Role::Renter) => {
            Some("El anfitrión ya confirmó. Confirmá el pago para liberar los fondos.")
        }
        (BookingState::Returned, Role::Owner)
            if !booking.is_some_and(Booking::owner_confirmed) =>
        {
            Some("Inspeccioná el vehículo y confirmá la devolución.")
        }
        (BookingState::Returned, Role::Renter)
            if !booking.is_some_and(Booking::renter_confirmed) =>
        {
            Some("Confirmá el pago para que se liberen los fondos.")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmed_owner_can_only_check_in() {
        assert_eq!(
            available_actions(BookingState::Confirmed, Role::Owner),
            &[Action::CheckIn]
        );
    }

    #[test]
    fn terminal_states_offer_nothing() {
        for role in Role::ALL {
            assert!(available_actions(BookingState::Completed, role).is_empty());
            assert!(available_actions(BookingState::Cancelled, role).is_empty());
        }
    }

    #[test]
    fn damage_reported_renter_accepts_or_disputes() {
        let names: Vec<&str> = available_actions(BookingState::DamageReported, Role::Renter)
            .iter()
            .map(Action::as_str)
            .collect();
        assert_eq!(names, vec!["accept_damage", "dispute_damage"]);
    }

    #[test]
    fn unknown_role_name_yields_empty_list() {
        assert!(available_actions_for(BookingState::Disputed, "admin").is_empty());
        assert_eq!(
            available_actions_for(BookingState::Disputed, "Owner"),
            &[Action::ProvideEvidence]
        );
    }

    #[test]
    fn action_names_round_trip_through_from_str() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
        assert!("teleport".parse::<Action>().is_err());
    }

    #[test]
    fn requires_action_follows_derived_state() {
        let active = Booking {
            status: Some("in_progress".into()),
            ..Booking::default()
        };
        assert!(requires_action_from(Some(&active), Role::Renter));
        assert!(!requires_action_from(Some(&active), Role::Owner));
        // Draft: the renter still has to pay.
        assert!(requires_action_from(None, Role::Renter));
    }

    #[test]
    fn returned_prompts_both_parties() {
        let returned = Booking {
            returned_at: Some("2024-01-05".into()),
            ..Booking::default()
        };
        assert!(pending_message(Some(&returned), Role::Owner).is_some());
        assert!(pending_message(Some(&returned), Role::Renter).is_some());
    }

    #[test]
    fn returned_with_renter_confirmation_only_prompts_owner() {
        let returned = Booking {
            returned_at: Some("2024-01-05".into()),
            renter_confirmed_payment: Some(true),
            ..Booking::default()
        };
        assert!(pending_message(Some(&returned), Role::Owner).is_some());
        assert_eq!(pending_message(Some(&returned), Role::Renter), None);
    }

    #[test]
    fn no_message_outside_waiting_states() {
        let active = Booking {
            status: Some("in_progress".into()),
            ..Booking::default()
        };
        assert_eq!(pending_message(Some(&active), Role::Renter), None);
        assert_eq!(pending_message(None, Role::Owner), None);
    }
}
