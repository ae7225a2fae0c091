//! Canonical booking lifecycle states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// The single canonical lifecycle state of a booking.
///
/// `PendingOwner` and `PendingRenter` predate the bilateral confirmation
/// flags. They are kept so historical rows still have a label, but
/// [`derive_state`](crate::derive_state) never produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingState {
    Draft,
    PendingPayment,
    Confirmed,
    Active,
    Returned,
    InspectedGood,
    DamageReported,
    PendingOwner,
    PendingRenter,
    FundsReleased,
    Completed,
    Cancelled,
    Disputed,
}

impl BookingState {
    /// Every state, in lifecycle order.
    pub const ALL: [BookingState; 13] = [
        BookingState::Draft,
        BookingState::PendingPayment,
        BookingState::Confirmed,
        BookingState::Active,
        BookingState::Returned,
        BookingState::InspectedGood,
        BookingState::DamageReported,
        BookingState::PendingOwner,
        BookingState::PendingRenter,
        BookingState::FundsReleased,
        BookingState::Completed,
        BookingState::Cancelled,
        BookingState::Disputed,
    ];

    /// Canonical wire name, e.g. `"PENDING_PAYMENT"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BookingState::Draft => "DRAFT",
            BookingState::PendingPayment => "PENDING_PAYMENT",
            BookingState::Confirmed => "CONFIRMED",
            BookingState::Active => "ACTIVE",
            BookingState::Returned => "RETURNED",
            BookingState::InspectedGood => "INSPECTED_GOOD",
            BookingState::DamageReported => "DAMAGE_REPORTED",
            BookingState::PendingOwner => "PENDING_OWNER",
            BookingState::PendingRenter => "PENDING_RENTER",
            BookingState::FundsReleased => "FUNDS_RELEASED",
            BookingState::Completed => "COMPLETED",
            BookingState::Cancelled => "CANCELLED",
            BookingState::Disputed => "DISPUTED",
        }
    }

    /// UI label shown on badges.
    pub const fn label(&self) -> &'static str {
        match self {
            BookingState::Draft => "Borrador",
            BookingState::PendingPayment => "Pendiente de Pago",
            BookingState::Confirmed => "Confirmada",
            BookingState::Active => "En Curso",
            BookingState::Returned => "Vehículo Devuelto",
            BookingState::InspectedGood => "Inspección OK",
            BookingState::DamageReported => "Daño Reportado",
            BookingState::PendingOwner => "Esperando al Anfitrión",
            BookingState::PendingRenter => "Esperando al Locatario",
            BookingState::FundsReleased => "Fondos Liberados",
            BookingState::Completed => "Completada",
            BookingState::Cancelled => "Cancelada",
            BookingState::Disputed => "En Disputa",
        }
    }

    /// True for the two labels kept only for pre-bilateral bookings.
    pub const fn is_legacy(&self) -> bool {
        matches!(self, BookingState::PendingOwner | BookingState::PendingRenter)
    }
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingState {
    type Err = ParseError;

    /// Case-insensitive: `"active"` and `"ACTIVE"` both parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BookingState::ALL
            .iter()
            .copied()
            .find(|state| state.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::UnknownState(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_has_thirteen_distinct_states() {
        let mut names: Vec<&str> = BookingState::ALL.iter().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "pending_payment".parse::<BookingState>().unwrap(),
            BookingState::PendingPayment
        );
        assert_eq!(
            " FUNDS_RELEASED ".parse::<BookingState>().unwrap(),
            BookingState::FundsReleased
        );
    }

    #[test]
    fn parse_unknown_state_errors() {
        let err = "shipped".parse::<BookingState>().unwrap_err();
        assert_eq!(err, ParseError::UnknownState("shipped".to_string()));
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_value(BookingState::DamageReported).unwrap();
        assert_eq!(json, serde_json::json!("DAMAGE_REPORTED"));
        let back: BookingState = serde_json::from_value(json).unwrap();
        assert_eq!(back, BookingState::DamageReported);
    }

    #[test]
    fn only_pending_owner_and_renter_are_legacy() {
        let legacy: Vec<BookingState> = BookingState::ALL
            .iter()
            .copied()
            .filter(BookingState::is_legacy)
            .collect();
        assert_eq!(
            legacy,
            vec![BookingState::PendingOwner, BookingState::PendingRenter]
        );
    }
}
