//! Booking snapshot -> canonical state.
//!
//! Derivation is an ordered chain of rules evaluated top to bottom; the
//! first rule that resolves wins. Order is precedence: cancellation beats
//! an open dispute, which beats completion, and so on. Derivation is total
//! and side-effect free, so it is safe to call on every render.

use serde::Serialize;

use crate::booking::Booking;
use crate::state::BookingState;

/// One step of the derivation chain.
pub struct DerivationRule {
    pub name: &'static str,
    resolve: fn(&Booking) -> Option<BookingState>,
}

impl DerivationRule {
    pub fn resolve(&self, booking: &Booking) -> Option<BookingState> {
        (self.resolve)(booking)
    }
}

/// The state a booking resolved to and the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Derivation {
    pub state: BookingState,
    /// Name of the rule that fired; `"no_booking"` for a missing snapshot
    /// and `"fallback"` when no rule matched.
    pub rule: &'static str,
}

/// Rules in precedence order. A missing snapshot is handled before the chain.
pub const DERIVATION_RULES: [DerivationRule; 8] = [
    DerivationRule {
        name: "cancelled",
        resolve: |b| b.status_is("cancelled").then_some(BookingState::Cancelled),
    },
    DerivationRule {
        name: "open_dispute",
        resolve: |b| b.has_open_dispute().then_some(BookingState::Disputed),
    },
    DerivationRule {
        name: "completed",
        resolve: |b| {
            (b.status_is("completed") && b.funds_released()).then_some(BookingState::Completed)
        },
    },
    DerivationRule {
        name: "funds_released",
        resolve: |b| b.funds_released().then_some(BookingState::FundsReleased),
    },
    DerivationRule {
        name: "returned",
        resolve: resolve_returned,
    },
    DerivationRule {
        name: "in_progress",
        resolve: |b| b.status_is("in_progress").then_some(BookingState::Active),
    },
    DerivationRule {
        name: "confirmed",
        resolve: |b| (b.status_is("confirmed") || b.is_paid()).then_some(BookingState::Confirmed),
    },
    DerivationRule {
        name: "payment_in_flight",
        resolve: |b| {
            b.has_payment_in_flight()
                .then_some(BookingState::PendingPayment)
        },
    },
];

/// Bilateral confirmation sub-resolution for a returned vehicle.
///
/// Only the owner-confirmed case maps to `InspectedGood`; rows where only
/// the renter confirmed stay `Returned` until the owner inspects.
fn resolve_returned(b: &Booking) -> Option<BookingState> {
    if !b.is_returned() {
        return None;
    }

    let owner = b.owner_confirmed();
    let renter = b.renter_confirmed();

    let state = if owner && renter {
        BookingState::FundsReleased
    } else if b.damaged() {
        if b.dispute_status_is("open") || b.inspection_is("disputed") {
            BookingState::Disputed
        } else {
            BookingState::DamageReported
        }
    } else if owner {
        BookingState::InspectedGood
    } else {
        BookingState::Returned
    };
    Some(state)
}

/// Derive the canonical state and report which rule produced it.
pub fn derive(booking: Option<&Booking>) -> Derivation {
    let Some(booking) = booking else {
        return Derivation {
            state: BookingState::Draft,
            rule: "no_booking",
        };
    };

    DERIVATION_RULES
        .iter()
        .find_map(|rule| {
            rule.resolve(booking).map(|state| Derivation {
                state,
                rule: rule.name,
            })
        })
        .unwrap_or(Derivation {
            state: BookingState::Draft,
            rule: "fallback",
        })
}

/// Derive the canonical state of a booking snapshot.
///
/// A missing snapshot, or one that matches no rule, is `Draft`.
pub fn derive_state(booking: Option<&Booking>) -> BookingState {
    derive(booking).state
}
