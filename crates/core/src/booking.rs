//! Booking snapshot as read from the bookings table.
//!
//! Every column is optional: rows written by older checkout flows lack the
//! bilateral confirmation flags, and callers routinely pass partial
//! projections. Unknown columns are ignored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Read-only view of one booking row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Booking {
    pub id: Option<String>,
    /// Free-text status column (`cancelled`, `completed`, `in_progress`, ...).
    pub status: Option<String>,

    pub paid_at: Option<String>,
    pub returned_at: Option<String>,
    pub funds_released_at: Option<String>,

    pub owner_confirmed_delivery: Option<bool>,
    pub renter_confirmed_payment: Option<bool>,

    pub has_damages: Option<bool>,
    /// `pending`, `good`, `damaged` or `disputed`.
    pub inspection_status: Option<String>,

    pub dispute_open_at: Option<String>,
    pub dispute_status: Option<String>,

    pub payment_intent_id: Option<String>,
    pub wallet_lock_id: Option<String>,

    // Scheduling and pricing columns, used by settlement checks only.
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub updated_at: Option<String>,
    pub total_amount: Option<Decimal>,
    pub price_per_day: Option<Decimal>,
}

/// A text column counts as set when it is present and non-empty.
fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

impl Booking {
    pub fn status_is(&self, status: &str) -> bool {
        self.status.as_deref() == Some(status)
    }

    pub fn is_paid(&self) -> bool {
        is_set(&self.paid_at)
    }

    pub fn is_returned(&self) -> bool {
        is_set(&self.returned_at)
    }

    pub fn funds_released(&self) -> bool {
        is_set(&self.funds_released_at)
    }

    pub fn owner_confirmed(&self) -> bool {
        self.owner_confirmed_delivery == Some(true)
    }

    pub fn renter_confirmed(&self) -> bool {
        self.renter_confirmed_payment == Some(true)
    }

    pub fn damaged(&self) -> bool {
        self.has_damages == Some(true)
    }

    pub fn inspection_is(&self, status: &str) -> bool {
        self.inspection_status.as_deref() == Some(status)
    }

    pub fn dispute_status_is(&self, status: &str) -> bool {
        self.dispute_status.as_deref() == Some(status)
    }

    /// A dispute was opened and is still open.
    pub fn has_open_dispute(&self) -> bool {
        is_set(&self.dispute_open_at) && self.dispute_status_is("open")
    }

    /// A payment intent or wallet hold exists, even if not yet captured.
    pub fn has_payment_in_flight(&self) -> bool {
        is_set(&self.payment_intent_id) || is_set(&self.wallet_lock_id)
    }
}
