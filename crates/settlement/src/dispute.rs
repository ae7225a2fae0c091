//! Settlement of a resolved damage dispute.
//!
//! Every resolution completes the booking; they differ only in how much of
//! the disputed amount flows back to the renter's wallet.

use std::fmt;
use std::str::FromStr;

use autorenta_core::BookingStatus;
use serde::{Deserialize, Serialize};

use crate::error::SettlementError;

/// Admin decision on a dispute opened by the renter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// The renter is right: the owner's claim is dropped.
    Approved,
    /// Split: the owner keeps the final charges, the rest is refunded.
    Partial,
    /// The owner's claim stands.
    Rejected,
}

impl Resolution {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Resolution::Approved => "approved",
            Resolution::Partial => "partial",
            Resolution::Rejected => "rejected",
        }
    }

    pub const fn settlement_action(&self) -> SettlementAction {
        match self {
            Resolution::Approved => SettlementAction::FullRefund,
            Resolution::Partial => SettlementAction::PartialRefund,
            Resolution::Rejected => SettlementAction::NoRefund,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = SettlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Resolution::Approved),
            "partial" => Ok(Resolution::Partial),
            "rejected" => Ok(Resolution::Rejected),
            other => Err(SettlementError::UnknownResolution(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementAction {
    FullRefund,
    PartialRefund,
    NoRefund,
}

/// What to write back once a dispute is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisputeSettlement {
    pub resolution: Resolution,
    pub action: SettlementAction,
    pub booking_status: BookingStatus,
    /// Amount to deposit into the renter's wallet, in cents.
    pub refund_cents: i64,
}

impl DisputeSettlement {
    /// A wallet deposit is only issued for a positive refund.
    pub fn issues_refund(&self) -> bool {
        self.refund_cents > 0
    }
}

fn non_negative(field: &str, cents: i64) -> Result<i64, SettlementError> {
    if cents < 0 {
        return Err(SettlementError::NegativeAmount {
            field: field.to_string(),
            value: cents.to_string(),
        });
    }
    Ok(cents)
}

/// Compute the refund owed to the renter for a resolved dispute.
///
/// `final_charges_cents` only matters for a partial resolution and
/// defaults to zero. Charges above the disputed amount refund nothing.
pub fn settle_dispute(
    resolution: Resolution,
    disputed_cents: i64,
    final_charges_cents: Option<i64>,
) -> Result<DisputeSettlement, SettlementError> {
    let disputed = non_negative("disputed_cents", disputed_cents)?;
    let charges = non_negative("final_charges_cents", final_charges_cents.unwrap_or(0))?;

    let action = resolution.settlement_action();
    let refund_cents = match action {
        SettlementAction::FullRefund => disputed,
        SettlementAction::PartialRefund => (disputed - charges).max(0),
        SettlementAction::NoRefund => 0,
    };

    tracing::info!(
        resolution = %resolution,
        disputed_cents = disputed,
        final_charges_cents = charges,
        refund_cents,
        "dispute settled"
    );

    Ok(DisputeSettlement {
        resolution,
        action,
        booking_status: BookingStatus::Completed,
        refund_cents,
    })
}
