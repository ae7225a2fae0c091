//! Tunable settlement parameters.
//!
//! Loaded from the `[settlement]` table of `autorenta.toml` by the CLI;
//! every key is optional and falls back to the marketplace defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SettlementError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementPolicy {
    /// Fraction of the rental total paid out to the owner (default 0.85).
    pub owner_share: Decimal,
    /// How long after the scheduled start the owner may still check in.
    pub check_in_grace_hours: i64,
    /// Days after completion during which either party may leave a review.
    pub review_window_days: i64,
}

impl Default for SettlementPolicy {
    fn default() -> Self {
        SettlementPolicy {
            owner_share: Decimal::new(85, 2),
            check_in_grace_hours: 2,
            review_window_days: 14,
        }
    }
}

/// Longest windows a `time::Duration` can hold.
const MAX_GRACE_HOURS: i64 = i64::MAX / 3_600;
const MAX_REVIEW_DAYS: i64 = i64::MAX / 86_400;

fn within(field: &str, value: i64, max: i64) -> Result<(), SettlementError> {
    if value < 0 {
        return Err(SettlementError::NegativeAmount {
            field: field.into(),
            value: value.to_string(),
        });
    }
    if value > max {
        return Err(SettlementError::OutOfRange {
            field: field.into(),
            value,
            max,
        });
    }
    Ok(())
}

impl SettlementPolicy {
    pub fn validate(&self) -> Result<(), SettlementError> {
        if self.owner_share < Decimal::ZERO || self.owner_share > Decimal::ONE {
            return Err(SettlementError::InvalidShare(self.owner_share));
        }
        within(
            "check_in_grace_hours",
            self.check_in_grace_hours,
            MAX_GRACE_HOURS,
        )?;
        within(
            "review_window_days",
            self.review_window_days,
            MAX_REVIEW_DAYS,
        )
    }

    pub fn platform_share(&self) -> Decimal {
        Decimal::ONE - self.owner_share
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_marketplace_terms() {
        let policy = SettlementPolicy::default();
        assert_eq!(policy.owner_share, Decimal::new(85, 2));
        assert_eq!(policy.platform_share(), Decimal::new(15, 2));
        assert_eq!(policy.check_in_grace_hours, 2);
        assert_eq!(policy.review_window_days, 14);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn share_above_one_is_invalid() {
        let policy = SettlementPolicy {
            owner_share: Decimal::new(11, 1),
            ..SettlementPolicy::default()
        };
        assert_eq!(
            policy.validate(),
            Err(SettlementError::InvalidShare(Decimal::new(11, 1)))
        );
    }

    #[test]
    fn unbounded_grace_is_out_of_range() {
        let policy = SettlementPolicy {
            check_in_grace_hours: i64::MAX,
            ..SettlementPolicy::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(SettlementError::OutOfRange { ref field, .. }) if field == "check_in_grace_hours"
        ));
    }

    #[test]
    fn longest_representable_grace_is_valid() {
        let policy = SettlementPolicy {
            check_in_grace_hours: MAX_GRACE_HOURS,
            review_window_days: MAX_REVIEW_DAYS,
            ..SettlementPolicy::default()
        };
        assert!(policy.validate().is_ok());
        assert!(SettlementPolicy {
            review_window_days: MAX_REVIEW_DAYS + 1,
            ..SettlementPolicy::default()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let policy: SettlementPolicy =
            serde_json::from_value(serde_json::json!({ "review_window_days": 30 })).unwrap();
        assert_eq!(policy.review_window_days, 30);
        assert_eq!(policy.owner_share, Decimal::new(85, 2));
    }
}
