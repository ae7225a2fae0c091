//! Owner / platform split of a rental total.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::SettlementError;
use crate::policy::SettlementPolicy;

/// Result of splitting a rental total between owner and platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarningsSplit {
    pub total: Decimal,
    pub owner_amount: Decimal,
    pub platform_fee: Decimal,
    pub owner_percentage: Decimal,
    pub platform_percentage: Decimal,
}

/// Round a currency amount to cents, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Split `total` according to the policy's owner share.
///
/// The owner amount is rounded to cents and the platform fee takes the
/// remainder, so the two always add up to the rounded total.
pub fn split_earnings(
    total: Decimal,
    policy: &SettlementPolicy,
) -> Result<EarningsSplit, SettlementError> {
    policy.validate()?;
    if total < Decimal::ZERO {
        return Err(SettlementError::NegativeAmount {
            field: "total".into(),
            value: total.to_string(),
        });
    }

    let total = round_money(total);
    let owner_amount = total
        .checked_mul(policy.owner_share)
        .map(round_money)
        .ok_or_else(|| SettlementError::Overflow("owner share multiplication".into()))?;
    let platform_fee = total - owner_amount;
    let hundred = Decimal::ONE_HUNDRED;

    Ok(EarningsSplit {
        total,
        owner_amount,
        platform_fee,
        owner_percentage: (policy.owner_share * hundred).normalize(),
        platform_percentage: (policy.platform_share() * hundred).normalize(),
    })
}
