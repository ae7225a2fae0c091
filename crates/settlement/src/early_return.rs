//! Refund of unused whole days when a renter returns the car early.

use autorenta_core::Booking;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::SettlementError;
use crate::instant::require_timestamp;
use crate::payout::round_money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarlyReturnRefund {
    pub remaining_days: i64,
    pub refund_amount: Decimal,
    pub refund_cents: i64,
    /// Booking total after the refund, when the total is known.
    pub adjusted_total: Option<Decimal>,
}

/// Refund `price_per_day` for every whole day between `now` and `end`.
pub fn refund_unused_days(
    start: OffsetDateTime,
    end: OffsetDateTime,
    now: OffsetDateTime,
    price_per_day: Decimal,
) -> Result<EarlyReturnRefund, SettlementError> {
    if now >= end {
        return Err(SettlementError::AlreadyEnded);
    }
    if now < start {
        return Err(SettlementError::NotStarted);
    }
    if price_per_day < Decimal::ZERO {
        return Err(SettlementError::NegativeAmount {
            field: "price_per_day".into(),
            value: price_per_day.to_string(),
        });
    }

    let remaining_days = (end - now).whole_days();
    if remaining_days <= 0 {
        return Err(SettlementError::NoWholeDaysLeft);
    }

    let refund_amount = price_per_day
        .checked_mul(Decimal::from(remaining_days))
        .map(round_money)
        .ok_or_else(|| SettlementError::Overflow("early return refund".into()))?;
    let refund_cents = refund_amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| SettlementError::Overflow("refund in cents".into()))?;

    Ok(EarlyReturnRefund {
        remaining_days,
        refund_amount,
        refund_cents,
        adjusted_total: None,
    })
}

/// Early-return refund for a booking row returned at `now`.
///
/// A missing `price_per_day` refunds nothing per day, matching how the
/// checkout flow treats bookings priced only by total.
pub fn early_return_refund(
    booking: &Booking,
    now: OffsetDateTime,
) -> Result<EarlyReturnRefund, SettlementError> {
    let start = require_timestamp("start_at", booking.start_at.as_deref())?;
    let end = require_timestamp("end_at", booking.end_at.as_deref())?;
    let price = booking.price_per_day.unwrap_or(Decimal::ZERO);

    let mut refund = refund_unused_days(start, end, now, price)?;
    refund.adjusted_total = booking
        .total_amount
        .map(|total| {
            total
                .checked_sub(refund.refund_amount)
                .ok_or_else(|| SettlementError::Overflow("adjusted total".into()))
        })
        .transpose()?;

    tracing::info!(
        booking_id = booking.id.as_deref().unwrap_or("-"),
        remaining_days = refund.remaining_days,
        refund_cents = refund.refund_cents,
        "early return refund computed"
    );
    Ok(refund)
}

/// Whole days between two instants, never negative.
pub fn whole_days_between(from: OffsetDateTime, to: OffsetDateTime) -> i64 {
    (to - from).whole_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn booking() -> Booking {
        Booking {
            id: Some("bk_1".into()),
            start_at: Some("2024-01-02T10:00:00Z".into()),
            end_at: Some("2024-01-06T10:00:00Z".into()),
            total_amount: Some(Decimal::new(6000, 0)),
            price_per_day: Some(Decimal::new(1500, 0)),
            ..Booking::default()
        }
    }

    #[test]
    fn refunds_whole_unused_days() {
        // 2 days and 20 hours left -> 2 whole days
        let refund = early_return_refund(&booking(), datetime!(2024-01-03 14:00 UTC)).unwrap();
        assert_eq!(refund.remaining_days, 2);
        assert_eq!(refund.refund_amount, Decimal::new(3000, 0));
        assert_eq!(refund.refund_cents, 300_000);
        assert_eq!(refund.adjusted_total, Some(Decimal::new(3000, 0)));
    }

    #[test]
    fn less_than_a_day_left_refunds_nothing() {
        let err = early_return_refund(&booking(), datetime!(2024-01-05 12:00 UTC)).unwrap_err();
        assert_eq!(err, SettlementError::NoWholeDaysLeft);
    }

    #[test]
    fn after_end_is_not_early() {
        let err = early_return_refund(&booking(), datetime!(2024-01-06 10:00 UTC)).unwrap_err();
        assert_eq!(err, SettlementError::AlreadyEnded);
    }

    #[test]
    fn before_start_is_not_a_return() {
        let err = early_return_refund(&booking(), datetime!(2024-01-01 10:00 UTC)).unwrap_err();
        assert_eq!(err, SettlementError::NotStarted);
    }

    #[test]
    fn missing_dates_are_reported() {
        let b = Booking {
            end_at: None,
            ..booking()
        };
        assert_eq!(
            early_return_refund(&b, datetime!(2024-01-03 10:00 UTC)).unwrap_err(),
            SettlementError::MissingField {
                field: "end_at".into()
            }
        );
    }

    #[test]
    fn fractional_price_rounds_to_cents() {
        let refund = refund_unused_days(
            datetime!(2024-01-01 0:00 UTC),
            datetime!(2024-01-10 0:00 UTC),
            datetime!(2024-01-01 0:00 UTC),
            Decimal::new(33335, 3),
        )
        .unwrap();
        // 9 * 33.335 = 300.015 -> 300.02
        assert_eq!(refund.refund_amount, Decimal::new(30002, 2));
        assert_eq!(refund.refund_cents, 30_002);
    }

    #[test]
    fn huge_daily_price_overflows_instead_of_panicking() {
        let err = refund_unused_days(
            datetime!(2024-01-01 0:00 UTC),
            datetime!(2024-01-03 0:00 UTC),
            datetime!(2024-01-01 0:00 UTC),
            Decimal::from_str_exact("7922816251426433759354395033").unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, SettlementError::Overflow(_)), "{:?}", err);
    }

    #[test]
    fn refund_too_large_for_cents_overflows() {
        // fits in a Decimal, but not once expressed in i64 cents
        let err = refund_unused_days(
            datetime!(2024-01-01 0:00 UTC),
            datetime!(2024-01-03 0:00 UTC),
            datetime!(2024-01-01 0:00 UTC),
            Decimal::from(i64::MAX),
        )
        .unwrap_err();
        assert!(matches!(err, SettlementError::Overflow(_)), "{:?}", err);
    }

    #[test]
    fn adjusted_total_overflow_is_an_error() {
        let b = Booking {
            total_amount: Some(Decimal::MIN),
            ..booking()
        };
        let err = early_return_refund(&b, datetime!(2024-01-03 14:00 UTC)).unwrap_err();
        assert!(matches!(err, SettlementError::Overflow(_)), "{:?}", err);
    }

    #[test]
    fn whole_days_clamps_at_zero() {
        assert_eq!(
            whole_days_between(datetime!(2024-01-05 0:00 UTC), datetime!(2024-01-01 0:00 UTC)),
            0
        );
    }
}
