//! Time-window checks gating check-in, check-out and reviews.
//!
//! These read the persisted `status` column rather than the derived state:
//! the checks run before the corresponding RPC moves the row.

use autorenta_core::{Booking, BookingStatus};
use serde::Serialize;
use time::{Duration, OffsetDateTime};

use crate::early_return::whole_days_between;
use crate::error::SettlementError;
use crate::instant::{parse_timestamp, require_timestamp};
use crate::policy::SettlementPolicy;

/// Outcome of an eligibility check. `reason` is user-facing copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Eligibility {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Only set by review checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
}

impl Eligibility {
    pub fn allowed() -> Self {
        Eligibility {
            allowed: true,
            reason: None,
            days_remaining: None,
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(%reason, "eligibility denied");
        Eligibility {
            allowed: false,
            reason: Some(reason),
            days_remaining: None,
        }
    }

    fn with_days_remaining(mut self, days: i64) -> Self {
        self.days_remaining = Some(days);
        self
    }
}

fn status_label(booking: &Booking) -> &str {
    booking.status.as_deref().unwrap_or("desconocido")
}

/// The owner may check in a confirmed booking up to the grace period after
/// its scheduled start.
pub fn check_in_eligibility(
    booking: &Booking,
    now: OffsetDateTime,
    policy: &SettlementPolicy,
) -> Result<Eligibility, SettlementError> {
    policy.validate()?;
    if !booking.status_is(BookingStatus::Confirmed.as_str()) {
        return Ok(Eligibility::denied(format!(
            "El check-in solo está disponible para reservas confirmadas. Estado actual: {}",
            status_label(booking)
        )));
    }

    let start = require_timestamp("start_at", booking.start_at.as_deref())?;
    if now - start > Duration::hours(policy.check_in_grace_hours) {
        return Ok(Eligibility::denied(
            "El check-in debe realizarse antes de que comience la reserva",
        ));
    }
    Ok(Eligibility::allowed())
}

/// Statuses in which the trip may still be running. The inspection-based
/// status shown in the UI can lag behind the column, so this is permissive.
const CHECK_OUT_STATUSES: [BookingStatus; 4] = [
    BookingStatus::InProgress,
    BookingStatus::Confirmed,
    BookingStatus::PendingReview,
    BookingStatus::Completed,
];

pub fn check_out_eligibility(
    booking: &Booking,
    now: OffsetDateTime,
) -> Result<Eligibility, SettlementError> {
    let active = CHECK_OUT_STATUSES
        .iter()
        .any(|s| booking.status_is(s.as_str()));
    if !active {
        return Ok(Eligibility::denied(format!(
            "El check-out no está disponible para reservas en estado: {}",
            status_label(booking)
        )));
    }

    let start = require_timestamp("start_at", booking.start_at.as_deref())?;
    if now < start {
        return Ok(Eligibility::denied(
            "El check-out solo está disponible después de que comience la reserva",
        ));
    }
    Ok(Eligibility::allowed())
}

/// Reviews open when a booking completes and close after the review window.
///
/// `completed_at` overrides the row's `updated_at` as completion instant.
pub fn review_eligibility(
    booking: &Booking,
    completed_at: Option<OffsetDateTime>,
    now: OffsetDateTime,
    policy: &SettlementPolicy,
) -> Result<Eligibility, SettlementError> {
    policy.validate()?;
    if !booking.status_is(BookingStatus::Completed.as_str()) {
        return Ok(Eligibility::denied(
            "Solo se pueden dejar reseñas para reservas completadas",
        ));
    }

    let completed = match (completed_at, booking.updated_at.as_deref()) {
        (Some(ts), _) => ts,
        (None, Some(v)) if !v.is_empty() => parse_timestamp("updated_at", v)?,
        _ => {
            return Ok(Eligibility::denied(
                "No se puede determinar la fecha de finalización",
            ))
        }
    };

    let days_since = whole_days_between(completed, now);
    if days_since > policy.review_window_days {
        return Ok(Eligibility::denied(format!(
            "El período de reseñas expiró ({} días después de la finalización)",
            policy.review_window_days
        ))
        .with_days_remaining(0));
    }

    Ok(Eligibility::allowed().with_days_remaining(policy.review_window_days - days_since))
}

/// All three checks for one booking, as shown on the booking detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityReport {
    pub check_in: Eligibility,
    pub check_out: Eligibility,
    pub review: Eligibility,
}

pub fn eligibility_report(
    booking: &Booking,
    now: OffsetDateTime,
    policy: &SettlementPolicy,
) -> Result<EligibilityReport, SettlementError> {
    Ok(EligibilityReport {
        check_in: check_in_eligibility(booking, now, policy)?,
        check_out: check_out_eligibility(booking, now)?,
        review: review_eligibility(booking, None, now, policy)?,
    })
}
