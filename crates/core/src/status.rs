//! Persisted `status` column values and the moves the database accepts.
//!
//! This is the coarser vocabulary stored in the bookings table, distinct
//! from the derived [`BookingState`](crate::BookingState). Checkout and
//! admin flows validate a status change here before writing it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, StatusTransitionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    PendingPayment,
    PendingApproval,
    Confirmed,
    InProgress,
    PendingReview,
    Disputed,
    Resolved,
    Completed,
    Cancelled,
    Expired,
    NoShow,
    Rejected,
    PendingDisputeResolution,
    CancelledRenter,
    CancelledOwner,
    CancelledSystem,
    PaymentValidationFailed,
    Returned,
    InspectedGood,
    DamageReported,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 21] = [
        BookingStatus::Pending,
        BookingStatus::PendingPayment,
        BookingStatus::PendingApproval,
        BookingStatus::Confirmed,
        BookingStatus::InProgress,
        BookingStatus::PendingReview,
        BookingStatus::Disputed,
        BookingStatus::Resolved,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
        BookingStatus::Expired,
        BookingStatus::NoShow,
        BookingStatus::Rejected,
        BookingStatus::PendingDisputeResolution,
        BookingStatus::CancelledRenter,
        BookingStatus::CancelledOwner,
        BookingStatus::CancelledSystem,
        BookingStatus::PaymentValidationFailed,
        BookingStatus::Returned,
        BookingStatus::InspectedGood,
        BookingStatus::DamageReported,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::PendingPayment => "pending_payment",
            BookingStatus::PendingApproval => "pending_approval",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::PendingReview => "pending_review",
            BookingStatus::Disputed => "disputed",
            BookingStatus::Resolved => "resolved",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Expired => "expired",
            BookingStatus::NoShow => "no_show",
            BookingStatus::Rejected => "rejected",
            BookingStatus::PendingDisputeResolution => "pending_dispute_resolution",
            BookingStatus::CancelledRenter => "cancelled_renter",
            BookingStatus::CancelledOwner => "cancelled_owner",
            BookingStatus::CancelledSystem => "cancelled_system",
            BookingStatus::PaymentValidationFailed => "payment_validation_failed",
            BookingStatus::Returned => "returned",
            BookingStatus::InspectedGood => "inspected_good",
            BookingStatus::DamageReported => "damage_reported",
        }
    }

    /// Statuses the row may move to next.
    pub const fn allowed_next(&self) -> &'static [BookingStatus] {
        use BookingStatus::*;
        match self {
            Pending => &[
                Confirmed,
                Cancelled,
                Expired,
                Rejected,
                CancelledRenter,
                CancelledOwner,
                CancelledSystem,
            ],
            PendingPayment => &[
                Confirmed,
                Cancelled,
                Expired,
                CancelledRenter,
                CancelledOwner,
                CancelledSystem,
                PaymentValidationFailed,
            ],
            PendingApproval => &[
                PendingPayment,
                Confirmed,
                Cancelled,
                Rejected,
                CancelledRenter,
                CancelledOwner,
                CancelledSystem,
            ],
            Confirmed => &[
                InProgress,
                Cancelled,
                CancelledRenter,
                CancelledOwner,
                CancelledSystem,
            ],
            InProgress => &[
                PendingReview,
                Completed,
                Cancelled,
                CancelledRenter,
                CancelledOwner,
                CancelledSystem,
                Returned,
            ],
            PendingReview => &[
                Completed,
                Disputed,
                Cancelled,
                CancelledRenter,
                CancelledOwner,
                CancelledSystem,
            ],
            Disputed => &[Resolved, CancelledSystem],
            Resolved => &[Completed],
            PendingDisputeResolution => &[Disputed],
            PaymentValidationFailed => &[PendingPayment, Cancelled, CancelledSystem],
            Returned => &[InspectedGood, DamageReported, Completed],
            InspectedGood => &[Completed],
            DamageReported => &[Disputed, Completed],
            Completed | Cancelled | Expired | NoShow | Rejected | CancelledRenter
            | CancelledOwner | CancelledSystem => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            BookingStatus::Cancelled
                | BookingStatus::CancelledRenter
                | BookingStatus::CancelledOwner
                | BookingStatus::CancelledSystem
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseError::UnknownStatus(s.to_string()))
    }
}

/// Check a proposed change of the persisted status.
pub fn validate_status_transition(
    from: BookingStatus,
    to: BookingStatus,
) -> Result<(), StatusTransitionError> {
    let allowed = from.allowed_next();
    if allowed.contains(&to) {
        return Ok(());
    }

    tracing::debug!(from = %from, to = %to, "rejected booking status change");
    let allowed = if allowed.is_empty() {
        "none".to_string()
    } else {
        allowed
            .iter()
            .map(BookingStatus::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    Err(StatusTransitionError {
        from: from.to_string(),
        to: to.to_string(),
        allowed,
    })
}

/// Visual weight of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Primary,
    Success,
    Warning,
    Danger,
}

/// Badge content for a persisted status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDisplay {
    pub label: &'static str,
    pub tone: Tone,
    pub description: &'static str,
}

pub const fn status_display(status: BookingStatus) -> StatusDisplay {
    use BookingStatus::*;
    let (label, tone, description) = match status {
        Pending => ("Pendiente", Tone::Warning, "Esperando aprobación del locador"),
        PendingApproval => (
            "Pendiente de Aprobación",
            Tone::Warning,
            "Esperando aprobación del locador",
        ),
        PendingPayment => (
            "Pendiente de Pago",
            Tone::Warning,
            "Esperando que el locatario complete el pago",
        ),
        Confirmed => (
            "Confirmada",
            Tone::Success,
            "Reserva confirmada. Preparate para el check-in",
        ),
        InProgress => ("En Curso", Tone::Primary, "Alquiler activo"),
        PendingReview => (
            "En Revisión Final",
            Tone::Warning,
            "Esperando confirmación post-reserva o reporte de incidentes",
        ),
        Completed => ("Completada", Tone::Success, "Reserva finalizada exitosamente"),
        Cancelled => ("Cancelada", Tone::Danger, "Esta reserva fue cancelada"),
        Expired => ("Expirada", Tone::Danger, "La reserva expiró sin pago"),
        NoShow => (
            "No Presentado",
            Tone::Danger,
            "El locatario no se presentó para el inicio de la reserva",
        ),
        Rejected => (
            "Rechazada",
            Tone::Danger,
            "La solicitud fue rechazada por el dueño",
        ),
        PendingDisputeResolution => (
            "En Disputa",
            Tone::Danger,
            "El caso está siendo revisado por soporte",
        ),
        Disputed => (
            "En Disputa",
            Tone::Danger,
            "Hay una disputa activa. Caso en revisión.",
        ),
        Resolved => (
            "Disputa Resuelta",
            Tone::Success,
            "Disputa resuelta. Fondos en proceso de liberación.",
        ),
        CancelledRenter => (
            "Cancelada por Locatario",
            Tone::Danger,
            "La reserva fue cancelada por el locatario",
        ),
        CancelledOwner => (
            "Cancelada por Anfitrión",
            Tone::Danger,
            "La reserva fue cancelada por el anfitrión",
        ),
        CancelledSystem => (
            "Cancelada por Sistema",
            Tone::Danger,
            "La reserva fue cancelada automáticamente por el sistema",
        ),
        PaymentValidationFailed => (
            "Error de Pago",
            Tone::Danger,
            "El pago no pudo ser validado. Por favor, intenta nuevamente.",
        ),
        Returned => (
            "Vehículo Devuelto",
            Tone::Primary,
            "El vehículo ha sido devuelto. Pendiente de inspección.",
        ),
        InspectedGood => (
            "Inspección OK",
            Tone::Success,
            "Inspección completada sin daños. Reserva finalizada.",
        ),
        DamageReported => (
            "Daño Reportado",
            Tone::Danger,
            "Se reportaron daños durante la inspección.",
        ),
    };
    StatusDisplay {
        label,
        tone,
        description,
    }
}
