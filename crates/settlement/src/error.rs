use rust_decimal::Decimal;

/// Errors from settlement and eligibility calculations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettlementError {
    /// A timestamp column could not be parsed as RFC 3339 or `YYYY-MM-DD`.
    #[error("invalid timestamp in '{field}': {value}")]
    InvalidTimestamp { field: String, value: String },

    /// A column the calculation depends on is absent or empty.
    #[error("booking is missing '{field}'")]
    MissingField { field: String },

    #[error("'{field}' must not be negative (got {value})")]
    NegativeAmount { field: String, value: String },

    /// A policy window too long to represent as a duration.
    #[error("'{field}' is out of range (got {value}, max {max})")]
    OutOfRange { field: String, value: i64, max: i64 },

    /// Owner share outside `[0, 1]`.
    #[error("owner share must be between 0 and 1 (got {0})")]
    InvalidShare(Decimal),

    #[error("unknown dispute resolution: {0} (expected approved, partial or rejected)")]
    UnknownResolution(String),

    #[error("the booking has already ended")]
    AlreadyEnded,

    #[error("the booking has not started yet")]
    NotStarted,

    #[error("no whole unused days left to refund")]
    NoWholeDaysLeft,

    #[error("numeric overflow: {0}")]
    Overflow(String),
}
