//! Timestamp parsing for booking columns.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::SettlementError;

/// Parse a timestamp column. Accepts RFC 3339 or a bare `YYYY-MM-DD`,
/// which is read as midnight UTC.
pub fn parse_timestamp(field: &str, value: &str) -> Result<OffsetDateTime, SettlementError> {
    if let Ok(ts) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(ts);
    }
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map(|d| d.midnight().assume_utc())
        .map_err(|_| SettlementError::InvalidTimestamp {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Parse an optional column; absent or empty is `MissingField`.
pub fn require_timestamp(
    field: &str,
    value: Option<&str>,
) -> Result<OffsetDateTime, SettlementError> {
    match value {
        Some(v) if !v.is_empty() => parse_timestamp(field, v),
        _ => Err(SettlementError::MissingField {
            field: field.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = parse_timestamp("start_at", "2024-01-02T10:00:00-03:00").unwrap();
        assert_eq!(ts, datetime!(2024-01-02 13:00 UTC));
    }

    #[test]
    fn parses_bare_date_as_utc_midnight() {
        let ts = parse_timestamp("end_at", "2024-01-05").unwrap();
        assert_eq!(ts, datetime!(2024-01-05 0:00 UTC));
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_timestamp("end_at", "next tuesday").unwrap_err();
        assert_eq!(
            err,
            SettlementError::InvalidTimestamp {
                field: "end_at".into(),
                value: "next tuesday".into()
            }
        );
    }

    #[test]
    fn empty_is_missing() {
        assert!(matches!(
            require_timestamp("start_at", Some("")),
            Err(SettlementError::MissingField { .. })
        ));
        assert!(matches!(
            require_timestamp("start_at", None),
            Err(SettlementError::MissingField { .. })
        ));
    }
}
