//! Settlement policy as loaded from a TOML config, driving the calculations.

use autorenta_core::Booking;
use autorenta_settlement::{
    check_in_eligibility, review_eligibility, split_earnings, SettlementError, SettlementPolicy,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use time::macros::datetime;

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    settlement: SettlementPolicy,
}

fn load(src: &str) -> SettlementPolicy {
    toml::from_str::<ConfigFile>(src).unwrap().settlement
}

#[test]
fn empty_config_uses_defaults() {
    assert_eq!(load(""), SettlementPolicy::default());
}

#[test]
fn toml_overrides_apply() {
    let policy = load(
        r#"
        [settlement]
        owner_share = "0.80"
        review_window_days = 7
        "#,
    );
    assert_eq!(policy.owner_share, Decimal::new(80, 2));
    assert_eq!(policy.review_window_days, 7);
    assert_eq!(policy.check_in_grace_hours, 2);

    let split = split_earnings(Decimal::new(1000, 0), &policy).unwrap();
    assert_eq!(split.owner_amount, Decimal::new(800, 0));
}

#[test]
fn invalid_share_fails_the_split() {
    let policy = load(
        r#"
        [settlement]
        owner_share = "1.5"
        "#,
    );
    assert_eq!(
        split_earnings(Decimal::new(100, 0), &policy).unwrap_err(),
        SettlementError::InvalidShare(Decimal::new(15, 1))
    );
}

#[test]
fn longer_grace_and_shorter_window() {
    let policy = load(
        r#"
        [settlement]
        check_in_grace_hours = 6
        review_window_days = 3
        "#,
    );
    let confirmed = Booking {
        status: Some("confirmed".into()),
        start_at: Some("2024-01-02T10:00:00Z".into()),
        ..Booking::default()
    };
    assert!(
        check_in_eligibility(&confirmed, datetime!(2024-01-02 15:00 UTC), &policy)
            .unwrap()
            .allowed
    );

    let completed = Booking {
        status: Some("completed".into()),
        updated_at: Some("2024-01-06".into()),
        ..Booking::default()
    };
    let review =
        review_eligibility(&completed, None, datetime!(2024-01-11 0:00 UTC), &policy).unwrap();
    assert!(!review.allowed);
}
