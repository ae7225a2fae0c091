//! autorenta-settlement: money and time-window rules applied around the
//! booking lifecycle.
//!
//! Everything here is a pure calculation. The wallet deposits and status
//! writes that act on the results happen in the persistence layer.
//! Money is `rust_decimal::Decimal` throughout; there is no `f64` on any
//! settlement path.

pub mod dispute;
pub mod early_return;
pub mod eligibility;
pub mod error;
pub mod instant;
pub mod payout;
pub mod policy;

pub use dispute::{settle_dispute, DisputeSettlement, Resolution, SettlementAction};
pub use early_return::{early_return_refund, refund_unused_days, EarlyReturnRefund};
pub use eligibility::{
    check_in_eligibility, check_out_eligibility, eligibility_report, review_eligibility,
    Eligibility, EligibilityReport,
};
pub use error::SettlementError;
pub use instant::parse_timestamp;
pub use payout::{round_money, split_earnings, EarningsSplit};
pub use policy::SettlementPolicy;
