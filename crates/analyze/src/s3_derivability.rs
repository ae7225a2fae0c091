//! S3 — Derivability analysis.
//!
//! Pushes a grid of booking snapshots through the derivation chain and
//! records which states each rule produces. A declared state that no
//! snapshot derives can only be entered by writing it directly, which is
//! how the legacy bilateral states survive in old rows.
//!
//! The grid covers every status value the rules look at (plus absent and an
//! unrecognized one), every presence combination of the lifecycle markers,
//! and the dispute status values that matter.

use crate::model::LifecycleModel;
use autorenta_core::{derive, Booking, BookingState, DERIVATION_RULES};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

const STATUSES: [Option<&str>; 7] = [
    None,
    Some("pending"),
    Some("confirmed"),
    Some("in_progress"),
    Some("completed"),
    Some("cancelled"),
    Some("archived"),
];

const DISPUTE_STATUSES: [Option<&str>; 3] = [None, Some("open"), Some("resolved")];

/// Number of on/off markers varied per snapshot.
const MARKERS: u32 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct S3Result {
    /// Snapshots evaluated, including the missing-booking case.
    pub snapshot_count: usize,
    pub derived_counts: BTreeMap<BookingState, usize>,
    /// Declared states that no snapshot derives.
    pub underivable_states: BTreeSet<BookingState>,
    /// Derived states absent from the model.
    pub undeclared_derived: BTreeSet<BookingState>,
    /// rule name -> number of snapshots it decided.
    pub rule_hits: BTreeMap<&'static str, usize>,
    pub unused_rules: Vec<&'static str>,
}

fn marker(bits: u32, n: u32) -> bool {
    bits & (1 << n) != 0
}

fn stamp(on: bool) -> Option<String> {
    on.then(|| "2024-01-01T00:00:00Z".to_string())
}

fn snapshot(status: Option<&str>, dispute_status: Option<&str>, bits: u32) -> Booking {
    Booking {
        status: status.map(str::to_string),
        paid_at: stamp(marker(bits, 0)),
        returned_at: stamp(marker(bits, 1)),
        funds_released_at: stamp(marker(bits, 2)),
        owner_confirmed_delivery: Some(marker(bits, 3)),
        renter_confirmed_payment: Some(marker(bits, 4)),
        has_damages: Some(marker(bits, 5)),
        inspection_status: marker(bits, 6).then(|| "disputed".to_string()),
        dispute_open_at: stamp(marker(bits, 7)),
        dispute_status: dispute_status.map(str::to_string),
        payment_intent_id: marker(bits, 8).then(|| "pi_grid".to_string()),
        wallet_lock_id: marker(bits, 9).then(|| "lock_grid".to_string()),
        ..Booking::default()
    }
}

/// S3 — Derive every snapshot of the grid and compare against the model.
pub fn analyze_derivability(model: &LifecycleModel) -> S3Result {
    let mut derived_counts: BTreeMap<BookingState, usize> = BTreeMap::new();
    let mut rule_hits: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut snapshot_count = 0;

    let mut record = |booking: Option<&Booking>| {
        let derivation = derive(booking);
        *derived_counts.entry(derivation.state).or_default() += 1;
        *rule_hits.entry(derivation.rule).or_default() += 1;
        snapshot_count += 1;
    };

    record(None);
    for status in STATUSES {
        for dispute_status in DISPUTE_STATUSES {
            for bits in 0..(1u32 << MARKERS) {
                record(Some(&snapshot(status, dispute_status, bits)));
            }
        }
    }

    let declared: BTreeSet<BookingState> = model.states.iter().copied().collect();
    let derived: BTreeSet<BookingState> = derived_counts.keys().copied().collect();

    let unused_rules = DERIVATION_RULES
        .iter()
        .map(|rule| rule.name)
        .filter(|name| !rule_hits.contains_key(name))
        .collect();

    S3Result {
        snapshot_count,
        underivable_states: declared.difference(&derived).copied().collect(),
        undeclared_derived: derived.difference(&declared).copied().collect(),
        derived_counts,
        rule_hits,
        unused_rules,
    }
}
