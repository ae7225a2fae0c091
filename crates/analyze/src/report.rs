//! AnalysisReport — aggregated output from the S1-S4 analyses.
//!
//! The report collects results from each analysis module and extracts
//! notable findings (warnings, info) for summary display.

use crate::s1_state_space::S1Result;
use crate::s2_reachability::S2Result;
use crate::s3_derivability::S3Result;
use crate::s4_authority::S4Result;
use autorenta_core::BookingState;
use serde::Serialize;

/// Severity level for an analysis finding.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum FindingSeverity {
    Info,
    Warning,
}

/// A notable finding from analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub analysis: String,
    pub severity: FindingSeverity,
    pub message: String,
    pub state: Option<BookingState>,
    pub details: Option<serde_json::Value>,
}

impl Finding {
    fn new(analysis: &str, severity: FindingSeverity, message: String) -> Self {
        Finding {
            analysis: analysis.to_string(),
            severity,
            message,
            state: None,
            details: None,
        }
    }

    fn at(mut self, state: BookingState) -> Self {
        self.state = Some(state);
        self
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

fn join<T: std::fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Aggregated analysis report containing all S1-S4 results and findings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub s1_state_space: Option<S1Result>,
    pub s2_reachability: Option<S2Result>,
    pub s3_derivability: Option<S3Result>,
    pub s4_authority: Option<S4Result>,
    pub analyses_run: Vec<String>,
    pub findings: Vec<Finding>,
}

impl AnalysisReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_warnings(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity == FindingSeverity::Warning)
    }

    /// Extract findings from populated analysis results.
    ///
    /// Warnings sort before info; within a severity, analysis order holds.
    pub fn extract_findings(&mut self) {
        self.findings.clear();

        // S1: Undeclared transition targets
        if let Some(ref s1) = self.s1_state_space {
            for &target in &s1.undeclared_targets {
                self.findings.push(
                    Finding::new(
                        "s1",
                        FindingSeverity::Warning,
                        format!("Transition target {} is not a declared state", target),
                    )
                    .at(target),
                );
            }
            if s1.terminal_states.is_empty() {
                self.findings.push(Finding::new(
                    "s1",
                    FindingSeverity::Warning,
                    "Lifecycle has no terminal state".to_string(),
                ));
            }
        }

        // S2: Dead and trapped state warnings
        if let Some(ref s2) = self.s2_reachability {
            if !s2.unreachable_states.is_empty() {
                self.findings.push(
                    Finding::new(
                        "s2",
                        FindingSeverity::Warning,
                        format!(
                            "{} unreachable state(s) from {}: {}",
                            s2.unreachable_states.len(),
                            s2.initial_state,
                            join(&s2.unreachable_states)
                        ),
                    )
                    .with_details(serde_json::json!({
                        "unreachable_states": s2.unreachable_states,
                    })),
                );
            }
            for &state in &s2.trapped_states {
                self.findings.push(
                    Finding::new(
                        "s2",
                        FindingSeverity::Warning,
                        format!("State {} cannot reach any terminal state", state),
                    )
                    .at(state),
                );
            }
        }

        // S3: Underivable states; legacy labels are expected
        if let Some(ref s3) = self.s3_derivability {
            for &state in &s3.underivable_states {
                let (severity, message) = if state.is_legacy() {
                    (
                        FindingSeverity::Info,
                        format!(
                            "Legacy state {} is never derived from a snapshot; only stored rows carry it",
                            state
                        ),
                    )
                } else {
                    (
                        FindingSeverity::Warning,
                        format!("State {} is never derived from any snapshot", state),
                    )
                };
                self.findings.push(Finding::new("s3", severity, message).at(state));
            }
            for &state in &s3.undeclared_derived {
                self.findings.push(
                    Finding::new(
                        "s3",
                        FindingSeverity::Warning,
                        format!("Derivation produces {} which the lifecycle does not declare", state),
                    )
                    .at(state)
                    .with_details(serde_json::json!({
                        "snapshots": s3.derived_counts.get(&state),
                    })),
                );
            }
            if !s3.unused_rules.is_empty() {
                self.findings.push(
                    Finding::new(
                        "s3",
                        FindingSeverity::Info,
                        format!("Derivation rule(s) never decide: {}", join(&s3.unused_rules)),
                    )
                    .with_details(serde_json::json!({ "rules": s3.unused_rules })),
                );
            }
        }

        // S4: Stalls and terminal states with actions
        if let Some(ref s4) = self.s4_authority {
            for &state in &s4.stalled_states {
                self.findings.push(
                    Finding::new(
                        "s4",
                        FindingSeverity::Warning,
                        format!("No role can act in non-terminal state {}", state),
                    )
                    .at(state),
                );
            }
            for &state in &s4.acting_terminal_states {
                self.findings.push(
                    Finding::new(
                        "s4",
                        FindingSeverity::Warning,
                        format!("Terminal state {} still offers actions", state),
                    )
                    .at(state),
                );
            }
        }

        // stable: keeps analysis order inside a severity
        self.findings.sort_by(|a, b| b.severity.cmp(&a.severity));
    }
}
