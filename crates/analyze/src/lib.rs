//! AutoRenta lifecycle analyzer -- S1-S4 analysis suite with structured output.
//!
//! The analyzer consumes a [`LifecycleModel`], built either from the tables
//! compiled into `autorenta-core` or from a lifecycle export. Each analysis
//! is a separate module producing a serializable result struct. The
//! `analyze()` function runs all of them and aggregates results into an
//! `AnalysisReport`.

pub mod model;
pub mod report;
pub mod s1_state_space;
pub mod s2_reachability;
pub mod s3_derivability;
pub mod s4_authority;

pub use model::{AnalysisError, LifecycleModel, Transition};
pub use report::{AnalysisReport, Finding, FindingSeverity};
pub use s1_state_space::S1Result;
pub use s2_reachability::S2Result;
pub use s3_derivability::S3Result;
pub use s4_authority::S4Result;

/// Names accepted by [`analyze_selected`], in execution order.
pub const ANALYSES: [&str; 4] = ["s1", "s2", "s3", "s4"];

/// Run the full S1-S4 analysis suite.
pub fn analyze(model: &LifecycleModel) -> AnalysisReport {
    let mut report = AnalysisReport::new();
    report.s1_state_space = Some(s1_state_space::analyze_state_space(model));
    report.s2_reachability = Some(s2_reachability::analyze_reachability(model));
    report.s3_derivability = Some(s3_derivability::analyze_derivability(model));
    report.s4_authority = Some(s4_authority::analyze_authority(model));
    report.analyses_run = ANALYSES.iter().map(|s| s.to_string()).collect();

    report.extract_findings();
    report
}

/// Run selected analyses.
///
/// Valid analysis names: "s1", "s2", "s3", "s4". The analyses are
/// independent, so no dependency resolution is needed; they always run in
/// numeric order regardless of the order requested.
pub fn analyze_selected(
    model: &LifecycleModel,
    analyses: &[&str],
) -> Result<AnalysisReport, AnalysisError> {
    if let Some(unknown) = analyses.iter().find(|a| !ANALYSES.iter().any(|known| *known == **a)) {
        return Err(AnalysisError::UnknownAnalysis(unknown.to_string()));
    }

    let mut report = AnalysisReport::new();
    for name in ANALYSES.iter().filter(|name| analyses.contains(*name)) {
        match *name {
            "s1" => report.s1_state_space = Some(s1_state_space::analyze_state_space(model)),
            "s2" => report.s2_reachability = Some(s2_reachability::analyze_reachability(model)),
            "s3" => {
                report.s3_derivability = Some(s3_derivability::analyze_derivability(model))
            }
            "s4" => report.s4_authority = Some(s4_authority::analyze_authority(model)),
            _ => unreachable!("filtered against ANALYSES"),
        }
        report.analyses_run.push(name.to_string());
    }

    report.extract_findings();
    Ok(report)
}
