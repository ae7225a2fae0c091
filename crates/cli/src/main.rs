mod config;
mod manifest;
mod settle;

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use autorenta_analyze::{FindingSeverity, LifecycleModel, ANALYSES};
use autorenta_core::{
    available_actions, available_actions_for, can_transition, derive, is_terminal_state,
    next_states, pending_message, status_display, timeline_step_index,
    validate_status_transition, Action, Booking, BookingLifecycle, BookingState, BookingStatus,
    Role, TIMELINE_LAST_STEP,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// AutoRenta booking lifecycle toolkit.
#[derive(Parser)]
#[command(name = "autorenta", version, about = "AutoRenta booking lifecycle toolkit")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Settlement policy TOML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the canonical state of a booking snapshot
    Derive {
        /// Path to the booking JSON file (`null` for no booking)
        booking: PathBuf,
        /// Only show actions and hints for this role
        #[arg(long)]
        role: Option<Role>,
    },

    /// Check whether a state transition is allowed (exit 1 if not)
    Transition {
        from: BookingState,
        to: BookingState,
    },

    /// List the actions a role can take in a state
    Actions {
        state: BookingState,
        /// owner or renter; other names have no actions
        role: String,
    },

    /// Validate a change of the persisted status column
    StatusTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// Validate a booking snapshot against the JSON Schema
    Validate {
        /// Path to the booking JSON file
        booking: PathBuf,
    },

    /// Export the lifecycle tables as JSON
    Lifecycle {
        /// Wrap the export in a manifest envelope with an etag
        #[arg(long)]
        manifest: bool,
    },

    /// Run static analysis checks on the lifecycle tables
    Check {
        /// Lifecycle export to check instead of the built-in tables
        export: Option<PathBuf>,
        /// Comma-separated list of analyses to run (s1,s2,s3,s4). Default: all.
        #[arg(long)]
        analysis: Option<String>,
    },

    /// Split a rental total between owner and platform
    Payout {
        /// Rental total, e.g. 6000 or 1234.50
        total: String,
    },

    /// Compute the refund for a resolved dispute
    Dispute {
        /// approved, partial or rejected
        resolution: String,
        #[arg(long)]
        disputed_cents: i64,
        #[arg(long)]
        final_charges_cents: Option<i64>,
    },

    /// Compute the refund for returning a car before the booking ends
    EarlyReturn {
        booking: PathBuf,
        /// Return instant (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<String>,
    },

    /// Check-in, check-out and review eligibility of a booking
    Eligibility {
        booking: PathBuf,
        /// Instant to evaluate at (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<String>,
    },
}

fn main() {
    // Default to warn if RUST_LOG not set
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            report_error(&format!("config error: {}", e), cli.output, cli.quiet);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Derive { booking, role } => {
            cmd_derive(&booking, role, cli.output, cli.quiet);
        }
        Commands::Transition { from, to } => {
            cmd_transition(from, to, cli.output, cli.quiet);
        }
        Commands::Actions { state, role } => {
            cmd_actions(state, &role, cli.output, cli.quiet);
        }
        Commands::StatusTransition { from, to } => {
            cmd_status_transition(from, to, cli.output, cli.quiet);
        }
        Commands::Validate { booking } => {
            cmd_validate(&booking, cli.output, cli.quiet);
        }
        Commands::Lifecycle { manifest } => {
            cmd_lifecycle(manifest, cli.output, cli.quiet);
        }
        Commands::Check { export, analysis } => {
            cmd_check(export.as_deref(), analysis.as_deref(), cli.output, cli.quiet);
        }
        Commands::Payout { total } => {
            settle::cmd_payout(&total, &config.settlement, cli.output, cli.quiet);
        }
        Commands::Dispute {
            resolution,
            disputed_cents,
            final_charges_cents,
        } => {
            settle::cmd_dispute(
                &resolution,
                disputed_cents,
                final_charges_cents,
                cli.output,
                cli.quiet,
            );
        }
        Commands::EarlyReturn { booking, now } => {
            settle::cmd_early_return(&booking, now.as_deref(), cli.output, cli.quiet);
        }
        Commands::Eligibility { booking, now } => {
            settle::cmd_eligibility(
                &booking,
                now.as_deref(),
                &config.settlement,
                cli.output,
                cli.quiet,
            );
        }
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
    println!("{}", json);
}

/// Read and parse a JSON file, exiting on failure.
pub(crate) fn read_json(path: &Path, output: OutputFormat, quiet: bool) -> serde_json::Value {
    let content = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

/// Read a booking snapshot. A file containing `null` is no booking.
pub(crate) fn read_booking(path: &Path, output: OutputFormat, quiet: bool) -> Option<Booking> {
    let value = read_json(path, output, quiet);
    match serde_json::from_value::<Option<Booking>>(value) {
        Ok(b) => b,
        Err(e) => {
            let msg = format!("invalid booking in '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Serialize)]
struct RoleView {
    role: Role,
    actions: &'static [Action],
    #[serde(skip_serializing_if = "Option::is_none")]
    pending_message: Option<&'static str>,
}

#[derive(Serialize)]
struct DeriveView {
    state: BookingState,
    label: &'static str,
    rule: &'static str,
    timeline_index: Option<u8>,
    terminal: bool,
    next_states: &'static [BookingState],
    roles: Vec<RoleView>,
}

fn cmd_derive(path: &Path, role: Option<Role>, output: OutputFormat, quiet: bool) {
    let booking = read_booking(path, output, quiet);
    let derivation = derive(booking.as_ref());
    let state = derivation.state;
    tracing::debug!(state = %state, rule = derivation.rule, "derived booking state");

    let roles: Vec<RoleView> = Role::ALL
        .iter()
        .copied()
        .filter(|r| role.map_or(true, |wanted| wanted == *r))
        .map(|r| RoleView {
            role: r,
            actions: available_actions(state, r),
            pending_message: pending_message(booking.as_ref(), r),
        })
        .collect();

    let view = DeriveView {
        state,
        label: state.label(),
        rule: derivation.rule,
        timeline_index: timeline_step_index(state),
        terminal: is_terminal_state(state),
        next_states: next_states(state),
        roles,
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Text => {
            println!("state:    {} ({})", view.state, view.label);
            println!("rule:     {}", view.rule);
            match view.timeline_index {
                Some(i) => println!("timeline: {}/{}", i, TIMELINE_LAST_STEP),
                None => println!("timeline: off track"),
            }
            if view.terminal {
                println!("next:     (terminal)");
            } else {
                println!("next:     {}", join(view.next_states));
            }
            for r in &view.roles {
                println!("{:<9} {}", format!("{}:", r.role), join(r.actions));
                if let Some(msg) = r.pending_message {
                    println!("          {}", msg);
                }
            }
        }
    }
}

fn cmd_transition(from: BookingState, to: BookingState, output: OutputFormat, quiet: bool) {
    let allowed = can_transition(from, to);

    if !quiet {
        match output {
            OutputFormat::Json => print_json(&serde_json::json!({
                "from": from,
                "to": to,
                "allowed": allowed,
                "next_states": next_states(from),
            })),
            OutputFormat::Text => {
                if allowed {
                    println!("{} -> {}: allowed", from, to);
                } else {
                    println!(
                        "{} -> {}: not allowed (from {}: {})",
                        from,
                        to,
                        from,
                        join(next_states(from))
                    );
                }
            }
        }
    }

    if !allowed {
        process::exit(1);
    }
}

fn cmd_actions(state: BookingState, role: &str, output: OutputFormat, quiet: bool) {
    let actions = available_actions_for(state, role);
    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&actions),
        OutputFormat::Text => {
            for action in actions {
                println!("{}", action);
            }
        }
    }
}

fn cmd_status_transition(
    from: BookingStatus,
    to: BookingStatus,
    output: OutputFormat,
    quiet: bool,
) {
    if let Err(e) = validate_status_transition(from, to) {
        report_error(&e.to_string(), output, quiet);
        process::exit(1);
    }

    if quiet {
        return;
    }
    let display = status_display(to);
    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "from": from,
            "to": to,
            "valid": true,
            "display": display,
        })),
        OutputFormat::Text => {
            println!("{} -> {}: valid", from, to);
            println!("{}: {}", display.label, display.description);
        }
    }
}

static BOOKING_SCHEMA_STR: &str = include_str!("../../../schema/booking-schema.json");

fn cmd_validate(path: &Path, output: OutputFormat, quiet: bool) {
    let schema: serde_json::Value = match serde_json::from_str(BOOKING_SCHEMA_STR) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("internal error: failed to parse embedded booking schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("internal error: failed to compile schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let doc = read_json(path, output, quiet);
    let errors: Vec<String> = validator
        .iter_errors(&doc)
        .map(|e| format!("{}", e))
        .collect();

    if errors.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("valid"),
                OutputFormat::Json => println!("{{\"valid\": true}}"),
            }
        }
        return;
    }

    match output {
        OutputFormat::Text => {
            if !quiet {
                eprintln!("invalid booking");
                for err in &errors {
                    eprintln!("  - {}", err);
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "valid": false,
                "errors": errors
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
    }
    process::exit(1);
}

fn cmd_lifecycle(with_manifest: bool, output: OutputFormat, quiet: bool) {
    let lifecycle = BookingLifecycle::build();
    if quiet {
        return;
    }

    if with_manifest || output == OutputFormat::Json {
        let export = lifecycle.to_json();
        let value = if with_manifest {
            manifest::build_manifest(export)
        } else {
            export
        };
        print_json(&value);
        return;
    }

    for entry in &lifecycle.states {
        let step = entry
            .timeline_index
            .map(|i| i.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<16} {:>2}  {:<28} -> {}",
            entry.state.as_str(),
            step,
            entry.label,
            if entry.terminal {
                "(terminal)".to_string()
            } else {
                join(&entry.next_states)
            }
        );
    }
}

fn cmd_check(export: Option<&Path>, analysis: Option<&str>, output: OutputFormat, quiet: bool) {
    // Step 1: Load the lifecycle model
    let model = match export {
        None => LifecycleModel::booking(),
        Some(path) => match LifecycleModel::from_export(&read_json(path, output, quiet)) {
            Ok(m) => m,
            Err(e) => {
                let msg = format!("error loading '{}': {}", path.display(), e);
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        },
    };

    // Step 2: Parse analysis selection
    let selected: Option<Vec<&str>> = analysis.map(|a| {
        let selected: Vec<&str> = a.split(',').map(|s| s.trim()).collect();
        for s in &selected {
            if !ANALYSES.contains(s) {
                let msg = format!("invalid analysis '{}'. Valid: {}", s, ANALYSES.join(", "));
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        }
        selected
    });

    // Step 3: Run analysis
    let report = match &selected {
        None => autorenta_analyze::analyze(&model),
        Some(analyses) => match autorenta_analyze::analyze_selected(&model, analyses) {
            Ok(r) => r,
            Err(e) => {
                report_error(&format!("analysis error: {}", e), output, quiet);
                process::exit(1);
            }
        },
    };
    tracing::info!(
        analyses = ?report.analyses_run,
        findings = report.findings.len(),
        "lifecycle analysis finished"
    );

    // Step 4: Format output
    if !quiet {
        match output {
            OutputFormat::Json => print_json(&report),
            OutputFormat::Text => {
                println!("Lifecycle Analysis Report");
                println!("=========================");
                println!();

                if let Some(ref s1) = report.s1_state_space {
                    println!(
                        "  States: {} states, {} transitions, {} terminal",
                        s1.state_count,
                        s1.transitions.len(),
                        s1.terminal_states.len()
                    );
                }

                if let Some(ref s2) = report.s2_reachability {
                    if s2.unreachable_states.is_empty() && s2.trapped_states.is_empty() {
                        println!(
                            "  Reachability: {} states reachable from {}",
                            s2.reachable_states.len(),
                            s2.initial_state
                        );
                    } else {
                        println!(
                            "  Reachability: WARNING: {} unreachable, {} trapped",
                            s2.unreachable_states.len(),
                            s2.trapped_states.len()
                        );
                    }
                }

                if let Some(ref s3) = report.s3_derivability {
                    println!(
                        "  Derivability: {} snapshots, {} states derived, {} underivable",
                        s3.snapshot_count,
                        s3.derived_counts.len(),
                        s3.underivable_states.len()
                    );
                }

                if let Some(ref s4) = report.s4_authority {
                    println!(
                        "  Authority: {} authority entries, {} stalled states",
                        s4.total_authority_entries,
                        s4.stalled_states.len()
                    );
                }

                println!();
                println!("Findings:");

                if report.findings.is_empty() {
                    println!("  No findings.");
                }
                for finding in &report.findings {
                    let severity = match finding.severity {
                        FindingSeverity::Warning => "WARNING",
                        FindingSeverity::Info => "INFO",
                    };
                    let context = finding
                        .state
                        .map(|s| format!(" [{}]", s))
                        .unwrap_or_default();
                    println!(
                        "  [{}/{}]{}: {}",
                        finding.analysis, severity, context, finding.message
                    );
                }
            }
        }
    }

    // Step 5: Exit code based on findings
    if report.has_warnings() {
        process::exit(1);
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    tracing::debug!(error = msg, "command failed");
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
