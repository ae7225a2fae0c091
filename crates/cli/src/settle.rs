//! Settlement subcommands: payout, dispute, early-return, eligibility.

use std::path::Path;
use std::process;

use autorenta_settlement::{
    early_return_refund, eligibility_report, parse_timestamp, settle_dispute, split_earnings,
    Resolution, SettlementPolicy,
};
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{print_json, read_booking, report_error, OutputFormat};

/// `--now` when given, otherwise the current instant.
fn resolve_now(now: Option<&str>, output: OutputFormat, quiet: bool) -> OffsetDateTime {
    match now {
        None => OffsetDateTime::now_utc(),
        Some(value) => match parse_timestamp("now", value) {
            Ok(ts) => ts,
            Err(e) => {
                report_error(&format!("error: {}", e), output, quiet);
                process::exit(1);
            }
        },
    }
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

pub(crate) fn cmd_payout(
    total: &str,
    policy: &SettlementPolicy,
    output: OutputFormat,
    quiet: bool,
) {
    let total: Decimal = match total.parse() {
        Ok(d) => d,
        Err(e) => {
            report_error(&format!("invalid amount '{}': {}", total, e), output, quiet);
            process::exit(1);
        }
    };

    let split = match split_earnings(total, policy) {
        Ok(s) => s,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&split),
        OutputFormat::Text => {
            println!("total:    {}", split.total);
            println!("owner:    {} ({}%)", split.owner_amount, split.owner_percentage);
            println!(
                "platform: {} ({}%)",
                split.platform_fee, split.platform_percentage
            );
        }
    }
}

pub(crate) fn cmd_dispute(
    resolution: &str,
    disputed_cents: i64,
    final_charges_cents: Option<i64>,
    output: OutputFormat,
    quiet: bool,
) {
    let settlement = match resolution
        .parse::<Resolution>()
        .and_then(|r| settle_dispute(r, disputed_cents, final_charges_cents))
    {
        Ok(s) => s,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&settlement),
        OutputFormat::Text => {
            println!("resolution: {}", settlement.resolution);
            println!("refund:     {} cents", settlement.refund_cents);
            println!("booking:    {}", settlement.booking_status);
        }
    }
}

pub(crate) fn cmd_early_return(
    booking_path: &Path,
    now: Option<&str>,
    output: OutputFormat,
    quiet: bool,
) {
    let now = resolve_now(now, output, quiet);
    let Some(booking) = read_booking(booking_path, output, quiet) else {
        report_error("error: booking file is null", output, quiet);
        process::exit(1);
    };

    let refund = match early_return_refund(&booking, now) {
        Ok(r) => r,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&refund),
        OutputFormat::Text => {
            println!("unused days: {}", refund.remaining_days);
            println!(
                "refund:      {} ({} cents)",
                refund.refund_amount, refund.refund_cents
            );
            if let Some(total) = refund.adjusted_total {
                println!("new total:   {}", total);
            }
        }
    }
}

pub(crate) fn cmd_eligibility(
    booking_path: &Path,
    now: Option<&str>,
    policy: &SettlementPolicy,
    output: OutputFormat,
    quiet: bool,
) {
    let now = resolve_now(now, output, quiet);
    let Some(booking) = read_booking(booking_path, output, quiet) else {
        report_error("error: booking file is null", output, quiet);
        process::exit(1);
    };

    let report = match eligibility_report(&booking, now, policy) {
        Ok(r) => r,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            for (name, check) in [
                ("check-in", &report.check_in),
                ("check-out", &report.check_out),
                ("review", &report.review),
            ] {
                let mut line = format!("{:<10} {}", name, yes_no(check.allowed));
                if let Some(days) = check.days_remaining {
                    line.push_str(&format!(" ({} days left)", days));
                }
                if let Some(ref reason) = check.reason {
                    line.push_str(&format!(" - {}", reason));
                }
                println!("{}", line);
            }
        }
    }
}
