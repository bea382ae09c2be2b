//! `aerocalc run` -- the full oxygen and air demand calculation.

use std::path::Path;

use anyhow::{Context, Result};
use aerocalc_core::report::ReportLine;
use aerocalc_core::{AerationReport, TunnelParams, compute};
use aerocalc_ui::styles::{render_heading, render_muted, render_pass};
use serde::Serialize;
use tracing::debug;

use crate::cli::RunArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, print_section};

/// Keys printed in quiet mode.
const SUMMARY_KEYS: [&str; 3] = ["average_hourly_flow", "heat_removal_flow", "peak_hourly_flow"];

#[derive(Serialize)]
struct RunOutput<'a> {
    source: String,
    equation: String,
    report: &'a AerationReport,
    lines: Vec<ReportLine>,
}

/// Execute the `aerocalc run` command.
pub fn run(ctx: &RuntimeContext, args: &RunArgs) -> Result<()> {
    let loaded = ctx.load_params()?;
    let mut params = loaded.params;
    apply_overrides(&mut params, args);
    debug!(?params, "effective parameters");

    let report = compute(&params)
        .with_context(|| format!("calculation failed for formula '{}'", params.formula))?;

    if let Some(path) = &args.export {
        write_export(&report, path)?;
    }

    let lines = report.lines();

    if ctx.json {
        output_json(&RunOutput {
            source: loaded.source.to_string(),
            equation: report.equation.to_string(),
            report: &report,
            lines,
        });
        return Ok(());
    }

    if ctx.quiet {
        for line in lines.iter().filter(|l| SUMMARY_KEYS.contains(&l.key)) {
            println!("{}", line);
        }
        return Ok(());
    }

    println!("{}", render_heading(&format!("Oxidation of {}", params.formula)));
    println!("{}", report.equation);
    println!("{}", render_muted(&format!("parameters: {}", loaded.source)));
    println!();
    print_section("Aeration demand", &lines);

    if let Some(path) = &args.export {
        println!();
        println!(
            "{} {}",
            render_pass("Wrote report context to"),
            path.display()
        );
    }

    Ok(())
}

/// Command-line flags win over every configuration layer.
fn apply_overrides(params: &mut TunnelParams, args: &RunArgs) {
    if let Some(formula) = &args.formula {
        params.formula = formula.clone();
    }
    if let Some(days) = args.days {
        params.schedule.days = days;
    }
    if let Some(hours) = args.hours_per_day {
        params.schedule.hours_per_day = hours;
    }
}

fn write_export(report: &AerationReport, path: &Path) -> Result<()> {
    let context = report
        .export_context()
        .to_json()
        .context("failed to serialize report context")?;
    let json = serde_json::to_string_pretty(&context)
        .context("failed to serialize report context")?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "exported report context");
    Ok(())
}
