//! `aerocalc mass` -- molar mass and composition of a formula.

use anyhow::{Context, Result};
use aerocalc_chem::parser::parse_formula;
use aerocalc_ui::styles::{render_accent, render_muted};

use crate::cli::MassArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `aerocalc mass` command.
pub fn run(ctx: &RuntimeContext, args: &MassArgs) -> Result<()> {
    let formula = parse_formula(&args.formula)
        .with_context(|| format!("invalid formula '{}'", args.formula))?;
    let molar_mass = formula.molar_mass();

    if ctx.json {
        output_json(&serde_json::json!({
            "formula": formula.text,
            "composition": formula.composition,
            "molar_mass": molar_mass,
        }));
        return Ok(());
    }

    println!(
        "{}  {} {}",
        formula,
        render_accent(&format!("{:.3}", molar_mass)),
        render_muted("g/mol")
    );
    if !ctx.quiet {
        let parts: Vec<String> = formula
            .composition
            .iter()
            .map(|(symbol, count)| format!("{symbol}: {count}"))
            .collect();
        println!("{}", render_muted(&parts.join(", ")));
    }
    Ok(())
}
