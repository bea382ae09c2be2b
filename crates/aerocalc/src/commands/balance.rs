//! `aerocalc balance` -- balance the aerobic oxidation of a compound.

use anyhow::{Context, Result};
use aerocalc_chem::balance_oxidation;
use aerocalc_chem::parser::parse_formula;
use aerocalc_ui::styles::render_muted;

use crate::cli::BalanceArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `aerocalc balance` command.
pub fn run(ctx: &RuntimeContext, args: &BalanceArgs) -> Result<()> {
    let compound = parse_formula(&args.formula)
        .with_context(|| format!("invalid formula '{}'", args.formula))?;
    let balanced = balance_oxidation(&args.formula)
        .with_context(|| format!("cannot balance oxidation of '{}'", args.formula))?;
    let molar_mass = compound.molar_mass();

    if ctx.json {
        output_json(&serde_json::json!({
            "equation": balanced.to_string(),
            "reactants": balanced.reactant_map(),
            "products": balanced.product_map(),
            "molar_mass": molar_mass,
        }));
        return Ok(());
    }

    println!("{}", balanced);
    if !ctx.quiet {
        println!(
            "{}",
            render_muted(&format!("molar mass of {}: {:.3} g/mol", compound, molar_mass))
        );
    }
    Ok(())
}
