//! `aerocalc config` -- show the effective parameters or write a file.

use anyhow::{Context, Result, bail};
use aerocalc_config::save_params;
use aerocalc_core::TunnelParams;
use aerocalc_ui::styles::{render_muted, render_pass};

use crate::cli::{ConfigArgs, ConfigCommands, ConfigInitArgs};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `aerocalc config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => show(ctx),
        ConfigCommands::Init(init_args) => init(ctx, init_args),
    }
}

fn show(ctx: &RuntimeContext) -> Result<()> {
    let loaded = ctx.load_params()?;

    if ctx.json {
        output_json(&serde_json::json!({
            "source": loaded.source.to_string(),
            "params": loaded.params,
        }));
        return Ok(());
    }

    if !ctx.quiet {
        println!("{}", render_muted(&format!("# source: {}", loaded.source)));
    }
    let yaml = serde_yaml::to_string(&loaded.params).context("failed to render parameters")?;
    print!("{}", yaml);
    Ok(())
}

fn init(ctx: &RuntimeContext, args: &ConfigInitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        bail!(
            "{} already exists\nHint: pass --force to overwrite it",
            args.path.display()
        );
    }

    save_params(&args.path, &TunnelParams::default())
        .with_context(|| format!("failed to write {}", args.path.display()))?;

    if ctx.json {
        output_json(&serde_json::json!({
            "path": args.path.display().to_string(),
            "created": true,
        }));
    } else if !ctx.quiet {
        println!("{} {}", render_pass("Created"), args.path.display());
    }
    Ok(())
}
