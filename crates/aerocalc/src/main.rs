//! `aerocalc` -- oxygen and air demand calculator for tunnel composting.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, RunArgs};
use context::RuntimeContext;

const DEBUG_FILTER: &str =
    "aerocalc=debug,aerocalc_core=debug,aerocalc_chem=debug,aerocalc_config=debug";

fn main() {
    let cli = Cli::parse();
    let ctx = RuntimeContext::from_global_args(&cli.global);

    if ctx.verbose {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEBUG_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Some(Commands::Run(args)) => commands::run::run(&ctx, &args),
        Some(Commands::Balance(args)) => commands::balance::run(&ctx, &args),
        Some(Commands::Mass(args)) => commands::mass::run(&ctx, &args),
        Some(Commands::Config(args)) => commands::config_cmd::run(&ctx, &args),
        Some(Commands::Completion(args)) => commands::completion::run(&ctx, &args),
        None => commands::run::run(&ctx, &RunArgs::default()),
    };

    if let Err(e) = result {
        if ctx.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("{} {:#}", aerocalc_ui::styles::render_fail("Error:"), e);
        }
        std::process::exit(1);
    }
}
