//! Clap CLI definitions for the `aerocalc` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// aerocalc -- oxygen and air demand of tunnel composting.
///
/// Balances the aerobic oxidation of the organic component, sizes the
/// waste load of the tunnel, and derives the average and peak hourly air
/// flow needed for oxidation and heat removal.
#[derive(Parser, Debug)]
#[command(
    name = "aerocalc",
    about = "Oxygen and air demand calculator for tunnel composting",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Parameter file (default: discover aerocalc.toml / aerocalc.yaml upwards).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (final flows only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full calculation (default).
    Run(RunArgs),

    /// Balance the oxidation of a compound (compound + O2 -> CO2 + H2O + NH3).
    Balance(BalanceArgs),

    /// Show the molar mass and composition of a formula.
    Mass(MassArgs),

    /// Inspect or create the parameter file.
    Config(ConfigArgs),

    /// Generate shell completions.
    Completion(CompletionArgs),
}

/// Arguments for `aerocalc run`.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Molecular formula of the organic component (overrides config).
    #[arg(long)]
    pub formula: Option<String>,

    /// Composting cycle length in days (overrides config).
    #[arg(long)]
    pub days: Option<u32>,

    /// Aeration hours per day (overrides config).
    #[arg(long)]
    pub hours_per_day: Option<u32>,

    /// Write the report template context as JSON to this file.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Arguments for `aerocalc balance`.
#[derive(Args, Debug)]
pub struct BalanceArgs {
    /// Molecular formula, e.g. C16H27O8N.
    pub formula: String,
}

/// Arguments for `aerocalc mass`.
#[derive(Args, Debug)]
pub struct MassArgs {
    /// Molecular formula, e.g. Ca(OH)2.
    pub formula: String,
}

/// Arguments for `aerocalc config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective parameters.
    Show,

    /// Write a parameter file with the built-in defaults.
    Init(ConfigInitArgs),
}

/// Arguments for `aerocalc config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Destination file (.toml, .yaml or .yml).
    #[arg(long, default_value = aerocalc_config::discovery::DEFAULT_CONFIG_FILE)]
    pub path: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `aerocalc completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Supported shells.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate bash completions.
    Bash,
    /// Generate zsh completions.
    Zsh,
    /// Generate fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_overrides_parse() {
        let cli = Cli::parse_from([
            "aerocalc", "--json", "run", "--formula", "C2H5NO2", "--days", "14",
        ]);
        assert!(cli.global.json);
        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.formula.as_deref(), Some("C2H5NO2"));
                assert_eq!(args.days, Some(14));
                assert_eq!(args.hours_per_day, None);
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["aerocalc", "-q"]);
        assert!(cli.global.quiet);
        assert!(cli.command.is_none());
    }
}
