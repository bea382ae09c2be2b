//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs besides its own
//! arguments: the global output flags and where parameters come from.

use std::path::PathBuf;

use anyhow::{Context, Result};
use aerocalc_config::{LoadedParams, load_params};

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Explicit parameter file, if given.
    pub config_path: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        Self {
            config_path: global.config.clone(),
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Resolve parameters: defaults, then the parameter file, then env.
    pub fn load_params(&self) -> Result<LoadedParams> {
        let cwd = std::env::current_dir().context("cannot determine working directory")?;
        load_params(self.config_path.as_deref(), &cwd).context("failed to load parameters")
    }
}
