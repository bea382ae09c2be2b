//! Parameter configuration for the aerocalc system.
//!
//! Parameters are layered with `figment`: built-in defaults, then an
//! optional `aerocalc.toml` / `aerocalc.yaml` file, then `AEROCALC_*`
//! environment variables. This crate also discovers the parameter file by
//! walking up from the working directory and writes default files.

pub mod config;
pub mod discovery;

pub use config::{ConfigError, ConfigFormat, ConfigSource, LoadedParams, load_params, save_params};
pub use discovery::find_config_file;
