//! Discovery of the parameter file.
//!
//! A project keeps its plant parameters in `aerocalc.toml` (or
//! `aerocalc.yaml` / `aerocalc.yml`) at or above the working directory.

use std::path::{Path, PathBuf};

/// Parameter file names, in lookup priority within one directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["aerocalc.toml", "aerocalc.yaml", "aerocalc.yml"];

/// Environment variable naming the parameter file explicitly.
pub const CONFIG_PATH_ENV: &str = "AEROCALC_CONFIG";

/// Default file name written by `aerocalc config init`.
pub const DEFAULT_CONFIG_FILE: &str = "aerocalc.toml";

/// Find the parameter file for `start`.
///
/// `AEROCALC_CONFIG` wins if it names an existing file. Otherwise the
/// directory tree is walked up from `start` and the first directory holding
/// one of [`CONFIG_FILE_NAMES`] decides.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
        let env_path = PathBuf::from(env_path);
        if env_path.is_file() {
            return Some(env_path);
        }
    }

    let start = start.canonicalize().ok()?;
    let mut current = start.as_path();
    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => break, // Reached filesystem root.
        }
    }

    None
}
