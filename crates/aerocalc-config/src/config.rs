//! Loading and saving [`TunnelParams`].
//!
//! The main entry point is [`load_params`], which resolves the effective
//! parameters from three layers (later layers win):
//!
//! 1. [`TunnelParams::default`]
//! 2. the parameter file, if one is given or discovered
//! 3. `AEROCALC_*` environment variables, `__` separating nested keys
//!    (`AEROCALC_WASTE__DENSITY=0.7`)

use std::fmt;
use std::path::{Path, PathBuf};

use aerocalc_core::TunnelParams;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use thiserror::Error;
use tracing::debug;

use crate::discovery::find_config_file;

/// Prefix of environment variables that override parameters.
pub const ENV_PREFIX: &str = "AEROCALC_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The parameter file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    /// An explicitly requested parameter file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file extension is neither TOML nor YAML.
    #[error("unsupported config format for {} (expected .toml, .yaml or .yml)", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A layer failed to parse or did not match the parameter schema.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] figment::Error),

    /// Serializing parameters to YAML failed.
    #[error("failed to write YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serializing parameters to TOML failed.
    #[error("failed to write TOML: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Formats and sources
// ---------------------------------------------------------------------------

/// On-disk parameter file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Where the file layer of the effective parameters came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No parameter file; defaults and environment only.
    Defaults,
    /// Parameters were read from this file.
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => f.write_str("built-in defaults"),
            Self::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Effective parameters together with their file source.
#[derive(Debug, Clone)]
pub struct LoadedParams {
    pub params: TunnelParams,
    pub source: ConfigSource,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Resolve the effective parameters.
///
/// `explicit` is a file named on the command line; it must exist. Without
/// it, the file is discovered by walking up from `cwd`; if none is found the
/// file layer is skipped. An empty file is treated as absent.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] for a missing explicit file,
/// [`ConfigError::UnsupportedFormat`] for an unknown extension, and
/// [`ConfigError::Invalid`] if any layer fails to parse.
pub fn load_params(explicit: Option<&Path>, cwd: &Path) -> Result<LoadedParams> {
    let path = match explicit {
        Some(p) if !p.exists() => return Err(ConfigError::NotFound(p.to_path_buf())),
        Some(p) => Some(p.to_path_buf()),
        None => find_config_file(cwd),
    };

    let (figment, source) = match path {
        Some(path) => (file_figment(&path)?, ConfigSource::File(path)),
        None => (defaults_figment(), ConfigSource::Defaults),
    };

    let figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"));
    let params: TunnelParams = figment.extract()?;
    debug!(source = %source, formula = %params.formula, "resolved parameters");

    Ok(LoadedParams { params, source })
}

/// Write parameters to `path` in the format implied by its extension.
///
/// Parent directories are created as needed.
pub fn save_params(path: &Path, params: &TunnelParams) -> Result<()> {
    let content = match ConfigFormat::from_path(path)? {
        ConfigFormat::Toml => toml::to_string_pretty(params)?,
        ConfigFormat::Yaml => serde_yaml::to_string(params)?,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    debug!(path = %path.display(), "wrote parameters");
    Ok(())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn defaults_figment() -> Figment {
    Figment::from(Serialized::defaults(TunnelParams::default()))
}

/// Defaults merged with the contents of `path`.
fn file_figment(path: &Path) -> Result<Figment> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let figment = defaults_figment();

    if content.trim().is_empty() {
        return Ok(figment);
    }

    Ok(match format {
        ConfigFormat::Toml => figment.merge(Toml::string(&content)),
        ConfigFormat::Yaml => figment.merge(Yaml::string(&content)),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_file_yields_defaults() {
        Jail::expect_with(|jail| {
            let loaded = load_params(None, jail.directory()).map_err(|e| e.to_string())?;
            assert_eq!(loaded.source, ConfigSource::Defaults);
            assert_eq!(loaded.params, TunnelParams::default());
            Ok(())
        });
    }

    #[test]
    fn test_partial_toml_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "aerocalc.toml",
                "formula = \"C2H5NO2\"\n\n[waste]\ndensity = 0.8\n",
            )?;
            let loaded = load_params(None, jail.directory()).map_err(|e| e.to_string())?;
            assert_eq!(loaded.params.formula, "C2H5NO2");
            assert_eq!(loaded.params.waste.density, 0.8);
            assert_eq!(loaded.params.waste.moisture_pct, 60.0);
            assert_eq!(loaded.params.schedule.days, 21);
            assert!(matches!(loaded.source, ConfigSource::File(_)));
            Ok(())
        });
    }

    #[test]
    fn test_yaml_file() {
        Jail::expect_with(|jail| {
            jail.create_file("aerocalc.yaml", "schedule:\n  days: 14\n")?;
            let loaded = load_params(None, jail.directory()).map_err(|e| e.to_string())?;
            assert_eq!(loaded.params.schedule.days, 14);
            assert_eq!(loaded.params.schedule.hours_per_day, 24);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("aerocalc.toml", "[waste]\ndensity = 0.8\n")?;
            jail.set_env("AEROCALC_WASTE__DENSITY", "0.5");
            jail.set_env("AEROCALC_TUNNEL__LENGTH", "30");
            let loaded = load_params(None, jail.directory()).map_err(|e| e.to_string())?;
            assert_eq!(loaded.params.waste.density, 0.5);
            assert_eq!(loaded.params.tunnel.length, 30.0);
            Ok(())
        });
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("aerocalc.toml", "  \n")?;
            let loaded = load_params(None, jail.directory()).map_err(|e| e.to_string())?;
            assert_eq!(loaded.params, TunnelParams::default());
            Ok(())
        });
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("aerocalc.toml", "[waste]\ndensity = \"heavy\"\n")?;
            let err = load_params(None, jail.directory()).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        Jail::expect_with(|jail| {
            let missing = jail.directory().join("nope.toml");
            let err = load_params(Some(&missing), jail.directory()).unwrap_err();
            assert!(matches!(err, ConfigError::NotFound(_)));
            Ok(())
        });
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            ConfigFormat::from_path(Path::new("params.ini")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert_eq!(
            ConfigFormat::from_path(Path::new("a.yml")).unwrap(),
            ConfigFormat::Yaml
        );
    }

    #[test]
    fn test_roundtrip_toml_and_yaml() {
        // Inside a jail so env overrides set by other tests cannot leak in.
        Jail::expect_with(|jail| {
            let mut params = TunnelParams::default();
            params.formula = "C5H7O2N".to_string();
            params.schedule.days = 28;

            for name in ["nested/aerocalc.toml", "aerocalc.yaml"] {
                let path = jail.directory().join(name);
                save_params(&path, &params).map_err(|e| e.to_string())?;
                let loaded =
                    load_params(Some(&path), jail.directory()).map_err(|e| e.to_string())?;
                assert_eq!(loaded.params, params);
                assert_eq!(loaded.source, ConfigSource::File(path));
            }
            Ok(())
        });
    }
}
