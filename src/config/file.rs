//! TOML configuration file loading
//!
//! Supports `~/.config/geochart/config.toml` as a persistent config source
//! (`GEOCHART_CONFIG` points elsewhere). All fields are optional: the file is
//! a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;
use crate::scripting::ScriptLimits;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "GEOCHART_CONFIG";

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct GeochartConfigFile {
    /// Plugin discovery configuration
    #[serde(default)]
    pub plugins: PluginsFileConfig,

    /// Script sandbox limits
    #[serde(default)]
    pub scripting: ScriptingFileConfig,
}

/// Plugin discovery configuration
#[derive(Debug, Default, Deserialize)]
pub struct PluginsFileConfig {
    /// Plugin root directory
    pub dir: Option<String>,
}

/// Script sandbox limits; unset fields keep their defaults
#[derive(Debug, Default, Deserialize)]
pub struct ScriptingFileConfig {
    pub max_operations: Option<u64>,
    pub max_call_levels: Option<usize>,
    pub max_string_size: Option<usize>,
    pub max_array_size: Option<usize>,
    pub max_map_size: Option<usize>,
}

impl ScriptingFileConfig {
    /// Overlay the configured limits on `base`
    #[must_use]
    pub fn apply(&self, base: ScriptLimits) -> ScriptLimits {
        ScriptLimits {
            max_operations: self.max_operations.unwrap_or(base.max_operations),
            max_call_levels: self.max_call_levels.unwrap_or(base.max_call_levels),
            max_string_size: self.max_string_size.unwrap_or(base.max_string_size),
            max_array_size: self.max_array_size.unwrap_or(base.max_array_size),
            max_map_size: self.max_map_size.unwrap_or(base.max_map_size),
        }
    }
}

/// Read and parse a config file
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML
pub fn parse_config_file(path: &Path) -> Result<GeochartConfigFile> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load the TOML config file from the standard path
///
/// Returns `GeochartConfigFile::default()` if the file doesn't exist or can't be parsed.
#[must_use]
pub fn load_config_file() -> GeochartConfigFile {
    let Some(path) = config_file_path() else {
        return GeochartConfigFile::default();
    };

    if !path.exists() {
        return GeochartConfigFile::default();
    }

    match parse_config_file(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded config file");
            config
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to load config file, using defaults"
            );
            GeochartConfigFile::default()
        }
    }
}

/// Return the config file path: `$GEOCHART_CONFIG` or `~/.config/geochart/config.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }

    directories::BaseDirs::new().map(|d| d.config_dir().join("geochart").join("config.toml"))
}
