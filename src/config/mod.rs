//! Configuration management for geochart

pub mod file;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::Result;
use crate::charts::{ChartPluginManager, chart_runtime};
use crate::scripting::ScriptLimits;

use self::file::GeochartConfigFile;

/// Resolved configuration
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Plugin root directory
    pub plugin_dir: PathBuf,

    /// Limits applied to every chart script evaluation
    pub script_limits: ScriptLimits,
}

/// Default plugin root: `~/.local/share/geochart/plugins` on Linux
#[must_use]
pub fn default_plugin_dir() -> PathBuf {
    directories::ProjectDirs::from("org", "geochart", "geochart")
        .map_or_else(|| PathBuf::from("plugins"), |d| d.data_dir().join("plugins"))
}

impl Config {
    /// Load configuration
    ///
    /// The plugin directory comes from `plugin_dir` if given, then the config
    /// file, then [`default_plugin_dir`].
    #[must_use]
    pub fn load(plugin_dir: Option<PathBuf>) -> Self {
        Self::from_file_config(plugin_dir, &file::load_config_file())
    }

    /// Resolve configuration from an already parsed config file
    #[must_use]
    pub fn from_file_config(plugin_dir: Option<PathBuf>, file: &GeochartConfigFile) -> Self {
        let plugin_dir = plugin_dir
            .or_else(|| file.plugins.dir.as_ref().map(PathBuf::from))
            .unwrap_or_else(default_plugin_dir);

        Self {
            plugin_dir,
            script_limits: file.scripting.apply(ScriptLimits::default()),
        }
    }

    /// Build a chart plugin manager for the configured directory and limits
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the plugin directory
    /// does not exist or is not a directory
    pub fn chart_plugin_manager(&self) -> Result<ChartPluginManager> {
        ChartPluginManager::open(
            &self.plugin_dir,
            Arc::new(chart_runtime(self.script_limits)),
        )
    }
}
