//! Chart plugin loading

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::script::{chart_runtime, is_chart_script};
use super::{Chart, ChartPlugin};
use crate::plugins::{PluginLoader, PluginManager};
use crate::scripting::{ScriptLimits, ScriptRuntime};
use crate::{Error, Result};

/// Plugin manager specialized for chart plugins
pub type ChartPluginManager = PluginManager<ChartPluginLoader>;

/// Builds a [`ChartPlugin`] from the scripts directly inside a plugin directory
#[derive(Clone)]
pub struct ChartPluginLoader {
    runtime: Arc<dyn ScriptRuntime>,
}

impl ChartPluginLoader {
    /// Create a loader evaluating scripts with `runtime`
    #[must_use]
    pub fn new(runtime: Arc<dyn ScriptRuntime>) -> Self {
        Self { runtime }
    }

    /// Runtime used for chart scripts
    #[must_use]
    pub fn runtime(&self) -> &dyn ScriptRuntime {
        self.runtime.as_ref()
    }

    fn load_chart(&self, path: &Path) -> Option<Chart> {
        match Chart::from_script(path, self.runtime()) {
            Ok(chart) => {
                tracing::debug!(
                    path = %path.display(),
                    name = ?chart.name(),
                    category = ?chart.category(),
                    "loaded chart"
                );
                Some(chart)
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping chart script");
                None
            }
        }
    }
}

impl Default for ChartPluginLoader {
    fn default() -> Self {
        Self::new(Arc::new(chart_runtime(ScriptLimits::default())))
    }
}

impl std::fmt::Debug for ChartPluginLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartPluginLoader").finish_non_exhaustive()
    }
}

impl PluginLoader for ChartPluginLoader {
    type Plugin = ChartPlugin;

    /// Every readable directory is a plugin, even one without any charts
    fn load_plugin(&self, dir: &Path) -> Result<Option<ChartPlugin>> {
        let entries = std::fs::read_dir(dir).map_err(|source| Error::Discovery {
            path: dir.to_path_buf(),
            source,
        })?;

        let scripts: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| is_chart_script(path) && path.is_file())
            .collect();

        let charts = scripts
            .iter()
            .filter_map(|path| self.load_chart(path))
            .collect();

        Ok(Some(ChartPlugin::new(dir, charts)))
    }
}

impl PluginManager<ChartPluginLoader> {
    /// Chart plugin manager over `root` evaluating scripts with `runtime`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `root` does not exist or is
    /// not a directory
    pub fn open(root: impl Into<PathBuf>, runtime: Arc<dyn ScriptRuntime>) -> Result<Self> {
        Self::new(root, ChartPluginLoader::new(runtime))
    }

    /// Chart plugin manager over `root` with the default sandboxed runtime
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `root` does not exist or is
    /// not a directory
    pub fn with_defaults(root: impl Into<PathBuf>) -> Result<Self> {
        Self::new(root, ChartPluginLoader::default())
    }
}
