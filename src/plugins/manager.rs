//! Plugin manager - scan a root directory and keep the loaded snapshot

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::discovery::candidate_dirs;
use super::loader::{Plugin, PluginLoader};
use crate::{Error, Result};

/// Discovers plugins under a fixed root directory
///
/// Each immediate subdirectory of the root is handed to the loader. The
/// successfully built plugins form an immutable snapshot that is replaced
/// wholesale by every [`load_plugins`](Self::load_plugins) call.
pub struct PluginManager<L: PluginLoader> {
    root: PathBuf,
    loader: L,
    plugins: Arc<[L::Plugin]>,
}

impl<L: PluginLoader> PluginManager<L> {
    /// Create a manager over `root`
    ///
    /// No plugins are loaded until [`load_plugins`](Self::load_plugins) is called.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `root` does not exist or is
    /// not a directory
    pub fn new(root: impl Into<PathBuf>, loader: L) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            let problem = if root.exists() {
                "is not a directory"
            } else {
                "does not exist"
            };
            return Err(Error::InvalidConfiguration(format!(
                "plugin root {} {problem}",
                root.display()
            )));
        }

        Ok(Self {
            root,
            loader,
            plugins: Arc::from(Vec::new()),
        })
    }

    /// Plugins from the most recent completed load (empty before the first)
    #[must_use]
    pub fn plugins(&self) -> Arc<[L::Plugin]> {
        Arc::clone(&self.plugins)
    }

    /// Rescan the root and replace the loaded plugins
    ///
    /// Plugins keep directory listing order. Failures are logged and contained:
    /// an unreadable root yields an empty snapshot, and a candidate whose
    /// loader fails is skipped.
    pub fn load_plugins(&mut self) -> Arc<[L::Plugin]> {
        let loaded: Vec<L::Plugin> = match candidate_dirs(&self.root) {
            Ok(dirs) => dirs
                .iter()
                .filter_map(|dir| self.load_candidate(dir))
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "plugin discovery failed");
                Vec::new()
            }
        };

        tracing::info!(
            root = %self.root.display(),
            count = loaded.len(),
            "loaded plugins"
        );

        self.plugins = Arc::from(loaded);
        self.plugins()
    }

    fn load_candidate(&self, dir: &Path) -> Option<L::Plugin> {
        match self.loader.load_plugin(dir) {
            Ok(Some(plugin)) => {
                tracing::debug!(
                    plugin = %plugin.name(),
                    path = %plugin.path().display(),
                    "discovered plugin"
                );
                Some(plugin)
            }
            Ok(None) => {
                tracing::debug!(path = %dir.display(), "no plugin in directory");
                None
            }
            Err(e) => {
                tracing::warn!(
                    path = %dir.display(),
                    error = %e,
                    "failed to load plugin"
                );
                None
            }
        }
    }

    /// Root directory being scanned
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loader used for each candidate
    #[must_use]
    pub const fn loader(&self) -> &L {
        &self.loader
    }

    /// Number of loaded plugins
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether no plugins are loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
