//! Per-candidate loading strategy

use std::path::Path;

use crate::Result;

/// A plugin built from one candidate directory
pub trait Plugin {
    /// Display name, usually the plugin directory name
    fn name(&self) -> &str;

    /// Directory the plugin was loaded from
    fn path(&self) -> &Path;
}

/// Builds a typed plugin from a candidate directory
///
/// This is the only place domain knowledge enters [`super::PluginManager`].
/// Returning `Ok(None)` means "no plugin here"; an `Err` is logged by the
/// manager and the candidate is skipped, so one broken plugin never hides the
/// others.
///
/// Any `Fn(&Path) -> Result<Option<P>>` closure is a loader.
pub trait PluginLoader {
    /// Plugin type this loader produces
    type Plugin: Plugin;

    /// Try to build a plugin from `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` cannot be inspected; the manager treats it
    /// as "no plugin" for this candidate
    fn load_plugin(&self, dir: &Path) -> Result<Option<Self::Plugin>>;
}

impl<P, F> PluginLoader for F
where
    P: Plugin,
    F: Fn(&Path) -> Result<Option<P>>,
{
    type Plugin = P;

    fn load_plugin(&self, dir: &Path) -> Result<Option<P>> {
        self(dir)
    }
}
