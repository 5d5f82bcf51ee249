//! Chart plugins
//!
//! Each plugin directory contributes the charts declared by the `.js`
//! scripts sitting directly inside it:
//!
//! ```text
//! <plugin-root>/
//!   concordia/
//!     wetherill.js      chart.name = "Wetherill"; chart.category = "Concordia";
//!     tera-wasserburg.js
//!   ellipses/
//!     ...
//! ```

pub mod loader;
pub mod script;

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::plugins::Plugin;

pub use loader::{ChartPluginLoader, ChartPluginManager};
pub use script::{chart_runtime, is_chart_script};

/// Chart metadata declared by one script
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Chart {
    name: Option<String>,
    category: Option<String>,
    source: PathBuf,
}

impl Chart {
    /// Create chart metadata for a script at `source`
    #[must_use]
    pub fn new(name: Option<String>, category: Option<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name,
            category,
            source: source.into(),
        }
    }

    /// Display name, if the script declared one
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Category, if the script declared one
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Script the metadata was read from
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Display ordering by name; a missing name sorts as the empty string
    #[must_use]
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name().unwrap_or_default().cmp(other.name().unwrap_or_default())
    }
}

/// Charts discovered in one plugin directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPlugin {
    name: String,
    path: PathBuf,
    charts: Vec<Chart>,
}

impl ChartPlugin {
    /// Bundle `charts` found in the plugin directory `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, charts: Vec<Chart>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self { name, path, charts }
    }

    /// Charts in discovery order
    #[must_use]
    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    /// Charts in display order (by name)
    #[must_use]
    pub fn sorted_charts(&self) -> Vec<&Chart> {
        let mut charts: Vec<&Chart> = self.charts.iter().collect();
        charts.sort_by(|a, b| a.cmp_by_name(b));
        charts
    }

    /// Distinct categories declared by this plugin's charts
    #[must_use]
    pub fn categories(&self) -> BTreeSet<&str> {
        self.charts.iter().filter_map(Chart::category).collect()
    }
}

impl Plugin for ChartPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
