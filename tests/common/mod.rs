//! Shared test utilities

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Script declaring a named, categorized chart
pub const CHART_WITH_CATEGORY: &str = r#"chart.name = "Test #1"; chart.category = "Test";"#;

/// Script declaring a name only
pub const CHART_WITHOUT_CATEGORY: &str = r#"chart.name = "Test #2";"#;

/// Script that fails to parse
pub const INVALID_CHART: &str = "chart.name = \"broken";

/// Create an empty plugin root
#[must_use]
pub fn plugin_root() -> TempDir {
    tempfile::tempdir().expect("failed to create plugin root")
}

/// Create a plugin directory holding the given `(file name, source)` scripts
pub fn create_plugin(root: &Path, name: &str, scripts: &[(&str, &str)]) -> PathBuf {
    let dir = root.join(name);
    std::fs::create_dir(&dir).expect("failed to create plugin directory");
    for (file, source) in scripts {
        std::fs::write(dir.join(file), source).expect("failed to write script");
    }
    dir
}
