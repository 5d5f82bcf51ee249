//! Chart metadata from script files

use std::path::Path;

use super::Chart;
use crate::scripting::{RhaiRuntime, ScriptLimits, ScriptRuntime};
use crate::{Error, Result};

/// File name suffix marking a chart script (case-sensitive)
pub const SCRIPT_SUFFIX: &str = ".js";

/// Global object chart scripts assign their metadata to
pub const CHART_OBJECT: &str = "chart";

/// Key holding the chart display name
pub const NAME_KEY: &str = "chart.name";

/// Key holding the chart category
pub const CATEGORY_KEY: &str = "chart.category";

/// Whether `path` names a chart script
///
/// A literal suffix match on the file name: `a.js` matches, `a.JS` and
/// `a.notjs` do not.
#[must_use]
pub fn is_chart_script(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(SCRIPT_SUFFIX))
}

/// Runtime suited to chart scripts: `chart` is pre-bound to an empty object
#[must_use]
pub fn chart_runtime(limits: ScriptLimits) -> RhaiRuntime {
    RhaiRuntime::new(limits).with_object(CHART_OBJECT)
}

impl Chart {
    /// Evaluate a chart script and read its metadata
    ///
    /// The script runs once in a fresh environment. A missing or non-string
    /// `chart.name` / `chart.category` is recorded as absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScriptEvaluation`] if the file cannot be read or the
    /// script fails to evaluate
    pub fn from_script(path: &Path, runtime: &dyn ScriptRuntime) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::script(path, e))?;
        let globals = runtime.evaluate(path, &source)?;

        Ok(Self::new(
            globals.string(NAME_KEY),
            globals.string(CATEGORY_KEY),
            path,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_script(dir: &Path, name: &str, source: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, source).unwrap();
        path
    }

    #[test]
    fn suffix_match_is_literal() {
        assert!(is_chart_script(Path::new("plugins/a/chart.js")));
        assert!(is_chart_script(Path::new("chart.min.js")));
        assert!(!is_chart_script(Path::new("chart.JS")));
        assert!(!is_chart_script(Path::new("chart.notjs")));
        assert!(!is_chart_script(Path::new("chart.json")));
        assert!(!is_chart_script(Path::new("chart.js.bak")));
    }

    #[test]
    fn name_and_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(
            dir.path(),
            "a.js",
            r#"chart.name = "Test #1"; chart.category = "Test";"#,
        );

        let chart = Chart::from_script(&path, &chart_runtime(ScriptLimits::default())).unwrap();
        assert_eq!(chart.name(), Some("Test #1"));
        assert_eq!(chart.category(), Some("Test"));
        assert_eq!(chart.source(), path);
    }

    #[test]
    fn name_without_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(dir.path(), "b.js", r#"chart.name = "Test #2";"#);

        let chart = Chart::from_script(&path, &chart_runtime(ScriptLimits::default())).unwrap();
        assert_eq!(chart.name(), Some("Test #2"));
        assert!(chart.category().is_none());
    }

    #[test]
    fn script_without_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(dir.path(), "empty.js", "let x = 1 + 2;");

        let chart = Chart::from_script(&path, &chart_runtime(ScriptLimits::default())).unwrap();
        assert!(chart.name().is_none());
        assert!(chart.category().is_none());
    }

    #[test]
    fn unreadable_file_is_a_script_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.js");

        let err = Chart::from_script(&missing, &chart_runtime(ScriptLimits::default()))
            .unwrap_err();
        assert!(matches!(err, Error::ScriptEvaluation { path, .. } if path == missing));
    }

    #[test]
    fn invalid_script_is_a_script_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(dir.path(), "bad.js", "chart.name = \"unterminated;");

        let err = Chart::from_script(&path, &chart_runtime(ScriptLimits::default()))
            .unwrap_err();
        assert!(matches!(err, Error::ScriptEvaluation { .. }));
    }
}
