//! Candidate discovery - list the immediate subdirectories of a plugin root

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// List plugin candidates under `root`
///
/// Returns every immediate subdirectory in directory listing order. Plain
/// files are ignored, and nested directories are never descended into.
///
/// # Errors
///
/// Returns [`Error::Discovery`] if `root` cannot be listed
pub fn candidate_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(root).map_err(|source| Error::Discovery {
        path: root.to_path_buf(),
        source,
    })?;

    let mut dirs = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(
                    path = %root.display(),
                    error = %e,
                    "failed to read plugin root entry"
                );
                continue;
            }
        };

        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }

    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(candidate_dirs(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn only_directories_are_candidates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("isotopes")).unwrap();
        std::fs::create_dir(dir.path().join("concordia")).unwrap();
        std::fs::write(dir.path().join("stray.js"), "chart.name = \"x\";").unwrap();

        let mut found = candidate_dirs(dir.path()).unwrap();
        found.sort();

        assert_eq!(
            found,
            vec![dir.path().join("concordia"), dir.path().join("isotopes")]
        );
    }

    #[test]
    fn nested_directories_are_not_candidates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("outer").join("inner")).unwrap();

        let found = candidate_dirs(dir.path()).unwrap();
        assert_eq!(found, vec![dir.path().join("outer")]);
    }

    #[test]
    fn missing_root_is_a_discovery_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");

        let err = candidate_dirs(&gone).unwrap_err();
        assert!(matches!(err, Error::Discovery { path, .. } if path == gone));
    }
}
