//! Error types for geochart plugin discovery

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for plugin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while discovering and loading plugins
#[derive(Debug, Error)]
pub enum Error {
    /// Plugin root is missing or not a directory
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A plugin root or plugin directory could not be listed
    #[error("failed to list {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A chart script could not be read or evaluated
    #[error("script error in {}: {message}", .path.display())]
    ScriptEvaluation { path: PathBuf, message: String },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Build a script evaluation error for `path`
    #[must_use]
    pub fn script(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::ScriptEvaluation {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
