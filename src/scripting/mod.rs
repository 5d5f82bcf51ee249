//! Script evaluation capability
//!
//! Chart metadata is declared by small scripts. The runtime that evaluates
//! them is injected as a [`ScriptRuntime`] so loaders never reach for a global
//! engine, and every evaluation starts from a clean environment.

mod engine;

use std::path::Path;

pub use engine::{RhaiRuntime, ScriptLimits};

use crate::Result;

/// Evaluates script source in a fresh, isolated environment
pub trait ScriptRuntime: Send + Sync {
    /// Evaluate `source` and return the globals it left behind
    ///
    /// `origin` identifies the script in logs and errors.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ScriptEvaluation`] if the source fails to parse
    /// or raises during top-level evaluation
    fn evaluate(&self, origin: &Path, source: &str) -> Result<Box<dyn ScriptGlobals>>;
}

/// Read-only view of a script's global environment after evaluation
pub trait ScriptGlobals {
    /// Look up a string by dotted key (`chart.name` reads field `name` of global `chart`)
    ///
    /// Missing keys and non-string values yield `None`.
    fn string(&self, key: &str) -> Option<String>;
}
