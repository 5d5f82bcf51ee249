//! Generic directory-based plugin system
//!
//! A plugin root holds one subdirectory per plugin. [`PluginManager`] lists
//! those subdirectories and hands each to a [`PluginLoader`], which decides
//! whether the directory holds a plugin of its domain.

pub mod discovery;
pub mod loader;
pub mod manager;

pub use discovery::candidate_dirs;
pub use loader::{Plugin, PluginLoader};
pub use manager::PluginManager;
