//! Geochart plugins - discover chart plugins declared by scripts on disk
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │   PluginManager<L: PluginLoader>             │
//! │   scan root → one candidate per subdirectory │
//! └──────────────────────┬───────────────────────┘
//!                        │ load_plugin(dir)
//! ┌──────────────────────▼───────────────────────┐
//! │   ChartPluginLoader                          │
//! │   *.js in dir → Chart::from_script           │
//! └──────────────────────┬───────────────────────┘
//!                        │ evaluate(source)
//! ┌──────────────────────▼───────────────────────┐
//! │   ScriptRuntime (sandboxed rhai)             │
//! │   reads chart.name / chart.category          │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Failures are contained at the smallest scope: a bad script drops one
//! chart, an unreadable plugin directory drops one plugin, and an unreadable
//! root yields an empty load. Only constructing a manager over an invalid
//! root is reported to the caller.

pub mod charts;
pub mod config;
pub mod error;
pub mod plugins;
pub mod scripting;

pub use charts::{Chart, ChartPlugin, ChartPluginLoader, ChartPluginManager};
pub use config::Config;
pub use error::{Error, Result};
pub use plugins::{Plugin, PluginLoader, PluginManager};
pub use scripting::{RhaiRuntime, ScriptGlobals, ScriptLimits, ScriptRuntime};
