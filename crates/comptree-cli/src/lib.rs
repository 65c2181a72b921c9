//! comptree command line support
//!
//! Loads a JSON report into a component tree and renders it, either as an
//! indented outline or as per-component file and line totals.

#![warn(unreachable_pub)]

mod commands;
mod config;

// Re-exports
pub use commands::{
    collect_stats, describe, load_tree, parse_depth, render_tree, LoadedTree, StatsReport,
    StatsRow, Totals,
};
pub use config::CliConfig;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
