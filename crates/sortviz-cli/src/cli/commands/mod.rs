//! CLI command handlers.

pub mod config;
pub mod run;
#[cfg(feature = "tui")]
pub mod visualize;
