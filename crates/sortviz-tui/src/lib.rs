//! Full-screen TUI for sortviz.

pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;
use sortviz_core::Session;
use sortviz_core::config::Config;

/// Runs the interactive visualizer until the user quits.
///
/// `session` should already hold the initial values.
pub async fn run(session: Session, config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The visualizer requires a terminal.\n\
             Use `sortviz run --values '...'` for non-interactive output."
        );
    }

    let mut runtime = TuiRuntime::new(session, config)?;
    runtime.run()
}
