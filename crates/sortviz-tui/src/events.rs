//! UI event types.
//!
//! All external inputs (terminal, session snapshots, timer) are converted to
//! `UiEvent` before the reducer sees them.

use crossterm::event::Event as CrosstermEvent;
use sortviz_core::SessionView;

#[derive(Debug)]
pub enum UiEvent {
    /// Frame cadence; advances the spinner and triggers a render.
    Tick,

    /// Latest copy of the engine session, taken between beats.
    Refresh(Box<SessionView>),

    /// Raw terminal input.
    Terminal(CrosstermEvent),
}
