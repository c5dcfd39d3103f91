//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! Everything that touches the engine session or the config file is an
//! effect; the reducer itself only mutates `AppState`.

use sortviz_core::Algorithm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Replace the session's sequence (abandons any run in flight).
    CommitInput { values: Vec<i64> },

    /// Start a sort against the current sequence.
    StartSort { algorithm: Algorithm },

    /// Change the delay used by subsequent pauses.
    SetDelay { ms: u64 },

    /// Persist the delay preference to config.
    PersistDelay { ms: u64 },
}
