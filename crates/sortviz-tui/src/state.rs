//! Application state for the TUI.
//!
//! ```text
//! AppState
//! ├── view: SessionView   (latest engine snapshot, refreshed every tick)
//! ├── input: InputState   (value editor)
//! ├── committed: Vec<i64> (last values sent to the engine)
//! └── notice              (one-line transient message)
//! ```
//!
//! The engine session itself lives in the runtime; the reducer only sees
//! snapshots of it and asks for changes through effects.

use sortviz_core::SessionView;
use sortviz_core::config::Config;
use sortviz_core::input::format_values;

/// Delay change per `+`/`-` key press.
pub const DELAY_STEP_MS: u64 = 100;

/// Upper bound for the delay setting.
pub const MAX_DELAY_MS: u64 = 3_000;

/// Value editor state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub editing: bool,
    pub buffer: String,
}

impl InputState {
    pub fn begin(&mut self, current: &[i64]) {
        self.editing = true;
        self.buffer = format_values(current);
    }

    pub fn cancel(&mut self) {
        self.editing = false;
        self.buffer.clear();
    }
}

#[derive(Debug)]
pub struct AppState {
    pub view: SessionView,
    pub input: InputState,
    pub committed: Vec<i64>,
    pub notice: Option<String>,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            view: SessionView {
                delay_ms: config.delay_ms,
                ..SessionView::default()
            },
            input: InputState::default(),
            committed: config.values.clone(),
            notice: None,
            spinner_frame: 0,
            should_quit: false,
        }
    }
}
