//! Step-sequencing engine behind the sortviz walkthroughs.
//!
//! A [`Session`] owns the sequence under sort, the run counters, the
//! narration log and the delay. Starting a run spawns a driver that turns
//! each comparison and swap into timed beats against that session.

pub mod config;
pub mod drivers;
pub mod input;
pub mod interrupt;
pub mod logging;
pub mod narrator;
pub mod scheduler;
pub mod sequence;
pub mod session;
pub mod stats;

pub use drivers::Algorithm;
pub use narrator::{LogEntry, LogKind};
pub use session::{RunHandle, RunOutcome, Session, SessionView};
