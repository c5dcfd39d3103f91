//! Sort drivers.
//!
//! Each driver is an async procedure over indices into the session's
//! sequence. Awaiting a pause is the only place a driver yields; everything
//! between two pauses is one beat applied through [`Run::step`].
//!
//! Shared per-comparison protocol:
//! 1. highlight the compared positions, count the comparison, describe the
//!    step, pause for half the delay;
//! 2. if the predicate holds, count the swap, log it, mark the positions as
//!    swapping, pause for the full delay and mutate;
//! 3. clear the transient markers on the positions involved.

mod bubble;
mod insertion;
mod selection;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::session::{Run, RunError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bubble,
    Selection,
    Insertion,
}

impl Algorithm {
    pub fn all() -> &'static [Algorithm] {
        &[Algorithm::Bubble, Algorithm::Selection, Algorithm::Insertion]
    }

    /// Lowercase identifier used in config files and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
        }
    }

    pub(crate) async fn drive(self, run: &Run) -> Result<(), RunError> {
        match self {
            Algorithm::Bubble => bubble::sort(run).await,
            Algorithm::Selection => selection::sort(run).await,
            Algorithm::Insertion => insertion::sort(run).await,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Bubble => write!(f, "Bubble"),
            Algorithm::Selection => write!(f, "Selection"),
            Algorithm::Insertion => write!(f, "Insertion"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm '{0}' (expected bubble, selection or insertion)")]
pub struct ParseAlgorithmError(String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Algorithm::all()
            .iter()
            .copied()
            .find(|a| a.id() == wanted)
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}
