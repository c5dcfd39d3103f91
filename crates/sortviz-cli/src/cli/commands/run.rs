//! Headless run: plays one sort and streams the narration to stdout.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use sortviz_core::input::format_values;
use sortviz_core::interrupt::{self, InterruptedError};
use sortviz_core::{Algorithm, RunOutcome, Session};

/// How often new log lines are drained while the run is in flight.
const DRAIN_INTERVAL: Duration = Duration::from_millis(20);

pub struct RunOptions<'a> {
    pub algorithm: Algorithm,
    pub values: &'a [i64],
    pub delay_ms: u64,
}

pub async fn run(opts: RunOptions<'_>) -> Result<()> {
    let session = Session::new(opts.delay_ms);
    if !session.commit_input(opts.values) {
        anyhow::bail!("No values to sort. Pass numbers with --values, e.g. --values \"5,3,8,1\"");
    }
    let handle = session
        .start(opts.algorithm)
        .context("failed to start run")?;
    let algorithm = handle.algorithm;

    let mut out = io::stdout();
    let mut printed = 0;
    let finished = handle.finished();
    tokio::pin!(finished);
    let mut ticker = tokio::time::interval(DRAIN_INTERVAL);

    let outcome = loop {
        tokio::select! {
            outcome = &mut finished => break outcome,
            () = interrupt::wait_for_interrupt() => {
                drain(&session, &mut printed, &mut out)?;
                // Replacing the sequence orphans the run at its next beat.
                session.commit_input(&session.values());
                writeln!(out, "Interrupted.")?;
                return Err(InterruptedError.into());
            }
            _ = ticker.tick() => drain(&session, &mut printed, &mut out)?,
        }
    };
    drain(&session, &mut printed, &mut out)?;

    if outcome == RunOutcome::Abandoned {
        anyhow::bail!("{algorithm} sort was abandoned");
    }

    let stats = session.stats();
    writeln!(out)?;
    writeln!(out, "Final: [ {} ]", format_values(&session.values()))?;
    writeln!(out, "Comparisons: {}", stats.comparisons)?;
    writeln!(out, "Swaps: {}", stats.swaps)?;
    out.flush()?;
    Ok(())
}

/// Prints log entries added since the last drain, oldest first.
fn drain(session: &Session, printed: &mut usize, out: &mut impl Write) -> Result<()> {
    for entry in session.log_since(*printed) {
        writeln!(out, "> {}", entry.message)?;
        *printed = entry.order + 1;
    }
    out.flush()?;
    Ok(())
}
