//! Session: the context object every driver and front end goes through.
//!
//! A session owns the sequence, counters, log and delay, plus two pieces of
//! run bookkeeping:
//!
//! - a **generation**, bumped on every `commit_input`. A run captures the
//!   generation it started under and re-checks it before every beat, so a run
//!   whose sequence has been replaced stops without touching anything.
//! - the **active run slot**. `start` is ignored while a run holds it.
//!
//! All shared state sits behind one mutex. A beat's mutations happen under a
//! single lock acquisition and the lock is never held across a pause, so
//! readers (`view`, `values`, ...) only ever see completed beats.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use crate::drivers::Algorithm;
use crate::narrator::{LogEntry, LogKind, Narrator};
use crate::scheduler::{Beat, Delay, Scheduler};
use crate::sequence::{Element, Sequence};
use crate::stats::RunStats;

/// Identifier of one started run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub u64);

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// The sequence was replaced while the run was in flight.
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum RunError {
    #[error("run abandoned: sequence was replaced")]
    Abandoned,
}

/// State drivers read and mutate during a beat.
#[derive(Debug, Default)]
pub(crate) struct Board {
    pub(crate) sequence: Sequence,
    pub(crate) stats: RunStats,
    pub(crate) log: Narrator,
    /// What the current beat is doing, e.g. "Comparing 5 and 3".
    pub(crate) step: String,
    /// Values as of the last completed pass.
    pub(crate) snapshot: String,
}

impl Board {
    fn new(values: &[i64]) -> Self {
        let sequence = Sequence::new(values);
        let snapshot = sequence.snapshot_label();
        let mut log = Narrator::default();
        log.log("New array set. Ready to start.", LogKind::Plain);
        Self {
            sequence,
            stats: RunStats::default(),
            log,
            step: String::new(),
            snapshot,
        }
    }

    fn begin(&mut self, algorithm: Algorithm) {
        self.stats.reset();
        self.sequence.reset_markers();
        self.step.clear();
        self.log
            .log(format!("Starting {algorithm} Sort..."), LogKind::Pass);
    }

    pub(crate) fn refresh_snapshot(&mut self) {
        self.snapshot = self.sequence.snapshot_label();
    }
}

#[derive(Debug, Default)]
struct SessionState {
    board: Board,
    generation: u64,
    active: Option<RunId>,
    next_run: u64,
}

impl SessionState {
    fn finish_if_active(&mut self, id: RunId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }
}

fn lock(shared: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Read-only copy of everything a front end renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub elements: Vec<Element>,
    pub stats: RunStats,
    /// Newest first.
    pub log: Vec<LogEntry>,
    pub step: String,
    pub snapshot: String,
    pub pass_label: String,
    pub progress_label: String,
    pub delay_ms: u64,
    pub running: bool,
    pub generation: u64,
}

impl SessionView {
    pub fn values(&self) -> Vec<i64> {
        self.elements.iter().map(|e| e.value).collect()
    }
}

/// Shared handle to one visualizer session. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct Session {
    shared: Arc<Mutex<SessionState>>,
    scheduler: Scheduler,
}

impl Session {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            shared: Arc::default(),
            scheduler: Scheduler::new(Delay::new(delay_ms)),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        lock(&self.shared)
    }

    /// Replaces the sequence, resets counters and clears the log.
    ///
    /// Any in-flight run is orphaned: it will notice the new generation on
    /// its next beat and stop. Returns `false` (and changes nothing) when
    /// `values` is empty.
    pub fn commit_input(&self, values: &[i64]) -> bool {
        if values.is_empty() {
            tracing::debug!("ignoring empty input commit");
            return false;
        }
        let mut state = self.state();
        state.generation += 1;
        if let Some(RunId(id)) = state.active.take() {
            tracing::info!(run = id, "abandoning run on new input");
        }
        state.board = Board::new(values);
        tracing::info!(
            generation = state.generation,
            len = values.len(),
            "input committed"
        );
        true
    }

    pub fn set_delay(&self, ms: u64) {
        tracing::debug!(delay_ms = ms, "delay changed");
        self.scheduler.delay().set(ms);
    }

    pub fn delay(&self) -> u64 {
        self.scheduler.delay().get()
    }

    /// Starts `algorithm` against the current sequence.
    ///
    /// Returns `None` when a run is already active or nothing has been
    /// committed yet. Must be called from within a tokio runtime.
    pub fn start(&self, algorithm: Algorithm) -> Option<RunHandle> {
        let run = {
            let mut state = self.state();
            if let Some(RunId(active)) = state.active {
                tracing::debug!(active, %algorithm, "start ignored: run in progress");
                return None;
            }
            if state.board.sequence.is_empty() {
                tracing::debug!(%algorithm, "start ignored: no input committed");
                return None;
            }
            let id = RunId(state.next_run);
            state.next_run = state.next_run.wrapping_add(1);
            state.active = Some(id);
            state.board.begin(algorithm);
            tracing::info!(run = id.0, generation = state.generation, %algorithm, "run started");
            Run {
                shared: Arc::clone(&self.shared),
                scheduler: self.scheduler.clone(),
                generation: state.generation,
                id,
            }
        };

        let id = run.id;
        let join = tokio::spawn(async move { run.execute(algorithm).await });
        Some(RunHandle {
            id,
            algorithm,
            join,
        })
    }

    pub fn is_running(&self) -> bool {
        self.state().active.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    pub fn values(&self) -> Vec<i64> {
        self.state().board.sequence.snapshot()
    }

    pub fn stats(&self) -> RunStats {
        self.state().board.stats
    }

    /// Full log, oldest first.
    pub fn log_entries(&self) -> Vec<LogEntry> {
        self.state().board.log.entries().to_vec()
    }

    /// Log entries with `order >= from`, oldest first.
    pub fn log_since(&self, from: usize) -> Vec<LogEntry> {
        self.state().board.log.since(from).to_vec()
    }

    pub fn view(&self) -> SessionView {
        let delay_ms = self.delay();
        let state = self.state();
        let board = &state.board;
        SessionView {
            elements: board.sequence.elements().to_vec(),
            stats: board.stats,
            log: board.log.newest_first().cloned().collect(),
            step: board.step.clone(),
            snapshot: board.snapshot.clone(),
            pass_label: board.stats.pass_label(),
            progress_label: board.stats.progress_label(),
            delay_ms,
            running: state.active.is_some(),
            generation: state.generation,
        }
    }
}

/// Handle to a spawned run.
#[derive(Debug)]
pub struct RunHandle {
    pub id: RunId,
    pub algorithm: Algorithm,
    join: JoinHandle<RunOutcome>,
}

impl RunHandle {
    /// Waits for the run to end.
    ///
    /// A panicking driver is a broken precondition; the panic is re-raised.
    pub async fn finished(self) -> RunOutcome {
        match self.join.await {
            Ok(outcome) => outcome,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => RunOutcome::Abandoned,
        }
    }
}

/// Write handle a driver holds for the duration of one run.
///
/// Every mutation goes through [`Run::step`], which refuses to touch the board
/// once the session has moved to a newer generation.
#[derive(Debug)]
pub(crate) struct Run {
    shared: Arc<Mutex<SessionState>>,
    scheduler: Scheduler,
    generation: u64,
    id: RunId,
}

impl Run {
    /// Applies one beat's worth of changes atomically.
    pub(crate) fn step<T>(&self, f: impl FnOnce(&mut Board) -> T) -> Result<T, RunError> {
        let mut state = lock(&self.shared);
        if state.generation != self.generation {
            return Err(RunError::Abandoned);
        }
        Ok(f(&mut state.board))
    }

    pub(crate) fn len(&self) -> Result<usize, RunError> {
        self.step(|board| board.sequence.len())
    }

    /// Pause after a comparison highlight (half the delay).
    pub(crate) async fn half(&self) {
        self.scheduler.beat(Beat::Compare).await;
    }

    /// Pause around a mutation (the full delay).
    pub(crate) async fn full(&self) {
        self.scheduler.beat(Beat::Swap).await;
    }

    async fn execute(self, algorithm: Algorithm) -> RunOutcome {
        let result = match algorithm.drive(&self).await {
            Ok(()) => self.complete(algorithm),
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                tracing::info!(run = self.id.0, %algorithm, "run completed");
                RunOutcome::Completed
            }
            Err(RunError::Abandoned) => {
                lock(&self.shared).finish_if_active(self.id);
                tracing::info!(run = self.id.0, %algorithm, "run abandoned");
                RunOutcome::Abandoned
            }
        }
    }

    fn complete(&self, algorithm: Algorithm) -> Result<(), RunError> {
        let mut state = lock(&self.shared);
        if state.generation != self.generation {
            return Err(RunError::Abandoned);
        }
        state.board.sequence.clear_transient();
        state
            .board
            .log
            .log(format!("{algorithm} Sort Complete!"), LogKind::Pass);
        state.finish_if_active(self.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_commit_resets_log_and_bumps_generation() {
        let session = Session::new(0);
        assert!(session.commit_input(&[3, 1, 2]));
        assert!(session.commit_input(&[9, 8]));

        assert_eq!(session.generation(), 2);
        assert_eq!(session.values(), vec![9, 8]);
        let log = session.log_entries();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].message, "New array set. Ready to start.");
        assert_eq!(session.stats(), RunStats::default());
    }

    #[test]
    fn test_empty_commit_changes_nothing() {
        let session = Session::new(0);
        assert!(session.commit_input(&[4, 2]));
        assert!(!session.commit_input(&[]));
        assert_eq!(session.values(), vec![4, 2]);
        assert_eq!(session.generation(), 1);
    }

    #[tokio::test]
    async fn test_start_without_input_is_ignored() {
        let session = Session::new(0);
        assert!(session.start(Algorithm::Bubble).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_is_ignored_while_running() {
        let session = Session::new(100);
        session.commit_input(&[4, 3, 2, 1]);

        let first = session.start(Algorithm::Bubble).expect("first run starts");
        assert!(session.start(Algorithm::Selection).is_none());
        assert!(session.is_running());

        assert_eq!(first.finished().await, RunOutcome::Completed);
        assert!(!session.is_running());
        assert_eq!(session.values(), vec![1, 2, 3, 4]);

        let starts = session
            .log_entries()
            .iter()
            .filter(|e| e.message.starts_with("Starting"))
            .count();
        assert_eq!(starts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_mid_run_abandons_old_run() {
        let session = Session::new(100);
        session.commit_input(&[5, 3, 8, 1]);
        let handle = session.start(Algorithm::Bubble).expect("run starts");

        // Land somewhere inside the first swap beat.
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(session.stats().comparisons >= 1);

        session.commit_input(&[9, 7]);
        assert!(!session.is_running());

        assert_eq!(handle.finished().await, RunOutcome::Abandoned);
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(session.values(), vec![9, 7]);
        assert_eq!(session.stats(), RunStats::default());
        let log = session.log_entries();
        assert_eq!(log.len(), 1);
        assert!(
            session
                .view()
                .elements
                .iter()
                .all(|e| !e.comparing && !e.swapping && !e.settled)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_run_after_abandon_is_not_disturbed_by_stale_run() {
        let session = Session::new(100);
        session.commit_input(&[5, 3, 8, 1]);
        let stale = session.start(Algorithm::Bubble).expect("run starts");
        tokio::time::sleep(Duration::from_millis(60)).await;

        session.commit_input(&[3, 2, 1]);
        let fresh = session.start(Algorithm::Insertion).expect("fresh run starts");

        assert_eq!(stale.finished().await, RunOutcome::Abandoned);
        assert!(session.is_running());
        assert_eq!(fresh.finished().await, RunOutcome::Completed);
        assert_eq!(session.values(), vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_completion_reruns_on_current_values() {
        let session = Session::new(0);
        session.commit_input(&[2, 1]);
        let first = session.start(Algorithm::Selection).expect("starts");
        assert_eq!(first.finished().await, RunOutcome::Completed);

        let again = session.start(Algorithm::Bubble).expect("restarts");
        assert_eq!(again.finished().await, RunOutcome::Completed);
        assert_eq!(session.stats().swaps, 0);
        assert_eq!(session.stats().comparisons, 1);
        assert_eq!(session.values(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_reports_labels_and_running_flag() {
        let session = Session::new(40);
        session.commit_input(&[2, 1]);
        let handle = session.start(Algorithm::Bubble).expect("starts");

        let during = session.view();
        assert!(during.running);
        assert_eq!(during.delay_ms, 40);
        assert_eq!(during.log[0].message, "Starting Bubble Sort...");

        handle.finished().await;
        let after = session.view();
        assert!(!after.running);
        assert_eq!(after.values(), vec![1, 2]);
        assert_eq!(after.progress_label, "Progress: 100%");
        assert_eq!(after.pass_label, "Pass: 2");
        assert_eq!(after.snapshot, "[ 1, 2 ]");
        assert_eq!(after.log[0].message, "Bubble Sort Complete!");
    }
}
