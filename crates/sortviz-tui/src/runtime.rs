//! TUI runtime: owns the terminal and the engine session, runs the event
//! loop, and executes effects returned by the reducer.

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use sortviz_core::config::Config;
use sortviz_core::{RunOutcome, Session, interrupt};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Frame cadence while a run is animating.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll cadence when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    session: Session,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Takes over the terminal. Must be called from within a tokio runtime.
    pub fn new(session: Session, config: &Config) -> Result<Self> {
        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });
        interrupt::reset();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let mut state = AppState::new(config);
        state.view = session.view();

        Ok(Self {
            terminal,
            state,
            session,
            last_tick: Instant::now(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            if interrupt::is_interrupted() {
                self.state.should_quit = true;
                break;
            }

            let events = self.collect_events()?;
            dirty |= !events.is_empty();
            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let view = self.session.view();
        if view != self.state.view {
            events.push(UiEvent::Refresh(Box::new(view)));
        }

        let tick_interval = if self.state.view.running {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::CommitInput { values } => {
                if !self.session.commit_input(&values) {
                    self.state.notice = Some("No values to commit".to_string());
                }
            }
            UiEffect::StartSort { algorithm } => {
                let Some(handle) = self.session.start(algorithm) else {
                    self.state.notice = Some("Nothing to sort".to_string());
                    return;
                };
                tokio::spawn(async move {
                    let (id, algorithm) = (handle.id.0, handle.algorithm);
                    match handle.finished().await {
                        RunOutcome::Completed => {
                            tracing::debug!(run = id, %algorithm, "ui run completed");
                        }
                        RunOutcome::Abandoned => {
                            tracing::debug!(run = id, %algorithm, "ui run abandoned");
                        }
                    }
                });
            }
            UiEffect::SetDelay { ms } => {
                self.session.set_delay(ms);
            }
            UiEffect::PersistDelay { ms } => {
                if let Err(e) = Config::save_delay(ms) {
                    tracing::warn!(error = %format!("{e:#}"), "failed to persist delay");
                    self.state.notice = Some(format!("Could not save delay: {e}"));
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
