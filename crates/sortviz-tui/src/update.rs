//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sortviz_core::Algorithm;
use sortviz_core::input::parse_values;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, DELAY_STEP_MS, MAX_DELAY_MS};

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Refresh(view) => {
            app.view = *view;
            vec![]
        }
        UiEvent::Terminal(Event::Key(key)) if key.kind != KeyEventKind::Release => {
            handle_key(app, key)
        }
        UiEvent::Terminal(_) => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }
    if app.input.editing {
        return handle_edit_key(app, key);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('b') => start(app, Algorithm::Bubble),
        KeyCode::Char('s') => start(app, Algorithm::Selection),
        KeyCode::Char('i') => start(app, Algorithm::Insertion),
        KeyCode::Char('+' | '=') => change_delay(app, Speed::Faster),
        KeyCode::Char('-' | '_') => change_delay(app, Speed::Slower),
        KeyCode::Char('e') => {
            app.input.begin(&app.committed);
            app.notice = None;
            vec![]
        }
        KeyCode::Char('r') => {
            app.notice = Some("Input reset".to_string());
            vec![UiEffect::CommitInput {
                values: app.committed.clone(),
            }]
        }
        _ => vec![],
    }
}

fn handle_edit_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            app.input.cancel();
            vec![]
        }
        KeyCode::Enter => {
            let values = parse_values(&app.input.buffer);
            if values.is_empty() {
                app.notice = Some("No valid numbers in input".to_string());
                return vec![];
            }
            app.input.cancel();
            app.committed.clone_from(&values);
            app.notice = None;
            vec![UiEffect::CommitInput { values }]
        }
        KeyCode::Backspace => {
            app.input.buffer.pop();
            vec![]
        }
        KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, ',' | ' ' | '-' | '+') => {
            app.input.buffer.push(c);
            vec![]
        }
        _ => vec![],
    }
}

fn start(app: &mut AppState, algorithm: Algorithm) -> Vec<UiEffect> {
    if app.view.running {
        app.notice = Some("A sort is already running".to_string());
        return vec![];
    }
    app.notice = None;
    vec![UiEffect::StartSort { algorithm }]
}

#[derive(Debug, Clone, Copy)]
enum Speed {
    Faster,
    Slower,
}

fn change_delay(app: &mut AppState, speed: Speed) -> Vec<UiEffect> {
    let current = app.view.delay_ms;
    let next = match speed {
        Speed::Faster => current.saturating_sub(DELAY_STEP_MS),
        Speed::Slower => current.saturating_add(DELAY_STEP_MS).min(MAX_DELAY_MS),
    };
    if next == current {
        return vec![];
    }
    app.view.delay_ms = next;
    vec![
        UiEffect::SetDelay { ms: next },
        UiEffect::PersistDelay { ms: next },
    ]
}
