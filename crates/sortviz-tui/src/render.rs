//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, List, ListItem, Paragraph};
use sortviz_core::LogKind;
use sortviz_core::sequence::{BAR_HEIGHT_SPAN, Element, MIN_BAR_HEIGHT};

use crate::state::AppState;

/// Spinner frames shown while a run is active.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Rows reserved for the narration log, borders included.
const LOG_HEIGHT: u16 = 10;

const MAX_BAR_WIDTH: u16 = 9;

const HELP: &str =
    "b/s/i: bubble/selection/insertion  +/-: speed  e: edit  r: reset  q: quit";

pub fn render(app: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),          // header
            Constraint::Min(8),             // bars
            Constraint::Length(1),          // counters
            Constraint::Length(1),          // progress
            Constraint::Length(1),          // step
            Constraint::Length(1),          // snapshot
            Constraint::Length(3),          // input
            Constraint::Length(LOG_HEIGHT), // log
            Constraint::Length(1),          // help / notice
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    render_bars(app, frame, chunks[1]);
    render_counters(app, frame, chunks[2]);
    render_progress(app, frame, chunks[3]);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Step: ", Style::default().fg(Color::DarkGray)),
            Span::raw(app.view.step.as_str()),
        ])),
        chunks[4],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Array: ", Style::default().fg(Color::DarkGray)),
            Span::raw(app.view.snapshot.as_str()),
        ])),
        chunks[5],
    );
    render_input(app, frame, chunks[6]);
    render_log(app, frame, chunks[7]);
    render_footer(app, frame, chunks[8]);
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let status = if app.view.running {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        Span::styled(format!("{spinner} sorting"), Style::default().fg(Color::Yellow))
    } else {
        Span::styled("idle", Style::default().fg(Color::DarkGray))
    };
    let line = Line::from(vec![
        Span::styled(
            "sortviz",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        status,
        Span::raw(format!("  delay {}ms", app.view.delay_ms)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_bars(app: &AppState, frame: &mut Frame, area: Rect) {
    let elements = &app.view.elements;
    let block = Block::default().borders(Borders::ALL).title(" Array ");
    if elements.is_empty() {
        frame.render_widget(
            Paragraph::new("No values. Press e to enter some.").block(block),
            area,
        );
        return;
    }

    let bars: Vec<Bar> = elements
        .iter()
        .map(|element| {
            Bar::default()
                .value(u64::from(element.height))
                .text_value(element.value.to_string())
                .style(bar_style(element))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area.width.saturating_sub(2), elements.len()))
        .bar_gap(1)
        .max(u64::from(MIN_BAR_HEIGHT + BAR_HEIGHT_SPAN));
    frame.render_widget(chart, area);
}

/// Swapping wins over comparing, comparing over settled.
pub(crate) fn bar_style(element: &Element) -> Style {
    let color = if element.swapping {
        Color::Red
    } else if element.comparing {
        Color::Yellow
    } else if element.settled {
        Color::Green
    } else {
        Color::Blue
    };
    Style::default().fg(color)
}

pub(crate) fn bar_width(inner_width: u16, count: usize) -> u16 {
    let count = u16::try_from(count).unwrap_or(u16::MAX).max(1);
    (inner_width / count)
        .saturating_sub(1)
        .clamp(1, MAX_BAR_WIDTH)
}

fn render_counters(app: &AppState, frame: &mut Frame, area: Rect) {
    let stats = &app.view.stats;
    let line = Line::from(vec![
        Span::raw(format!("Comparisons: {}", stats.comparisons)),
        Span::raw("   "),
        Span::raw(format!("Swaps: {}", stats.swaps)),
        Span::raw("   "),
        Span::raw(app.view.pass_label.as_str()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_progress(app: &AppState, frame: &mut Frame, area: Rect) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .percent(u16::from(app.view.stats.progress_percent.min(100)))
        .label(app.view.progress_label.as_str());
    frame.render_widget(gauge, area);
}

fn render_input(app: &AppState, frame: &mut Frame, area: Rect) {
    let (title, text, style) = if app.input.editing {
        (
            " Values (Enter to apply, Esc to cancel) ",
            format!("{}▏", app.input.buffer),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (
            " Values ",
            sortviz_core::input::format_values(&app.committed),
            Style::default().fg(Color::DarkGray),
        )
    };
    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(title),
    );
    frame.render_widget(paragraph, area);
}

fn render_log(app: &AppState, frame: &mut Frame, area: Rect) {
    let visible = usize::from(area.height.saturating_sub(2));
    // View log is already newest first.
    let items: Vec<ListItem> = app
        .view
        .log
        .iter()
        .take(visible)
        .map(|entry| ListItem::new(Line::styled(format!("> {}", entry.message), log_style(entry.kind))))
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Log "));
    frame.render_widget(list, area);
}

fn log_style(kind: LogKind) -> Style {
    match kind {
        LogKind::Plain => Style::default(),
        LogKind::Pass => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        LogKind::Swap => Style::default().fg(Color::Red),
    }
}

fn render_footer(app: &AppState, frame: &mut Frame, area: Rect) {
    let line = match &app.notice {
        Some(notice) => Line::styled(notice.as_str(), Style::default().fg(Color::Yellow)),
        None => Line::styled(HELP, Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use sortviz_core::Session;
    use sortviz_core::config::Config;

    use super::*;

    fn element(settled: bool, comparing: bool, swapping: bool) -> Element {
        Element {
            value: 1,
            height: 50,
            settled,
            comparing,
            swapping,
        }
    }

    #[test]
    fn test_bar_style_precedence() {
        assert_eq!(bar_style(&element(true, true, true)).fg, Some(Color::Red));
        assert_eq!(bar_style(&element(true, true, false)).fg, Some(Color::Yellow));
        assert_eq!(bar_style(&element(true, false, false)).fg, Some(Color::Green));
        assert_eq!(bar_style(&element(false, false, false)).fg, Some(Color::Blue));
    }

    #[test]
    fn test_bar_width_fits_area() {
        assert_eq!(bar_width(80, 6), MAX_BAR_WIDTH);
        assert_eq!(bar_width(40, 10), 3);
        assert_eq!(bar_width(10, 50), 1);
        assert_eq!(bar_width(10, 0), MAX_BAR_WIDTH);
    }

    #[test]
    fn test_render_shows_labels_and_log() {
        let session = Session::new(100);
        assert!(session.commit_input(&[5, 3, 8, 1]));

        let mut app = AppState::new(&Config::default());
        app.view = session.view();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal
            .draw(|frame| render(&app, frame))
            .expect("draw");

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Pass: 0"));
        assert!(text.contains("Progress: 0%"));
        assert!(text.contains("> New array set. Ready to start."));
        assert!(text.contains("[ 5, 3, 8, 1 ]"));
    }
}
