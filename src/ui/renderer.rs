use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use crate::ui::view::{transcript_lines, ViewState};

const SIDEBAR_WIDTH: u16 = 30;
const MIN_INPUT_ROWS: u16 = 3;
const MAX_INPUT_ROWS: u16 = 8;

/// Draw one frame. Returns the largest useful scroll-back distance for the
/// transcript at the current size.
pub fn ui(f: &mut Frame, view: &ViewState, input: &TextArea<'_>) -> u16 {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(f.area());

    render_sidebar(f, view, columns[0]);

    let input_rows = (input.lines().len() as u16).clamp(MIN_INPUT_ROWS, MAX_INPUT_ROWS);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(input_rows + 2), // +2 for borders
            Constraint::Length(1),
        ])
        .split(columns[1]);

    let max_scroll = render_transcript(f, view, rows[0]);
    render_input(f, view, input, rows[1]);
    render_status(f, view, rows[2]);
    max_scroll
}

fn section_heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn key_hint(key: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:<7} "), Style::default().fg(Color::Yellow)),
        Span::raw(action.to_string()),
    ])
}

fn render_sidebar(f: &mut Frame, view: &ViewState, area: Rect) {
    let mut lines = vec![section_heading("Model"), Line::from("")];
    for (index, model) in view.models.iter().enumerate() {
        if index == view.selected_model {
            lines.push(Line::from(Span::styled(
                format!("▸ {model}"),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(format!("  {model}")));
        }
    }
    lines.push(key_hint("Ctrl+N", "next model"));
    lines.push(key_hint("Ctrl+P", "previous model"));

    lines.push(Line::from(""));
    lines.push(section_heading("Instructions"));
    for step in [
        "1. Make sure Ollama is running",
        "2. Enter your query below",
        "3. View responses in chat",
        "4. Use Reset to clear history",
    ] {
        lines.push(Line::from(step));
    }

    lines.push(Line::from(""));
    lines.push(section_heading("Stats"));
    lines.push(Line::from(vec![
        Span::raw("Messages: "),
        Span::styled(
            view.turn_count().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));

    lines.push(Line::from(""));
    lines.push(key_hint("Ctrl+L", "Reset conversation"));
    if view.can_export() {
        lines.push(key_hint("Ctrl+E", "Export conversation"));
    }
    lines.push(key_hint("Ctrl+C", "Quit"));

    let sidebar = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Settings "))
        .wrap(Wrap { trim: true });
    f.render_widget(sidebar, area);
}

fn render_transcript(f: &mut Frame, view: &ViewState, area: Rect) -> u16 {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Conversation · {} ", view.current_model()));
    let inner = block.inner(area);

    let lines = if view.transcript.is_empty() {
        vec![Line::from(Span::styled(
            "No messages yet. Type below and press Enter to send.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        transcript_lines(&view.transcript, inner.width as usize)
    };

    let total_rows = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_scroll = total_rows.saturating_sub(inner.height);
    let offset = max_scroll.saturating_sub(view.scroll_from_bottom.min(max_scroll));

    let transcript = Paragraph::new(lines).block(block).scroll((offset, 0));
    f.render_widget(transcript, area);
    max_scroll
}

/// Pulsing indicator shown while a request is outstanding.
fn busy_symbol(view: &ViewState) -> &'static str {
    let Some(since) = view.busy_since else {
        return "";
    };
    let elapsed = since.elapsed().as_millis() as f32 / 1000.0;
    let pulse_phase = (elapsed * 2.0) % 2.0;
    let pulse_intensity = if pulse_phase < 1.0 {
        pulse_phase
    } else {
        2.0 - pulse_phase
    };

    if pulse_intensity < 0.33 {
        "○"
    } else if pulse_intensity < 0.66 {
        "◐"
    } else {
        "●"
    }
}

fn render_input(f: &mut Frame, view: &ViewState, input: &TextArea<'_>, area: Rect) {
    let (title, border_style) = if view.busy_since.is_some() {
        (
            format!(" {} Thinking... ", busy_symbol(view)),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (
            " Your message (Enter to send, Alt+Enter for new line) ".to_string(),
            Style::default().fg(Color::Cyan),
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(input, inner);
}

fn render_status(f: &mut Frame, view: &ViewState, area: Rect) {
    let line = match &view.status {
        Some(status) => Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(Span::styled(
            format!("lochat v{} · {}", env!("CARGO_PKG_VERSION"), view.server),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}
