//! Render-ready snapshot of a chat session.
//!
//! A [`ViewState`] owns everything the renderer needs, so a frame can be drawn
//! while the session itself is busy with a request.

use std::time::Instant;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::core::controller::ChatController;
use crate::core::inference::InferenceClient;
use crate::core::message::{Role, Turn};
use crate::core::text_wrapping::wrap_text;

/// Display projection of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: Role,
    pub timestamp: String,
    pub content: String,
}

impl From<&Turn> for TranscriptEntry {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role(),
            timestamp: turn.timestamp().to_string(),
            content: turn.content().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewState {
    pub transcript: Vec<TranscriptEntry>,
    pub models: Vec<String>,
    pub selected_model: usize,
    /// Rows scrolled up from the bottom of the transcript.
    pub scroll_from_bottom: u16,
    pub status: Option<String>,
    pub server: String,
    /// Set while a request is outstanding.
    pub busy_since: Option<Instant>,
}

impl ViewState {
    pub fn capture<C: InferenceClient>(
        controller: &ChatController<C>,
        server: &str,
        scroll_from_bottom: u16,
        status: Option<&str>,
    ) -> Self {
        let model = controller.model();
        Self {
            transcript: controller
                .conversation()
                .all()
                .iter()
                .map(TranscriptEntry::from)
                .collect(),
            models: model.models().to_vec(),
            selected_model: model.selected_index(),
            scroll_from_bottom,
            status: status.map(str::to_string),
            server: server.to_string(),
            busy_since: None,
        }
    }

    pub fn busy(mut self, since: Instant) -> Self {
        self.busy_since = Some(since);
        self
    }

    pub fn turn_count(&self) -> usize {
        self.transcript.len()
    }

    /// Export is only offered once there is something to export.
    pub fn can_export(&self) -> bool {
        !self.transcript.is_empty()
    }

    pub fn current_model(&self) -> &str {
        self.models
            .get(self.selected_model)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

fn header_style(role: Role) -> Style {
    let color = match role {
        Role::User => Color::Cyan,
        Role::Assistant => Color::Magenta,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn body_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Cyan),
        Role::Assistant => Style::default(),
    }
}

/// Lay the transcript out as pre-wrapped rows for a pane `width` columns wide.
/// Each turn is a header row, its content, and a blank spacer row.
pub fn transcript_lines(entries: &[TranscriptEntry], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in entries {
        let label = match entry.role {
            Role::User => "You",
            Role::Assistant => "Assistant",
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), header_style(entry.role)),
            Span::styled(
                format!("[{}]", entry.timestamp),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        for row in wrap_text(&entry.content, width) {
            lines.push(Line::from(Span::styled(row, body_style(entry.role))));
        }
        lines.push(Line::from(""));
    }
    lines
}
