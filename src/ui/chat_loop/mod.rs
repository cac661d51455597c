//! Main chat event loop
//!
//! Polls terminal input, turns keys into session actions, and redraws. While
//! a message is being answered the loop waits on that single request and only
//! redraws the busy indicator; input typed meanwhile is handled afterwards.

mod keybindings;
mod lifecycle;

use std::{
    error::Error,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use chrono::{DateTime, Local};
use ratatui::backend::Backend;
use ratatui::crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tui_textarea::TextArea;

use self::keybindings::{apply_edit, resolve_key, KeyAction};
use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use crate::core::controller::{ChatController, SessionEvent, SubmitOutcome};
use crate::core::export::write_export;
use crate::core::inference::{InferenceClient, OllamaClient};
use crate::core::message::Turn;
use crate::core::session::{ChatSession, ModelSelection};
use crate::ui::renderer::ui;
use crate::ui::view::ViewState;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const BUSY_REDRAW_INTERVAL: Duration = Duration::from_millis(100);
const MOUSE_SCROLL_ROWS: u16 = 3;

/// Settings for one interactive session.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub base_url: String,
    pub model: String,
    pub export_dir: PathBuf,
}

/// Loop-local presentation state that is not part of the session.
struct UiState {
    server: String,
    export_dir: PathBuf,
    scroll_from_bottom: u16,
    max_scroll: u16,
    status: Option<String>,
}

impl UiState {
    fn view<C: InferenceClient>(&self, controller: &ChatController<C>) -> ViewState {
        ViewState::capture(
            controller,
            &self.server,
            self.scroll_from_bottom,
            self.status.as_deref(),
        )
    }

    fn scroll_up(&mut self, rows: u16) {
        self.scroll_from_bottom = self
            .scroll_from_bottom
            .saturating_add(rows)
            .min(self.max_scroll);
    }

    fn scroll_down(&mut self, rows: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(rows);
    }
}

enum LoopControl {
    Continue,
    Quit,
}

fn new_input() -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_placeholder_text("Type your question here...");
    input
}

fn input_text(input: &TextArea<'_>) -> String {
    input.lines().join("\n")
}

fn input_is_empty(input: &TextArea<'_>) -> bool {
    input.lines().iter().all(|line| line.is_empty())
}

/// Run the interactive chat UI until the user quits.
pub async fn run_chat(options: ChatOptions) -> Result<(), Box<dyn Error>> {
    let client = OllamaClient::new(&options.base_url);
    info!(
        endpoint = client.endpoint(),
        model = options.model.as_str(),
        "Starting chat session"
    );
    let session = ChatSession::new(ModelSelection::with_default(&options.model));
    let mut controller = ChatController::new(client, session);
    let mut events = controller.subscribe();

    let mut state = UiState {
        server: options.base_url.clone(),
        export_dir: options.export_dir.clone(),
        scroll_from_bottom: 0,
        max_scroll: 0,
        status: None,
    };

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut controller, &mut events, &mut state).await;
    let restored = restore_terminal(&mut terminal);

    info!(
        turns = controller.conversation().len(),
        "Chat session ended"
    );
    result.and(restored)
}

async fn event_loop<C: InferenceClient>(
    terminal: &mut ChatTerminal,
    controller: &mut ChatController<C>,
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
    state: &mut UiState,
) -> Result<(), Box<dyn Error>> {
    let mut input = new_input();

    loop {
        while let Ok(SessionEvent::RequestRedraw) = events.try_recv() {
            // New content: follow the bottom of the transcript again.
            state.scroll_from_bottom = 0;
        }

        let view = state.view(controller);
        terminal.draw(|f| {
            state.max_scroll = ui(f, &view, &input);
        })?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = resolve_key(&key, input_is_empty(&input));
                match handle_action(action, terminal, controller, state, &mut input).await? {
                    LoopControl::Quit => return Ok(()),
                    LoopControl::Continue => {
                        if action == KeyAction::Edit {
                            apply_edit(&mut input, &key);
                        }
                    }
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => state.scroll_up(MOUSE_SCROLL_ROWS),
                MouseEventKind::ScrollDown => state.scroll_down(MOUSE_SCROLL_ROWS),
                _ => {}
            },
            Event::Paste(text) => {
                input.insert_str(text.replace('\r', ""));
            }
            _ => {}
        }
    }
}

async fn handle_action<C: InferenceClient>(
    action: KeyAction,
    terminal: &mut ChatTerminal,
    controller: &mut ChatController<C>,
    state: &mut UiState,
    input: &mut TextArea<'static>,
) -> Result<LoopControl, Box<dyn Error>> {
    match action {
        KeyAction::Quit => return Ok(LoopControl::Quit),
        KeyAction::Send => {
            let text = input_text(input);
            if text.trim().is_empty() {
                return Ok(LoopControl::Continue);
            }
            let model = controller.model().current().to_string();
            let outcome =
                submit_with_indicator(terminal, controller, state, input, &text, &model).await;
            *input = new_input();
            state.status = match outcome {
                SubmitOutcome::Failed(kind) => {
                    Some(format!("Last request failed ({})", kind.as_str()))
                }
                SubmitOutcome::Answered | SubmitOutcome::Skipped => None,
            };
        }
        KeyAction::InsertNewline => input.insert_newline(),
        KeyAction::Reset => {
            controller.reset();
            state.status = Some("Conversation cleared".to_string());
        }
        KeyAction::Export => export_conversation(controller, state),
        KeyAction::NextModel => controller.select_next_model(),
        KeyAction::PreviousModel => controller.select_previous_model(),
        KeyAction::ScrollUp(rows) => state.scroll_up(rows),
        KeyAction::ScrollDown(rows) => state.scroll_down(rows),
        KeyAction::Edit => {}
    }
    Ok(LoopControl::Continue)
}

/// Submit `text` and keep the busy indicator animated until it resolves.
///
/// A failed redraw stops the animation but never abandons the request, so the
/// exchange always records both turns.
async fn submit_with_indicator<C: InferenceClient, B: Backend>(
    terminal: &mut Terminal<B>,
    controller: &mut ChatController<C>,
    state: &UiState,
    input: &TextArea<'static>,
    text: &str,
    model: &str,
) -> SubmitOutcome {
    let busy_view = state.view(controller).busy(Instant::now());
    let submission = controller.submit(text, model);
    tokio::pin!(submission);
    let mut ticker = tokio::time::interval(BUSY_REDRAW_INTERVAL);
    let mut animating = true;

    loop {
        tokio::select! {
            outcome = &mut submission => return outcome,
            _ = ticker.tick(), if animating => {
                if let Err(err) = terminal.draw(|f| {
                    ui(f, &busy_view, input);
                }) {
                    warn!(error = %err, "Busy indicator redraw failed");
                    animating = false;
                }
            }
        }
    }
}

/// Status line text for an export request, or `None` when there is nothing
/// to export.
fn export_status(dir: &Path, turns: &[Turn], now: DateTime<Local>) -> Option<String> {
    if turns.is_empty() {
        return None;
    }
    Some(match write_export(dir, turns, now) {
        Ok(path) => format!("Exported to {}", path.display()),
        Err(err) => {
            warn!(error = %err, "Export failed");
            format!("Export error: {err}")
        }
    })
}

fn export_conversation<C: InferenceClient>(controller: &ChatController<C>, state: &mut UiState) {
    let turns = controller.conversation().all();
    if let Some(status) = export_status(&state.export_dir, turns, Local::now()) {
        state.status = Some(status);
    }
}
