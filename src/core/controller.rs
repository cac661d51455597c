//! Drives one chat session: input in, turns out, render requests to the UI.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::conversation::ConversationStore;
use crate::core::inference::{ErrorKind, InferenceClient};
use crate::core::message::Turn;
use crate::core::session::{ChatSession, ModelSelection};

/// Notifications sent to whoever renders the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    RequestRedraw,
}

/// What a call to [`ChatController::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank; nothing was sent or recorded.
    Skipped,
    /// The server replied and the reply was recorded.
    Answered,
    /// The exchange failed; the error text was recorded as the reply.
    Failed(ErrorKind),
}

pub struct ChatController<C> {
    client: C,
    session: ChatSession,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl<C: InferenceClient> ChatController<C> {
    pub fn new(client: C, session: ChatSession) -> Self {
        Self {
            client,
            session,
            events: None,
        }
    }

    /// Register for render requests. A later call replaces the earlier
    /// subscriber.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    pub fn conversation(&self) -> &ConversationStore {
        &self.session.conversation
    }

    pub fn model(&self) -> &ModelSelection {
        &self.session.model
    }

    /// Send `user_text` to `model` and record both sides of the exchange.
    ///
    /// Blank input is ignored. Otherwise exactly two turns are appended, user
    /// then assistant, whether or not the server answered; a failure is
    /// recorded as the assistant's content. One render request follows the
    /// second append.
    pub async fn submit(&mut self, user_text: &str, model: &str) -> SubmitOutcome {
        if user_text.trim().is_empty() {
            debug!("Ignoring blank submission");
            return SubmitOutcome::Skipped;
        }

        self.session.conversation.append(Turn::user(user_text));

        let (content, outcome) = match self.client.generate(user_text, model).await {
            Ok(text) => (text, SubmitOutcome::Answered),
            Err(err) => {
                let kind = err.kind();
                (err.to_string(), SubmitOutcome::Failed(kind))
            }
        };

        self.session.conversation.append(Turn::assistant(content));
        info!(
            model,
            turns = self.session.conversation.len(),
            outcome = ?outcome,
            "Exchange recorded"
        );
        self.request_render();
        outcome
    }

    /// Drop every turn. Calling it on an empty conversation is harmless.
    pub fn reset(&mut self) {
        let dropped = self.session.conversation.len();
        self.session.conversation.clear();
        info!(dropped, "Conversation reset");
        self.request_render();
    }

    pub fn select_next_model(&mut self) {
        self.session.model.select_next();
        self.model_changed();
    }

    pub fn select_previous_model(&mut self) {
        self.session.model.select_previous();
        self.model_changed();
    }

    fn model_changed(&self) {
        debug!(model = self.session.model.current(), "Model selection changed");
        self.request_render();
    }

    fn request_render(&self) {
        if let Some(tx) = &self.events {
            // The UI may already be gone during shutdown.
            let _ = tx.send(SessionEvent::RequestRedraw);
        }
    }
}
