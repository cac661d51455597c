//! Session-scoped state: the conversation and the active model choice.

use crate::core::constants::{AVAILABLE_MODELS, DEFAULT_MODEL};
use crate::core::conversation::ConversationStore;

/// The models offered to the user and which one is active.
#[derive(Debug, Clone)]
pub struct ModelSelection {
    models: Vec<String>,
    selected: usize,
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self::with_default(DEFAULT_MODEL)
    }
}

impl ModelSelection {
    /// Build the built-in list with `model` selected. A model the list does not
    /// know about is put first so it can still be chosen; the server decides
    /// whether it exists.
    pub fn with_default(model: &str) -> Self {
        let mut models: Vec<String> = AVAILABLE_MODELS.iter().map(|m| m.to_string()).collect();
        let selected = match models.iter().position(|m| m == model) {
            Some(index) => index,
            None => {
                models.insert(0, model.to_string());
                0
            }
        };
        Self { models, selected }
    }

    pub fn current(&self) -> &str {
        &self.models[self.selected]
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.models.len();
    }

    pub fn select_previous(&mut self) {
        if self.selected == 0 {
            self.selected = self.models.len() - 1;
        } else {
            self.selected -= 1;
        }
    }
}

/// Everything that lives for exactly one chat session. Created when the UI
/// starts and dropped when it exits.
#[derive(Debug, Default)]
pub struct ChatSession {
    pub conversation: ConversationStore,
    pub model: ModelSelection,
}

impl ChatSession {
    pub fn new(model: ModelSelection) -> Self {
        Self {
            conversation: ConversationStore::new(),
            model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_is_first_builtin_model() {
        let selection = ModelSelection::default();
        assert_eq!(selection.current(), "llama3.2");
        assert_eq!(selection.selected_index(), 0);
        assert_eq!(selection.models().len(), AVAILABLE_MODELS.len());
    }

    #[test]
    fn known_model_is_selected_in_place() {
        let selection = ModelSelection::with_default("mistral");
        assert_eq!(selection.current(), "mistral");
        assert_eq!(selection.models().len(), AVAILABLE_MODELS.len());
    }

    #[test]
    fn unknown_model_is_prepended_and_selected() {
        let selection = ModelSelection::with_default("qwen2.5:7b");
        assert_eq!(selection.current(), "qwen2.5:7b");
        assert_eq!(selection.models()[0], "qwen2.5:7b");
        assert_eq!(selection.models().len(), AVAILABLE_MODELS.len() + 1);
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        let mut selection = ModelSelection::default();
        selection.select_previous();
        assert_eq!(selection.current(), "deepseek-r1");
        selection.select_next();
        assert_eq!(selection.current(), "llama3.2");
        selection.select_next();
        assert_eq!(selection.current(), "llama3");
    }

    #[test]
    fn new_session_starts_empty() {
        let session = ChatSession::new(ModelSelection::with_default("llama3"));
        assert!(session.conversation.is_empty());
        assert_eq!(session.model.current(), "llama3");
    }
}
