//! Mapping from terminal key events to chat actions.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::{CursorMove, Input, Key, TextArea};

/// Rows moved per PageUp/PageDown press.
const PAGE_ROWS: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Send,
    InsertNewline,
    Reset,
    Export,
    NextModel,
    PreviousModel,
    ScrollUp(u16),
    ScrollDown(u16),
    /// Hand the key to the input box.
    Edit,
}

/// Decide what `key` does. Arrow keys scroll the transcript only while the
/// input box is empty; otherwise they move the cursor.
pub fn resolve_key(key: &KeyEvent, input_is_empty: bool) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('l') if ctrl => KeyAction::Reset,
        KeyCode::Char('e') if ctrl => KeyAction::Export,
        KeyCode::Char('n') if ctrl => KeyAction::NextModel,
        KeyCode::Char('p') if ctrl => KeyAction::PreviousModel,
        KeyCode::Enter if alt || shift => KeyAction::InsertNewline,
        KeyCode::Enter => KeyAction::Send,
        KeyCode::PageUp => KeyAction::ScrollUp(PAGE_ROWS),
        KeyCode::PageDown => KeyAction::ScrollDown(PAGE_ROWS),
        KeyCode::Up if input_is_empty => KeyAction::ScrollUp(1),
        KeyCode::Down if input_is_empty => KeyAction::ScrollDown(1),
        _ => KeyAction::Edit,
    }
}

/// Translate a crossterm key event into the text area's input type.
pub fn to_textarea_input(key: &KeyEvent) -> Input {
    let key_code = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Tab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Esc => Key::Esc,
        KeyCode::F(n) => Key::F(n),
        _ => Key::Null,
    };
    Input {
        key: key_code,
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
    }
}

/// Apply an editing key to the input box. Only plain typing, deletion and
/// cursor movement are honoured; the text area's emacs-style control
/// shortcuts are not.
pub fn apply_edit(textarea: &mut TextArea<'_>, key: &KeyEvent) {
    let plain = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    let cursor_move = match key.code {
        KeyCode::Left if plain => Some(CursorMove::Back),
        KeyCode::Right if plain => Some(CursorMove::Forward),
        KeyCode::Up if plain => Some(CursorMove::Up),
        KeyCode::Down if plain => Some(CursorMove::Down),
        KeyCode::Home if plain => Some(CursorMove::Head),
        KeyCode::End if plain => Some(CursorMove::End),
        _ => None,
    };
    match cursor_move {
        Some(movement) => textarea.move_cursor(movement),
        None => {
            textarea.input_without_shortcuts(to_textarea_input(key));
        }
    }
}
