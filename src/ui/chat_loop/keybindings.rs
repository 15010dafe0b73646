use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means in the chat window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLoopAction {
    Submit,
    InsertNewline,
    ScrollUp(u16),
    ScrollDown(u16),
    PageUp,
    PageDown,
    ScrollToBottom,
    ToggleMaximize,
    Quit,
    /// Anything else is an edit for the input box.
    Edit,
}

/// `multiline_input` hands Up and Down to the input box so the cursor can move
/// between its lines; otherwise they scroll the history.
pub fn classify_key(key: &KeyEvent, multiline_input: bool) -> KeyLoopAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let newline_modifier = key
        .modifiers
        .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => KeyLoopAction::Quit,
        KeyCode::Esc => KeyLoopAction::Quit,
        KeyCode::Enter if newline_modifier => KeyLoopAction::InsertNewline,
        KeyCode::Enter => KeyLoopAction::Submit,
        KeyCode::Char('j') if ctrl => KeyLoopAction::InsertNewline,
        KeyCode::Up | KeyCode::Down if multiline_input => KeyLoopAction::Edit,
        KeyCode::Up => KeyLoopAction::ScrollUp(1),
        KeyCode::Down => KeyLoopAction::ScrollDown(1),
        KeyCode::PageUp => KeyLoopAction::PageUp,
        KeyCode::PageDown => KeyLoopAction::PageDown,
        KeyCode::End if ctrl => KeyLoopAction::ScrollToBottom,
        KeyCode::F(11) => KeyLoopAction::ToggleMaximize,
        _ => KeyLoopAction::Edit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn classify_key_single(key: &KeyEvent) -> KeyLoopAction {
        classify_key(key, false)
    }

    #[test]
    fn plain_enter_submits() {
        assert_eq!(
            classify_key_single(&key(KeyCode::Enter, KeyModifiers::NONE)),
            KeyLoopAction::Submit
        );
    }

    #[test]
    fn modified_enter_inserts_newline() {
        for modifiers in [KeyModifiers::SHIFT, KeyModifiers::ALT] {
            assert_eq!(
                classify_key_single(&key(KeyCode::Enter, modifiers)),
                KeyLoopAction::InsertNewline
            );
        }
        assert_eq!(
            classify_key_single(&key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            KeyLoopAction::InsertNewline
        );
    }

    #[test]
    fn quit_keys() {
        assert_eq!(
            classify_key_single(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyLoopAction::Quit
        );
        assert_eq!(
            classify_key_single(&key(KeyCode::Esc, KeyModifiers::NONE)),
            KeyLoopAction::Quit
        );
        assert_eq!(
            classify_key_single(&key(KeyCode::Char('c'), KeyModifiers::NONE)),
            KeyLoopAction::Edit
        );
    }

    #[test]
    fn navigation_and_window_keys() {
        assert_eq!(
            classify_key_single(&key(KeyCode::Up, KeyModifiers::NONE)),
            KeyLoopAction::ScrollUp(1)
        );
        assert_eq!(
            classify_key_single(&key(KeyCode::PageDown, KeyModifiers::NONE)),
            KeyLoopAction::PageDown
        );
        assert_eq!(
            classify_key_single(&key(KeyCode::F(11), KeyModifiers::NONE)),
            KeyLoopAction::ToggleMaximize
        );
        assert_eq!(
            classify_key_single(&key(KeyCode::Left, KeyModifiers::NONE)),
            KeyLoopAction::Edit
        );
    }

    #[test]
    fn arrows_move_the_cursor_in_multiline_input() {
        for code in [KeyCode::Up, KeyCode::Down] {
            assert_eq!(
                classify_key(&key(code, KeyModifiers::NONE), true),
                KeyLoopAction::Edit
            );
        }
        assert_eq!(
            classify_key(&key(KeyCode::PageUp, KeyModifiers::NONE), true),
            KeyLoopAction::PageUp
        );
    }
}
