//! UI events - messages from UI layer to the shell actor

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // Navigation bar
    /// Click the n-th displayed navigation button (bottom first)
    ClickButton(usize),
    /// Click the top navigation button unless it is the quit button
    Back,

    // Page input
    Char(char),
    Backspace,
    NextField,
    PrevField,
    Up,
    Down,
    Submit,

    // Quit confirmation
    ConfirmQuit,
    CancelQuit,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, show_quit_confirm: bool) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(UiEvent::Quit),
            _ => None,
        };
    }

    if show_quit_confirm {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('o') | KeyCode::Enter => Some(UiEvent::ConfirmQuit),
            KeyCode::Char('n') | KeyCode::Esc => Some(UiEvent::CancelQuit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::F(n @ 1..=9) => Some(UiEvent::ClickButton(usize::from(n - 1))),
        KeyCode::Esc => Some(UiEvent::Back),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Up => Some(UiEvent::Up),
        KeyCode::Down => Some(UiEvent::Down),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::Char(c)),
        _ => None,
    }
}
