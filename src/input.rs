//! Keyboard mapping for the terminal host.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use flappy::host::HostInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Host(HostInput),
    Quit,
}

/// Map a key press. Releases and repeats are ignored.
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyAction::Quit);
    }

    let input = match key.code {
        KeyCode::Char(' ') => HostInput::Flap,
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => HostInput::Up,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => HostInput::Down,
        KeyCode::Enter => HostInput::Select,
        KeyCode::Esc | KeyCode::Char('p') => HostInput::Back,
        KeyCode::Char('q') => return Some(KeyAction::Quit),
        _ => return None,
    };
    Some(KeyAction::Host(input))
}
