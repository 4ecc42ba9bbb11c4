//! Key bindings: arrows plus vim-style letters.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Action from a key press. `Start` and `HardDrop` share the space bar; the
/// session decides which one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    HardDrop,
    Start,
    Pause,
    Quit,
    None,
}

/// Map a key event to an action. Space is reported as `HardDrop`; Enter as `Start`.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = key;
    if kind == KeyEventKind::Release {
        return Action::None;
    }
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Action::Quit;
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Char('q' | 'Q') => Action::Quit,
        KeyCode::Esc | KeyCode::Char('p' | 'P') => Action::Pause,
        KeyCode::Left | KeyCode::Char('h') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::MoveRight,
        KeyCode::Up | KeyCode::Char('k') => Action::RotateCw,
        KeyCode::Down | KeyCode::Char('j') => Action::RotateCcw,
        KeyCode::Char(' ') => Action::HardDrop,
        KeyCode::Enter => Action::Start,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_vim_keys_agree() {
        assert_eq!(key_to_action(key(KeyCode::Left)), Action::MoveLeft);
        assert_eq!(key_to_action(key(KeyCode::Char('h'))), Action::MoveLeft);
        assert_eq!(key_to_action(key(KeyCode::Right)), Action::MoveRight);
        assert_eq!(key_to_action(key(KeyCode::Char('l'))), Action::MoveRight);
        assert_eq!(key_to_action(key(KeyCode::Up)), Action::RotateCw);
        assert_eq!(key_to_action(key(KeyCode::Char('k'))), Action::RotateCw);
        assert_eq!(key_to_action(key(KeyCode::Down)), Action::RotateCcw);
        assert_eq!(key_to_action(key(KeyCode::Char('j'))), Action::RotateCcw);
    }

    #[test]
    fn control_keys() {
        assert_eq!(key_to_action(key(KeyCode::Char(' '))), Action::HardDrop);
        assert_eq!(key_to_action(key(KeyCode::Enter)), Action::Start);
        assert_eq!(key_to_action(key(KeyCode::Esc)), Action::Pause);
        assert_eq!(key_to_action(key(KeyCode::Char('p'))), Action::Pause);
        assert_eq!(key_to_action(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn modified_and_released_keys_are_ignored() {
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Left, KeyModifiers::ALT)),
            Action::None
        );
        let mut release = key(KeyCode::Left);
        release.kind = KeyEventKind::Release;
        assert_eq!(key_to_action(release), Action::None);
        assert_eq!(key_to_action(key(KeyCode::Char('x'))), Action::None);
    }
}
