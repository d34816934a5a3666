//! Key mapping from terminal events to input events.
//!
//! Arrow keys and vi keys both work; space and Up rotate.

use crate::types::InputEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map one key press to an input event. Releases and unbound keys map to `None`.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if is_interrupt(key) {
        return Some(InputEvent::Interrupt);
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(InputEvent::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(InputEvent::MoveRight),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(InputEvent::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char(' ') => Some(InputEvent::Rotate),

        // Control
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputEvent::Pause),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(InputEvent::ToggleDebugOverlay),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputEvent::ForceFullRedraw),

        _ => None,
    }
}

/// Ctrl-C arrives as a key while the terminal is in raw mode.
pub fn is_interrupt(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Left)),
            Some(InputEvent::MoveLeft)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Right)),
            Some(InputEvent::MoveRight)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Down)),
            Some(InputEvent::SoftDrop)
        );

        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('h'))),
            Some(InputEvent::MoveLeft)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('L'))),
            Some(InputEvent::MoveRight)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('j'))),
            Some(InputEvent::SoftDrop)
        );
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Some(InputEvent::Rotate));
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char(' '))),
            Some(InputEvent::Rotate)
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('p'))),
            Some(InputEvent::Pause)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('q'))),
            Some(InputEvent::Quit)
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('z'))),
            Some(InputEvent::ToggleDebugOverlay)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('r'))),
            Some(InputEvent::ForceFullRedraw)
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_ctrl_c_is_interrupt() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(is_interrupt(key));
        assert_eq!(map_key(key), Some(InputEvent::Interrupt));
        assert!(!is_interrupt(KeyEvent::from(KeyCode::Char('c'))));
    }

    #[test]
    fn test_release_is_ignored_but_repeat_counts() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release), None);

        let repeat = KeyEvent {
            kind: KeyEventKind::Repeat,
            ..release
        };
        assert_eq!(map_key(repeat), Some(InputEvent::MoveLeft));
    }
}
