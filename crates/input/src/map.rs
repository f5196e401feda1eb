//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Only `Press` and `Repeat` events are mapped, so terminals that report releases
/// do not produce doubled inputs.
pub fn map_key(key: KeyEvent) -> Option<GameAction> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Quit),
            _ => None,
        };
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameAction::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameAction::SoftDrop)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(GameAction::RotateCw),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Some(GameAction::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char('v') | KeyCode::Char('V') => {
            Some(GameAction::Hold)
        }
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(GameAction::Pause),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(GameAction::Quit),

        _ => None,
    }
}

pub fn is_pause(action: Option<GameAction>) -> bool {
    action == Some(GameAction::Pause)
}

pub fn is_quit(action: Option<GameAction>) -> bool {
    action == Some(GameAction::Quit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(key(KeyCode::Left)), Some(GameAction::MoveLeft));
        assert_eq!(map_key(key(KeyCode::Right)), Some(GameAction::MoveRight));
        assert_eq!(map_key(key(KeyCode::Down)), Some(GameAction::SoftDrop));

        assert_eq!(map_key(key(KeyCode::Char('H'))), Some(GameAction::MoveLeft));
        assert_eq!(map_key(key(KeyCode::Char('d'))), Some(GameAction::MoveRight));
        assert_eq!(map_key(key(KeyCode::Char('j'))), Some(GameAction::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map_key(key(KeyCode::Up)), Some(GameAction::RotateCw));
        assert_eq!(map_key(key(KeyCode::Char('x'))), Some(GameAction::RotateCw));
        assert_eq!(map_key(key(KeyCode::Char('w'))), Some(GameAction::RotateCw));
        assert_eq!(map_key(key(KeyCode::Char('z'))), Some(GameAction::RotateCcw));
        assert_eq!(map_key(key(KeyCode::Char('Y'))), Some(GameAction::RotateCcw));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(GameAction::HardDrop));
        assert_eq!(map_key(key(KeyCode::Char('c'))), Some(GameAction::Hold));
        assert_eq!(map_key(key(KeyCode::Char('v'))), Some(GameAction::Hold));
        assert_eq!(map_key(key(KeyCode::Char('p'))), Some(GameAction::Pause));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(GameAction::Pause));
        assert!(is_pause(map_key(key(KeyCode::Esc))));
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(map_key(key(KeyCode::Char('q')))));
        assert!(is_quit(map_key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        ))));
        // Ctrl is not a hold.
        assert_ne!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameAction::Hold)
        );
        assert!(!is_quit(map_key(key(KeyCode::Char('r')))));
    }

    #[test]
    fn test_release_events_are_ignored() {
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
        assert_eq!(map_key(repeat), Some(GameAction::MoveLeft));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(map_key(key(KeyCode::Char('r'))), None);
        assert_eq!(map_key(key(KeyCode::Enter)), None);
    }
}
