//! Key mapping from terminal events to game commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to a game command.
///
/// Release events are ignored so terminals that report them do not double-fire.
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Down => Some(Command::SoftDrop),

        // Rotation
        KeyCode::Up => Some(Command::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Command::RotateCcw),

        // Drops
        KeyCode::Char(' ') => Some(Command::HardDrop),

        // Lifecycle
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::PauseToggle),
        KeyCode::Enter => Some(Command::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Left)),
            Some(Command::MoveLeft)
        );
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Right)),
            Some(Command::MoveRight)
        );
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Down)),
            Some(Command::SoftDrop)
        );
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Up)),
            Some(Command::RotateCw)
        );
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Char('z'))),
            Some(Command::RotateCcw)
        );
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Char('Z'))),
            Some(Command::RotateCcw)
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Char(' '))),
            Some(Command::HardDrop)
        );
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Char('p'))),
            Some(Command::PauseToggle)
        );
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Enter)),
            Some(Command::Start)
        );
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Char('R'))),
            Some(Command::Reset)
        );
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(command_for_key(KeyEvent::from(KeyCode::Char('c'))), None);
        assert_eq!(command_for_key(KeyEvent::from(KeyCode::Tab)), None);
        assert_eq!(command_for_key(KeyEvent::from(KeyCode::Char('q'))), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(command_for_key(release), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Char('Q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Esc)));
    }
}
