//! Keyboard mapping
//!
//! Arrow keys and vi keys move; `y`/`n` double as answers while prompting.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Action, GameState};

/// Translate a key event into an action for the current mode
pub fn action_for_key(key: KeyEvent, state: GameState) -> Option<Action> {
    // Only handle key press events, not releases
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global quit shortcut
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match state {
        GameState::Running => running_action(key.code),
        GameState::Prompt => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Confirm),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Decline),
            _ => None,
        },
        GameState::Stop => None,
    }
}

fn running_action(code: KeyCode) -> Option<Action> {
    let (dx, dy) = match code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),

        KeyCode::Up | KeyCode::Char('k') => (0, -1),
        KeyCode::Down | KeyCode::Char('j') => (0, 1),
        KeyCode::Left | KeyCode::Char('h') => (-1, 0),
        KeyCode::Right | KeyCode::Char('l') => (1, 0),

        // Diagonals (vi-style)
        KeyCode::Char('y') => (-1, -1),
        KeyCode::Char('u') => (1, -1),
        KeyCode::Char('b') => (-1, 1),
        KeyCode::Char('n') => (1, 1),

        _ => return None,
    };
    Some(Action::Move { dx, dy })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_movement_keys() {
        let state = GameState::Running;
        assert_eq!(action_for_key(press(KeyCode::Char('h')), state), Some(Action::Move { dx: -1, dy: 0 }));
        assert_eq!(action_for_key(press(KeyCode::Down), state), Some(Action::Move { dx: 0, dy: 1 }));
        assert_eq!(action_for_key(press(KeyCode::Char('u')), state), Some(Action::Move { dx: 1, dy: -1 }));
        assert_eq!(action_for_key(press(KeyCode::Char('x')), state), None);
    }

    #[test]
    fn test_y_and_n_depend_on_mode() {
        let y = press(KeyCode::Char('y'));
        let n = press(KeyCode::Char('n'));

        assert_eq!(action_for_key(y, GameState::Running), Some(Action::Move { dx: -1, dy: -1 }));
        assert_eq!(action_for_key(n, GameState::Running), Some(Action::Move { dx: 1, dy: 1 }));
        assert_eq!(action_for_key(y, GameState::Prompt), Some(Action::Confirm));
        assert_eq!(action_for_key(n, GameState::Prompt), Some(Action::Decline));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for_key(press(KeyCode::Char('q')), GameState::Running), Some(Action::Quit));
        assert_eq!(action_for_key(press(KeyCode::Esc), GameState::Running), Some(Action::Quit));
        assert_eq!(action_for_key(press(KeyCode::Esc), GameState::Prompt), Some(Action::Decline));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for_key(ctrl_c, GameState::Prompt), Some(Action::Quit));
    }

    #[test]
    fn test_movement_ignored_while_prompting() {
        assert_eq!(action_for_key(press(KeyCode::Char('h')), GameState::Prompt), None);
        assert_eq!(action_for_key(press(KeyCode::Char('q')), GameState::Stop), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = press(KeyCode::Char('h'));
        key.kind = KeyEventKind::Release;
        assert_eq!(action_for_key(key, GameState::Running), None);
    }
}
