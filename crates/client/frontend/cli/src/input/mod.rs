//! Input processing for the CLI client.
//!
//! This module owns the keyboard-to-command mapping so the rest of the
//! application can remain agnostic about concrete key bindings or the
//! specifics of `crossterm` events.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use game_core::Key;

/// High-level outcome of processing a keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Start over after a game over.
    Restart,
    /// Key went down (including auto-repeat).
    Press(Key),
    /// Key went up.
    Release(Key),
    /// Press on a terminal that never reports releases.
    Tap(Key),
    /// No meaningful command was produced.
    None,
}

/// Translates `KeyEvent`s into game commands.
pub struct InputHandler {
    reports_release: bool,
}

impl InputHandler {
    pub fn new(reports_release: bool) -> Self {
        Self { reports_release }
    }

    /// Converts a raw key event into a higher-level command.
    ///
    /// `game_over` switches the attack and `r` keys to restarting.
    pub fn handle_key(&self, key: KeyEvent, game_over: bool) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let pressed = matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat);

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') if pressed => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char(' ') if game_over => {
                if key.kind == KeyEventKind::Press {
                    KeyAction::Restart
                } else {
                    KeyAction::None
                }
            }
            code => match game_key(code) {
                Some(game_key) => self.key_action(game_key, key.kind),
                None => KeyAction::None,
            },
        }
    }

    fn key_action(&self, key: Key, kind: KeyEventKind) -> KeyAction {
        match kind {
            KeyEventKind::Release => KeyAction::Release(key),
            KeyEventKind::Press | KeyEventKind::Repeat if self.reports_release => {
                KeyAction::Press(key)
            }
            KeyEventKind::Press | KeyEventKind::Repeat => KeyAction::Tap(key),
        }
    }
}

fn game_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(ch) => {
            let mut buf = [0u8; 4];
            Key::from_name(ch.encode_utf8(&mut buf))
        }
        _ => return None,
    };
    (key != Key::Other).then_some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn wasd_and_arrows_map_to_movement() {
        let handler = InputHandler::new(true);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('a'), KeyEventKind::Press), false),
            KeyAction::Press(Key::Left)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Up, KeyEventKind::Release), false),
            KeyAction::Release(Key::Up)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char(' '), KeyEventKind::Press), false),
            KeyAction::Press(Key::Attack)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('x'), KeyEventKind::Press), false),
            KeyAction::None
        );
    }

    #[test]
    fn presses_become_taps_without_release_reporting() {
        let handler = InputHandler::new(false);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('D'), KeyEventKind::Press), false),
            KeyAction::Tap(Key::Right)
        );
    }

    #[test]
    fn restart_only_after_game_over() {
        let handler = InputHandler::new(true);
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('r'), KeyEventKind::Press), true),
            KeyAction::Restart
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('r'), KeyEventKind::Press), false),
            KeyAction::None
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char(' '), KeyEventKind::Press), true),
            KeyAction::Restart
        );
    }

    #[test]
    fn quit_keys() {
        let handler = InputHandler::new(true);
        assert_eq!(
            handler.handle_key(key(KeyCode::Esc, KeyEventKind::Press), false),
            KeyAction::Quit
        );
        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'), KeyEventKind::Press)
        };
        assert_eq!(handler.handle_key(ctrl_c, false), KeyAction::Quit);
    }
}
