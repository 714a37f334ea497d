//! Keyboard handling for the game screen.

use crate::game::{on_jump_requested, GameInput, World};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of handling a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Keep running the frame loop.
    Continue,
    /// Leave the game.
    Quit,
    /// Replace the finished world with a fresh one.
    Restart,
}

/// Translate a terminal key into a game action.
pub fn map_key(key: KeyEvent) -> GameInput {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return GameInput::Quit;
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => GameInput::Jump,
        KeyCode::Char('r') | KeyCode::Char('R') => GameInput::Restart,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => GameInput::Quit,
        _ => GameInput::Other,
    }
}

/// Dispatch a key event against the live world.
pub fn handle_game_input(key: KeyEvent, world: &mut World) -> InputResult {
    // Some terminals report releases and repeats as separate events
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    match map_key(key) {
        GameInput::Quit => InputResult::Quit,
        GameInput::Jump => {
            on_jump_requested(world);
            InputResult::Continue
        }
        GameInput::Restart if world.is_game_over() => InputResult::Restart,
        GameInput::Restart | GameInput::Other => InputResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::game::Phase;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn world() -> World {
        World::new(GameConfig::default()).unwrap()
    }

    #[test]
    fn test_jump_keys() {
        assert_eq!(map_key(press(KeyCode::Char(' '))), GameInput::Jump);
        assert_eq!(map_key(press(KeyCode::Up)), GameInput::Jump);
        assert_eq!(map_key(press(KeyCode::Down)), GameInput::Other);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Esc)), GameInput::Quit);
        assert_eq!(map_key(press(KeyCode::Char('q'))), GameInput::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            GameInput::Quit
        );
    }

    #[test]
    fn test_jump_latches_pending() {
        let mut world = world();
        let result = handle_game_input(press(KeyCode::Char(' ')), &mut world);
        assert_eq!(result, InputResult::Continue);
        assert!(world.jump_pending);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut world = world();
        let mut key = press(KeyCode::Up);
        key.kind = KeyEventKind::Release;
        handle_game_input(key, &mut world);
        assert!(!world.jump_pending);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut world = world();
        assert_eq!(
            handle_game_input(press(KeyCode::Char('r')), &mut world),
            InputResult::Continue
        );
        world.phase = Phase::GameOver;
        assert_eq!(
            handle_game_input(press(KeyCode::Char('r')), &mut world),
            InputResult::Restart
        );
    }
}
