//! Key mapping from terminal events to game commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Direction;

/// What a key press asks the game to do.
///
/// The meaning of `Confirm`, `Enter` and `Digit` depends on the current
/// screen; the session decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Move(Direction),
    Confirm,
    Enter,
    Escape,
    Backspace,
    Digit(char),
    Quit,
}

/// Movement direction bound to a key, if any.
pub fn direction_of(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(Direction::Up),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Direction::Right),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Direction::Left),
        _ => None,
    }
}

/// Map keyboard input to a command.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if should_quit(key) {
        return Some(Command::Quit);
    }
    if let Some(dir) = direction_of(key.code) {
        return Some(Command::Move(dir));
    }

    match key.code {
        KeyCode::Char(' ') => Some(Command::Confirm),
        KeyCode::Enter => Some(Command::Enter),
        KeyCode::Esc => Some(Command::Escape),
        KeyCode::Backspace => Some(Command::Backspace),
        KeyCode::Char(c) if c.is_ascii_digit() => Some(Command::Digit(c)),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
