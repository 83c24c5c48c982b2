//! Key mapping from terminal events to puzzle commands.

use crate::types::ControlAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Cursor direction on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What a key press asks for, before the cursor resolves it to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Move(Direction),
    /// Pick up the tile under the cursor, or drop the carried one.
    Grab,
    /// Abort a carry, or dismiss the hint overlay when nothing is carried.
    Cancel,
    Control(ControlAction),
}

/// Map keyboard input to puzzle commands.
pub fn map_key_event(key: KeyEvent) -> Option<KeyCommand> {
    match key.code {
        // Cursor
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(KeyCommand::Move(Direction::Left)),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(KeyCommand::Move(Direction::Right)),
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(KeyCommand::Move(Direction::Up)),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(KeyCommand::Move(Direction::Down)),

        // Pick up / drop
        KeyCode::Char(' ') | KeyCode::Enter => Some(KeyCommand::Grab),
        KeyCode::Esc => Some(KeyCommand::Cancel),

        // Controls
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char('x') | KeyCode::Char('X') => {
            Some(KeyCommand::Control(ControlAction::Shuffle))
        }
        KeyCode::Char('?') | KeyCode::Char('i') | KeyCode::Char('I') => {
            Some(KeyCommand::Control(ControlAction::ToggleHint))
        }
        KeyCode::Char('n') | KeyCode::Char('N') => Some(KeyCommand::Control(ControlAction::Restart)),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
