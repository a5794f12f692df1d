use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What the keyboard is currently used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Playing,
    /// The game-over prompt is asking for a name
    NameEntry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
    Quit,
    Type(char),
    Erase,
    Confirm,
    Cancel,
    None,
}

pub fn map_key(key: KeyEvent, mode: InputMode) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Command::Quit;
    }

    match mode {
        InputMode::Playing => playing_key(key.code),
        InputMode::NameEntry => name_entry_key(key.code),
    }
}

fn playing_key(code: KeyCode) -> Command {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::Turn(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Turn(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Command::Turn(Direction::Right)
        }

        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,

        _ => Command::None,
    }
}

fn name_entry_key(code: KeyCode) -> Command {
    match code {
        KeyCode::Enter => Command::Confirm,
        KeyCode::Esc => Command::Cancel,
        KeyCode::Backspace => Command::Erase,
        KeyCode::Char(c) => Command::Type(c),
        _ => Command::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_turn() {
        let play = InputMode::Playing;
        assert_eq!(map_key(key(KeyCode::Up), play), Command::Turn(Direction::Up));
        assert_eq!(map_key(key(KeyCode::Down), play), Command::Turn(Direction::Down));
        assert_eq!(map_key(key(KeyCode::Char('a')), play), Command::Turn(Direction::Left));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT), play),
            Command::Turn(Direction::Right)
        );
    }

    #[test]
    fn controls_while_playing() {
        let play = InputMode::Playing;
        assert_eq!(map_key(key(KeyCode::Char('r')), play), Command::Restart);
        assert_eq!(map_key(key(KeyCode::Char('q')), play), Command::Quit);
        assert_eq!(map_key(key(KeyCode::Esc), play), Command::Quit);
        assert_eq!(map_key(key(KeyCode::Char('x')), play), Command::None);
    }

    #[test]
    fn letters_are_typed_in_the_prompt() {
        let prompt = InputMode::NameEntry;
        assert_eq!(map_key(key(KeyCode::Char('q')), prompt), Command::Type('q'));
        assert_eq!(map_key(key(KeyCode::Char('r')), prompt), Command::Type('r'));
        assert_eq!(map_key(key(KeyCode::Backspace), prompt), Command::Erase);
        assert_eq!(map_key(key(KeyCode::Enter), prompt), Command::Confirm);
        assert_eq!(map_key(key(KeyCode::Esc), prompt), Command::Cancel);
        assert_eq!(map_key(key(KeyCode::Up), prompt), Command::None);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, InputMode::Playing), Command::Quit);
        assert_eq!(map_key(ctrl_c, InputMode::NameEntry), Command::Quit);
    }
}
