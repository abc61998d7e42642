// Author: Dustin Pilgrim
// License: MIT

use crate::input::{Key, KeyEvent};

/// Key bindings understood outside of text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SaveToFile,
    CopyAndHide,
    SelectAll,
    Undo,
    Quit,
    ToggleSquare,
    Nudge { dx: i32, dy: i32 },
    Grow { dx: i32, dy: i32 },
}

pub fn arrow_delta(key: Key) -> Option<(i32, i32)> {
    match key {
        Key::Up => Some((0, -1)),
        Key::Down => Some((0, 1)),
        Key::Left => Some((-1, 0)),
        Key::Right => Some((1, 0)),
        _ => None,
    }
}

pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if ev.key == Key::Control {
        return Some(Command::ToggleSquare);
    }

    if let Some((dx, dy)) = arrow_delta(ev.key) {
        return Some(if ev.modifiers.ctrl {
            Command::Grow { dx, dy }
        } else {
            Command::Nudge { dx, dy }
        });
    }

    if !ev.modifiers.ctrl {
        return None;
    }

    let Key::Char(c) = ev.key else {
        return None;
    };

    match c.to_ascii_lowercase() {
        's' => Some(Command::SaveToFile),
        'o' => Some(Command::CopyAndHide),
        'a' => Some(Command::SelectAll),
        'z' => Some(Command::Undo),
        'q' => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_letters_map_to_commands() {
        assert_eq!(command_for(&KeyEvent::ctrl(Key::Char('s'))), Some(Command::SaveToFile));
        assert_eq!(command_for(&KeyEvent::ctrl(Key::Char('O'))), Some(Command::CopyAndHide));
        assert_eq!(command_for(&KeyEvent::ctrl(Key::Char('z'))), Some(Command::Undo));
        assert_eq!(command_for(&KeyEvent::plain(Key::Char('z'))), None);
        assert_eq!(command_for(&KeyEvent::ctrl(Key::Char('x'))), None);
    }

    #[test]
    fn arrows_nudge_or_grow() {
        assert_eq!(
            command_for(&KeyEvent::plain(Key::Left)),
            Some(Command::Nudge { dx: -1, dy: 0 })
        );
        assert_eq!(
            command_for(&KeyEvent::ctrl(Key::Down)),
            Some(Command::Grow { dx: 0, dy: 1 })
        );
    }

    #[test]
    fn control_key_toggles_square() {
        assert_eq!(command_for(&KeyEvent::ctrl(Key::Control)), Some(Command::ToggleSquare));
    }
}
