// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    #[default]
    None,
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { ctrl: false, shift: false };
    pub const CTRL: Modifiers = Modifiers { ctrl: true, shift: false };
}

/// For motion events `button` is the held button, `None` when hovering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub point: Point,
    pub button: Button,
    pub double_click: bool,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn primary(x: i32, y: i32) -> Self {
        Self {
            point: Point::new(x, y),
            button: Button::Primary,
            double_click: false,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn hover(x: i32, y: i32) -> Self {
        Self {
            button: Button::None,
            ..Self::primary(x, y)
        }
    }

    pub fn double(x: i32, y: i32) -> Self {
        Self {
            double_click: true,
            ..Self::primary(x, y)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    /// The Ctrl key itself.
    Control,
    Enter,
    Escape,
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn plain(key: Key) -> Self {
        Self { key, modifiers: Modifiers::NONE }
    }

    pub fn ctrl(key: Key) -> Self {
        Self { key, modifiers: Modifiers::CTRL }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    KeyPress(KeyEvent),
}
