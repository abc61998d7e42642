// Author: Dustin Pilgrim
// License: MIT

//! Selection and annotation engine for shotmark.

pub mod colour;
pub mod config;
pub mod controller;
pub mod effect;
pub mod error;
pub mod export;
pub mod geometry;
pub mod history;
pub mod input;
pub mod layout;
pub mod mode;
pub mod pen;
pub mod raster;
pub mod render;
pub mod section;
pub mod shortcuts;
pub mod text;
pub mod zone;

pub use colour::Colour;
pub use config::ShotConfig;
pub use controller::{Shot, TextEntry};
pub use effect::Effect;
pub use error::{Result, ShotError};
pub use geometry::{Bounds, Point, PointF, Rect, Size};
pub use history::History;
pub use input::{Button, InputEvent, Key, KeyEvent, Modifiers, PointerEvent};
pub use mode::Mode;
pub use pen::{Pen, PenKind, PenStyle, Shape};
pub use render::{Canvas, DrawCommand};
pub use section::Section;
pub use text::FontBook;
pub use zone::{CursorGlyph, CursorZone};
