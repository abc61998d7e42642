// Author: Dustin Pilgrim
// License: MIT

//! Backend-neutral draw commands.
//!
//! The engine never touches pixels. It issues commands against a `Canvas`;
//! `raster::RasterCanvas` turns them into pixels and a plain `Vec` records
//! them for frontends that paint themselves.

use serde::{Deserialize, Serialize};

use crate::colour::Colour;
use crate::geometry::{PointF, Rect};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Blit the captured screen image.
    PaintScreen,
    /// Punch a fully transparent hole through everything drawn above the screen.
    ClearRect { rect: Rect },
    FillRect { rect: Rect, colour: Colour },
    FillRoundRect { rect: Rect, radius: f32, colour: Colour },
    FillCircle { centre: PointF, radius: f32, colour: Colour },
    /// Axis-aligned rectangle between two corners in any order.
    StrokeRect { from: PointF, to: PointF, width: f32, colour: Colour },
    StrokeEllipse { centre: PointF, rx: f32, ry: f32, width: f32, colour: Colour },
    StrokePolyline { points: Vec<PointF>, closed: bool, width: f32, colour: Colour },
    FillPath { points: Vec<PointF>, colour: Colour },
    /// `origin` is the top-left of the first line. `text` may contain newlines.
    DrawText { origin: PointF, font: String, text: String, colour: Colour },
}

pub trait Canvas {
    fn draw(&mut self, cmd: DrawCommand);
}

impl Canvas for Vec<DrawCommand> {
    fn draw(&mut self, cmd: DrawCommand) {
        self.push(cmd);
    }
}
