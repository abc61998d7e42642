// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// Float point used by draw commands (shape math is done in f32).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(a: PointF, b: PointF) -> PointF {
        PointF::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }
}

impl From<Point> for PointF {
    fn from(p: Point) -> Self {
        PointF::new(p.x as f32, p.y as f32)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Normalized rectangle spanning two arbitrary corners.
    pub fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            x: x0.min(x1),
            y: y0.min(y1),
            w: x0.saturating_sub(x1).saturating_abs(),
            h: y0.saturating_sub(y1).saturating_abs(),
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn expand(&self, by: i32) -> Rect {
        let grow = by.saturating_mul(2);
        Rect::new(
            self.x.saturating_sub(by),
            self.y.saturating_sub(by),
            self.w.saturating_add(grow),
            self.h.saturating_add(grow),
        )
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Exclusive on every edge.
    pub fn contains_strict(&self, p: Point) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }

    /// Nearest point inside the rectangle, edges included.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.x, self.right().max(self.x)),
            p.y.clamp(self.y, self.bottom().max(self.y)),
        )
    }
}

/// Corner form of a rectangle. Unlike `Rect` it may be inverted (x1 < x0),
/// which is how the clamped selection interior reports "nothing visible".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Bounds {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> i32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> i32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_visible(&self) -> bool {
        self.width() > 0 && self.height() > 0
    }

    pub fn contains_strict(&self, p: Point) -> bool {
        p.x > self.x0 && p.x < self.x1 && p.y > self.y0 && p.y < self.y1
    }

    /// Rectangle view with negative extents clamped to zero.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x0, self.y0, self.width().max(0), self.height().max(0))
    }
}
