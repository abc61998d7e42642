// Author: Dustin Pilgrim
// License: MIT

//! The selection rectangle and its hit-testing geometry.

use serde::{Deserialize, Serialize};

use crate::colour::Colour;
use crate::geometry::{Bounds, Point, Rect};
use crate::zone::CursorZone;

pub const DEFAULT_SECTION_BORDER: i32 = 2;
pub const DEFAULT_SECTION_COLOUR: Colour = Colour::rgb(0x00ff00);

/// The user-dragged capture rectangle.
///
/// `width`/`height` are never negative once an operation returns; every
/// mutation goes through `set_corners`, which normalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub border: i32,
    pub colour: Colour,
}

impl Default for Section {
    fn default() -> Self {
        Self::new(DEFAULT_SECTION_BORDER, DEFAULT_SECTION_COLOUR)
    }
}

impl Section {
    pub fn new(border: i32, colour: Colour) -> Self {
        Self {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            border: border.max(0),
            colour,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn corners(&self) -> Bounds {
        let r = self.rect();
        Bounds::new(r.x, r.y, r.right(), r.bottom())
    }

    /// Nothing dragged yet.
    pub fn is_empty(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
    }

    pub fn start_at(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
        self.clear();
    }

    pub fn set_corners(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let r = Rect::from_corners(x0, y0, x1, y1);
        self.x = r.x;
        self.y = r.y;
        self.width = r.w;
        self.height = r.h;
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    /// Interior inside the border stroke, clamped to the screen.
    /// Inverted when the selection is too small to show anything.
    pub fn inner(&self, screen: Rect) -> Bounds {
        let r = self.rect();
        Bounds::new(
            r.x.saturating_add(self.border).max(screen.x),
            r.y.saturating_add(self.border).max(screen.y),
            r.right().saturating_sub(self.border).min(screen.right()),
            r.bottom().saturating_sub(self.border).min(screen.bottom()),
        )
    }

    pub fn is_visible(&self, screen: Rect) -> bool {
        self.inner(screen).is_visible()
    }

    /// Selection covering the whole screen with the border pushed off-screen.
    pub fn select_all(&mut self, screen: Rect) {
        let r = screen.expand(self.border);
        self.set_corners(r.x, r.y, r.right(), r.bottom());
    }

    /// Handle squares indexed by `CursorZone::index`.
    pub fn anchors(&self, screen: Rect, anchor: i32) -> [Rect; 8] {
        let b = self.inner(screen);
        let a = anchor;
        let mid = |lo: i32, hi: i32| ((i64::from(lo) + i64::from(hi) - i64::from(a)) / 2) as i32;
        let (mid_x, mid_y) = (mid(b.x0, b.x1), mid(b.y0, b.y1));
        let (left, top) = (b.x0.saturating_sub(a), b.y0.saturating_sub(a));
        let square = |x, y| Rect::new(x, y, a, a);

        [
            square(mid_x, top),
            square(b.x1, top),
            square(b.x1, mid_y),
            square(b.x1, b.y1),
            square(mid_x, b.y1),
            square(left, b.y1),
            square(left, mid_y),
            square(left, top),
        ]
    }

    /// Classify `p` into one of the ten zones.
    ///
    /// Order: strict interior, then handle squares (strict), then anything
    /// strictly outside the box grown by `border / 2` is outer. What remains
    /// is the border band, where the inner-bound comparisons are inclusive and
    /// corners win over edges.
    pub fn zone_at(&self, p: Point, screen: Rect, anchor: i32) -> CursorZone {
        let b = self.inner(screen);
        if !b.is_visible() {
            return CursorZone::Outer;
        }

        if b.contains_strict(p) {
            return CursorZone::Inner;
        }

        if anchor > 0 {
            let anchors = self.anchors(screen, anchor);
            if let Some(i) = anchors.iter().position(|r| r.contains_strict(p)) {
                return CursorZone::from_index(i);
            }
        }

        if !self.rect().expand(self.border / 2).contains(p) {
            return CursorZone::Outer;
        }

        if p.x <= b.x0 {
            if p.y <= b.y0 {
                CursorZone::LeftTop
            } else if p.y >= b.y1 {
                CursorZone::LeftBottom
            } else {
                CursorZone::Left
            }
        } else if p.x >= b.x1 {
            if p.y <= b.y0 {
                CursorZone::RightTop
            } else if p.y >= b.y1 {
                CursorZone::RightBottom
            } else {
                CursorZone::Right
            }
        } else if p.y <= b.y0 {
            CursorZone::Top
        } else {
            CursorZone::Bottom
        }
    }

    /// Move the edge(s) owned by `zone` to `p` and return the zone now under
    /// the dragged handle.
    pub fn resize(&mut self, zone: CursorZone, p: Point) -> CursorZone {
        let Bounds {
            mut x0,
            mut y0,
            mut x1,
            mut y1,
        } = self.corners();

        match zone {
            CursorZone::LeftTop => {
                x0 = p.x;
                y0 = p.y;
            }
            CursorZone::Top => y0 = p.y,
            CursorZone::RightTop => {
                y0 = p.y;
                x1 = p.x;
            }
            CursorZone::Right => x1 = p.x,
            CursorZone::RightBottom => {
                x1 = p.x;
                y1 = p.y;
            }
            CursorZone::Bottom => y1 = p.y,
            CursorZone::LeftBottom => {
                y1 = p.y;
                x0 = p.x;
            }
            CursorZone::Left => x0 = p.x,
            CursorZone::Outer | CursorZone::Inner => return zone,
        }

        let zone = zone.flipped(x1 < x0, y1 < y0);
        self.set_corners(x0, y0, x1, y1);
        zone
    }

    /// Ctrl+arrow growth: extents become `|w + dx|`, `|h + dy|`.
    /// Returns false and leaves the section alone if either would hit zero.
    pub fn grow(&mut self, dx: i32, dy: i32) -> bool {
        let w = self.width.saturating_add(dx).saturating_abs();
        let h = self.height.saturating_add(dy).saturating_abs();
        if w == 0 || h == 0 {
            return false;
        }
        self.width = w;
        self.height = h;
        true
    }
}
