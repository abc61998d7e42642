// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

/// Where the pointer sits relative to the selection.
///
/// The eight directional zones are contiguous and ordered clockwise from
/// `Top`, so a flip of the dragged handle is a rotation by 2, 4 or 6 steps.
/// Corners sit at odd indices and edges at even ones.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorZone {
    Top = 0,
    RightTop,
    Right,
    RightBottom,
    Bottom,
    LeftBottom,
    Left,
    LeftTop,
    Outer,
    Inner,
}

pub const DIRECTIONAL: [CursorZone; 8] = [
    CursorZone::Top,
    CursorZone::RightTop,
    CursorZone::Right,
    CursorZone::RightBottom,
    CursorZone::Bottom,
    CursorZone::LeftBottom,
    CursorZone::Left,
    CursorZone::LeftTop,
];

impl CursorZone {
    pub fn index(self) -> Option<usize> {
        match self {
            CursorZone::Outer | CursorZone::Inner => None,
            z => Some(z as usize),
        }
    }

    pub fn from_index(i: usize) -> Self {
        DIRECTIONAL[i % DIRECTIONAL.len()]
    }

    pub fn is_corner(self) -> bool {
        matches!(self.index(), Some(i) if i % 2 == 1)
    }

    pub fn is_edge(self) -> bool {
        matches!(self.index(), Some(i) if i % 2 == 0)
    }

    /// Clockwise rotation. Outer and Inner are fixed points.
    pub fn rotated(self, steps: usize) -> Self {
        match self.index() {
            Some(i) => Self::from_index(i + steps),
            None => self,
        }
    }

    /// Zone of the dragged handle after the selection inverted.
    ///
    /// | zone | x-flip | y-flip | both |
    /// |------|--------|--------|------|
    /// | LT   | RT     | LB     | RB   |
    /// | RT   | LT     | RB     | LB   |
    /// | RB   | LB     | RT     | LT   |
    /// | LB   | RB     | LT     | RT   |
    ///
    /// An edge always becomes the opposite edge.
    pub fn flipped(self, flip_x: bool, flip_y: bool) -> Self {
        if !flip_x && !flip_y {
            return self;
        }

        let steps = if self.is_corner() && flip_x != flip_y {
            let diagonal = matches!(self, CursorZone::LeftTop | CursorZone::RightBottom);
            if diagonal == flip_x { 2 } else { 6 }
        } else {
            4
        };

        self.rotated(steps)
    }

    pub fn glyph(self) -> CursorGlyph {
        match self {
            CursorZone::Top => CursorGlyph::TopSide,
            CursorZone::RightTop => CursorGlyph::TopRightCorner,
            CursorZone::Right => CursorGlyph::RightSide,
            CursorZone::RightBottom => CursorGlyph::BottomRightCorner,
            CursorZone::Bottom => CursorGlyph::BottomSide,
            CursorZone::LeftBottom => CursorGlyph::BottomLeftCorner,
            CursorZone::Left => CursorGlyph::LeftSide,
            CursorZone::LeftTop => CursorGlyph::TopLeftCorner,
            CursorZone::Outer => CursorGlyph::Crosshair,
            CursorZone::Inner => CursorGlyph::Move,
        }
    }
}

/// Pointer shape requested from the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorGlyph {
    Default,
    Crosshair,
    Move,
    TopSide,
    TopRightCorner,
    RightSide,
    BottomRightCorner,
    BottomSide,
    BottomLeftCorner,
    LeftSide,
    TopLeftCorner,
    Pencil,
    Text,
}

#[cfg(test)]
mod tests {
    use super::CursorZone::*;
    use super::*;

    #[test]
    fn directional_zones_are_contiguous_from_top() {
        for (i, z) in DIRECTIONAL.iter().enumerate() {
            assert_eq!(z.index(), Some(i));
        }
        assert_eq!(Top as u8, 0);
        assert_eq!(Outer.index(), None);
        assert_eq!(Inner.rotated(3), Inner);
    }

    #[test]
    fn corners_are_odd() {
        assert!(RightTop.is_corner() && LeftTop.is_corner());
        assert!(Top.is_edge() && Left.is_edge());
        assert!(!Inner.is_corner() && !Inner.is_edge());
    }

    #[test]
    fn flip_truth_table() {
        let table = [
            (LeftTop, RightTop, LeftBottom, RightBottom),
            (RightTop, LeftTop, RightBottom, LeftBottom),
            (RightBottom, LeftBottom, RightTop, LeftTop),
            (LeftBottom, RightBottom, LeftTop, RightTop),
        ];
        for (zone, x, y, both) in table {
            assert_eq!(zone.flipped(false, false), zone);
            assert_eq!(zone.flipped(true, false), x, "{zone:?} x-flip");
            assert_eq!(zone.flipped(false, true), y, "{zone:?} y-flip");
            assert_eq!(zone.flipped(true, true), both, "{zone:?} both");
        }
    }

    #[test]
    fn edges_flip_to_opposite_edge() {
        assert_eq!(Top.flipped(false, true), Bottom);
        assert_eq!(Bottom.flipped(false, true), Top);
        assert_eq!(Left.flipped(true, false), Right);
        assert_eq!(Right.flipped(true, false), Left);
    }

    #[test]
    fn every_zone_has_a_glyph() {
        for z in DIRECTIONAL.iter().copied().chain([Outer, Inner]) {
            let _ = z.glyph();
        }
        assert_eq!(Outer.glyph(), CursorGlyph::Crosshair);
        assert_eq!(Inner.glyph(), CursorGlyph::Move);
    }
}
