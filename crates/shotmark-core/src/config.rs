// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::colour::Colour;
use crate::geometry::Size;
use crate::layout::{EDITOR_SIZE, TOOLBAR_SIZE};
use crate::pen::PenStyle;
use crate::section::{DEFAULT_SECTION_BORDER, DEFAULT_SECTION_COLOUR};

pub const DEFAULT_ANCHOR_BORDER: i32 = 6;
pub const DEFAULT_MASK_COLOUR: Colour = Colour::rgb(0x000000);
pub const DEFAULT_MASK_OPACITY: f32 = 0.8;

/// Engine settings. Loading them from disk is the daemon's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotConfig {
    pub section_border: i32,
    pub section_colour: Colour,
    /// Side of the square resize handles.
    pub anchor_border: i32,
    pub mask_colour: Colour,
    /// Opacity of the screen seen through the mask; the mask itself is
    /// painted at `1 - mask_opacity`.
    pub mask_opacity: f32,
    pub pen: PenStyle,
    pub toolbar_size: Size,
    pub editor_size: Size,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            section_border: DEFAULT_SECTION_BORDER,
            section_colour: DEFAULT_SECTION_COLOUR,
            anchor_border: DEFAULT_ANCHOR_BORDER,
            mask_colour: DEFAULT_MASK_COLOUR,
            mask_opacity: DEFAULT_MASK_OPACITY,
            pen: PenStyle::default(),
            toolbar_size: TOOLBAR_SIZE,
            editor_size: EDITOR_SIZE,
        }
    }
}

impl ShotConfig {
    pub fn mask_fill(&self) -> Colour {
        self.mask_colour.with_opacity(1.0 - self.mask_opacity)
    }

    pub fn info_fill(&self) -> Colour {
        Colour::rgb(0x232126).with_opacity(self.mask_opacity / 2.0)
    }
}
