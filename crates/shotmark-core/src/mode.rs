// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Normal,
    /// Dragging out the initial selection.
    Drawing,
    Moving,
    Resizing,
    /// A tool is selected and shapes go to the live pen.
    Annotating,
    /// The text-entry popup is open.
    AnnotatingText,
    /// Tool deselected after annotating. Only export and undo act.
    Frozen,
}

impl Mode {
    pub fn is_annotating(self) -> bool {
        matches!(self, Mode::Annotating | Mode::AnnotatingText)
    }

    /// True while the primary button is held on the selection.
    pub fn is_dragging(self) -> bool {
        matches!(self, Mode::Drawing | Mode::Moving | Mode::Resizing)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mode::Normal => "normal",
            Mode::Drawing => "drawing",
            Mode::Moving => "moving",
            Mode::Resizing => "resizing",
            Mode::Annotating => "annotating",
            Mode::AnnotatingText => "annotating-text",
            Mode::Frozen => "frozen",
        };
        f.write_str(s)
    }
}
