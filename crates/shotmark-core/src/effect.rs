// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::colour::Colour;
use crate::geometry::Point;
use crate::layout::Placement;
use crate::zone::CursorGlyph;

/// Requests the controller makes of its collaborators (window, popups,
/// clipboard, file export). The controller never performs them itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Repaint,
    SetCursor(CursorGlyph),
    ShowToolbar(Placement),
    HideToolbar,
    OpenTextInput { at: Point, font: String, colour: Colour },
    CloseTextInput,
    CopyToClipboard,
    SaveToFile,
    Hide,
    Quit,
}
