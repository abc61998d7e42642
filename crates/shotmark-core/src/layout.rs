// Author: Dustin Pilgrim
// License: MIT

//! Placement of the floating toolbar, pen editor and selection info label.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point, Rect, Size};

pub const TOOLBAR_SIZE: Size = Size::new(338, 36);
pub const EDITOR_SIZE: Size = Size::new(305, 36);
pub const INFO_SIZE: Size = Size::new(145, 50);
pub const INFO_RADIUS: i32 = 8;

/// Gap between toolbar and pen editor.
const SPACING: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub toolbar: Point,
    pub editor: Point,
}

/// Put the toolbar under the selection (or above it when there is no room
/// below), and the pen editor on the far side of the toolbar.
///
/// `inner` is the clamped selection interior and `reach` how far the
/// border/handles stick out of it.
pub fn place_toolbar(inner: Bounds, screen: Rect, reach: i32, toolbar: Size, editor: Size) -> Placement {
    let x0 = (inner.x0 - reach).max(screen.x) - screen.x;
    let y0 = (inner.y0 - reach).max(screen.y) - screen.y;
    let x1 = (inner.x1 + reach).min(screen.right()) - screen.x;
    let y1 = (inner.y1 + reach).min(screen.bottom()) - screen.y;

    let x = (x0 + ((x1 - x0) - toolbar.w) / 2)
        .min(screen.w - toolbar.w)
        .max(0);

    let below = y1 <= screen.h - toolbar.h - editor.h - SPACING;
    let y = if below { y1 } else { (y0 - toolbar.h).max(0) };

    let editor_y = if !below && y0 >= toolbar.h + editor.h + SPACING {
        y - editor.h - SPACING
    } else {
        y + toolbar.h + SPACING
    };

    Placement {
        toolbar: Point::new(x + screen.x, y + screen.y),
        editor: Point::new(x + screen.x, editor_y + screen.y),
    }
}

/// Rounded box above the top-left of the selection; drops inside the
/// selection when it would leave the screen.
pub fn info_label_rect(inner: Bounds, screen: Rect, border: i32, reach: i32) -> Rect {
    let mut x = inner.x0 + border;
    let mut y = inner.y0 - reach - INFO_SIZE.h;

    if inner.x1 >= screen.right() && x + INFO_SIZE.w > inner.x1 {
        x = inner.x1 - INFO_SIZE.w - reach;
    }
    if y < screen.y {
        y = inner.y0 + border;
    }

    Rect::new(x, y, INFO_SIZE.w, INFO_SIZE.h)
}

pub fn info_label_text(inner: Bounds) -> String {
    format!(
        "x:{:4}, y:{:4}\nw:{:4}, h:{:4}",
        inner.x0,
        inner.y0,
        inner.width().max(0),
        inner.height().max(0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

    #[test]
    fn toolbar_goes_below_when_there_is_room() {
        let inner = Bounds::new(102, 102, 398, 298);
        let p = place_toolbar(inner, SCREEN, 6, TOOLBAR_SIZE, EDITOR_SIZE);
        // centred on (96..404), clamped at the left screen edge
        assert_eq!(p.toolbar, Point::new(81, 304));
        assert_eq!(p.editor, Point::new(81, 342));
    }

    #[test]
    fn toolbar_flips_above_near_bottom_edge() {
        let inner = Bounds::new(800, 600, 1200, 1070);
        let p = place_toolbar(inner, SCREEN, 6, TOOLBAR_SIZE, EDITOR_SIZE);
        assert_eq!(p.toolbar, Point::new(831, 558));
        assert_eq!(p.editor, Point::new(831, 520));
    }

    #[test]
    fn toolbar_stays_on_screen_for_full_selection() {
        let p = place_toolbar(Bounds::new(0, 0, 1920, 1080), SCREEN, 6, TOOLBAR_SIZE, EDITOR_SIZE);
        assert_eq!(p.toolbar.y, 0);
        assert_eq!(p.editor.y, 38);
        assert!(p.toolbar.x >= 0 && p.toolbar.x + TOOLBAR_SIZE.w <= 1920);
    }

    #[test]
    fn info_label_drops_inside_at_top_edge() {
        let r = info_label_rect(Bounds::new(0, 0, 500, 500), SCREEN, 2, 6);
        assert_eq!((r.x, r.y), (2, 2));

        let r = info_label_rect(Bounds::new(102, 102, 398, 298), SCREEN, 2, 6);
        assert_eq!((r.x, r.y), (104, 46));
    }

    #[test]
    fn info_text_pads_fields() {
        assert_eq!(
            info_label_text(Bounds::new(102, 102, 398, 298)),
            "x: 102, y: 102\nw: 296, h: 196"
        );
    }
}
