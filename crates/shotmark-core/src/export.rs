// Author: Dustin Pilgrim
// License: MIT

//! Turning a session into pixels.

use std::path::Path;

use eventline::info;
use image::{RgbaImage, imageops};

use crate::controller::Shot;
use crate::error::{Result, ShotError};
use crate::raster::{RasterCanvas, image_from_pixmap, pixmap_from_image};
use crate::text::FontBook;

/// The whole overlay as the user sees it.
pub fn render_frame(shot: &Shot, screen: &RgbaImage, fonts: &FontBook) -> Result<RgbaImage> {
    let screen = pixmap_from_image(screen)?;
    let mut canvas = RasterCanvas::new(&screen, fonts)?;
    shot.render(&mut canvas);
    image_from_pixmap(&canvas.finish())
}

/// Screen plus annotations, cropped to the selection interior.
/// `None` when there is no visible selection.
pub fn section_pixels(shot: &Shot, screen: &RgbaImage, fonts: &FontBook) -> Result<Option<RgbaImage>> {
    let Some(bounds) = shot.section_bounds() else {
        return Ok(None);
    };

    let pm = pixmap_from_image(screen)?;
    let mut canvas = RasterCanvas::new(&pm, fonts)?;
    shot.render_export(&mut canvas);
    let full = image_from_pixmap(&canvas.finish())?;

    // bounds are in screen coordinates; the image starts at the screen origin
    let origin = shot.screen();
    let x = (bounds.x - origin.x).max(0) as u32;
    let y = (bounds.y - origin.y).max(0) as u32;
    let w = (bounds.w as u32).min(full.width().saturating_sub(x));
    let h = (bounds.h as u32).min(full.height().saturating_sub(y));
    if w == 0 || h == 0 {
        return Ok(None);
    }

    Ok(Some(imageops::crop_imm(&full, x, y, w, h).to_image()))
}

/// Write `img` to `path`; the format follows the extension.
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    img.save(path)?;
    info!("saved {}x{} to {}", img.width(), img.height(), path.display());
    Ok(())
}

/// `section_pixels` + `save_image`, failing when nothing is selected.
pub fn save_section(shot: &Shot, screen: &RgbaImage, fonts: &FontBook, path: &Path) -> Result<()> {
    let img = section_pixels(shot, screen, fonts)?.ok_or(ShotError::NoSelection)?;
    save_image(&img, path)
}
