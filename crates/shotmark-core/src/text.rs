// Author: Dustin Pilgrim
// License: MIT

//! Glyph rasterization for text annotations and the info label.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, GlyphId, ScaleFont, point};
use eventline::{debug, warn};
use tiny_skia::{Pixmap, PremultipliedColorU8};

use crate::colour::Colour;
use crate::error::{Result, ShotError};
use crate::geometry::PointF;

const DEFAULT_POINT_SIZE: f32 = 10.0;

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
];

/// Pixel size from a descriptor like `"Sans Bold 12"`; the trailing number
/// is in points.
pub fn font_size_px(descriptor: &str) -> f32 {
    let pt = descriptor
        .split_whitespace()
        .last()
        .and_then(|s| s.parse::<f32>().ok())
        .filter(|v| *v > 0.0)
        .unwrap_or(DEFAULT_POINT_SIZE);
    pt * 96.0 / 72.0
}

/// The face used for all text. Empty when no font file could be found, in
/// which case text is skipped rather than failing the frame.
#[derive(Clone, Default)]
pub struct FontBook {
    font: Option<FontArc>,
}

impl FontBook {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let font = FontArc::try_from_vec(bytes).map_err(|e| ShotError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self { font: Some(font) })
    }

    /// Try `preferred` first, then well-known system locations.
    pub fn discover(preferred: Option<&Path>) -> Self {
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from));

        for path in candidates {
            if !path.is_file() {
                continue;
            }
            match Self::load(&path) {
                Ok(book) => {
                    debug!("font={}", path.display());
                    return book;
                }
                Err(e) => warn!("skipping font: {e}"),
            }
        }

        warn!("no usable font found; text will not be rendered");
        Self::empty()
    }

    pub fn is_empty(&self) -> bool {
        self.font.is_none()
    }

    /// Draw `text` with its first line's top edge at `origin.y`.
    pub fn draw_text(&self, pixmap: &mut Pixmap, origin: PointF, descriptor: &str, text: &str, colour: Colour) {
        let Some(font) = &self.font else {
            return;
        };

        let scaled = font.as_scaled(font_size_px(descriptor));
        let line_height = scaled.height() + scaled.line_gap();
        let mut baseline = origin.y + scaled.ascent();

        for line in text.lines() {
            let mut x = origin.x;
            let mut prev: Option<GlyphId> = None;

            for ch in line.chars() {
                let id = scaled.glyph_id(ch);
                if let Some(p) = prev {
                    x += scaled.kern(p, id);
                }
                let glyph = id.with_scale_and_position(scaled.scale(), point(x, baseline));
                x += scaled.h_advance(id);
                prev = Some(id);

                let Some(outlined) = font.outline_glyph(glyph) else {
                    continue;
                };
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px = bounds.min.x as i32 + gx as i32;
                    let py = bounds.min.y as i32 + gy as i32;
                    blend_pixel(pixmap, px, py, colour, coverage);
                });
            }

            baseline += line_height;
        }
    }
}

/// Source-over one coverage sample onto a premultiplied pixmap.
fn blend_pixel(pixmap: &mut Pixmap, x: i32, y: i32, colour: Colour, coverage: f32) {
    if x < 0 || y < 0 || x >= pixmap.width() as i32 || y >= pixmap.height() as i32 {
        return;
    }
    let a = (colour.a() as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }

    let idx = y as usize * pixmap.width() as usize + x as usize;
    let pixels = pixmap.pixels_mut();
    let dst = pixels[idx];
    let keep = 1.0 - a;

    let mix = |src: u8, dst: u8| (src as f32 * a + dst as f32 * keep).round().min(255.0) as u8;
    let out_a = (255.0 * a + dst.alpha() as f32 * keep).round().min(255.0) as u8;
    let out = PremultipliedColorU8::from_rgba(
        mix(colour.r(), dst.red()).min(out_a),
        mix(colour.g(), dst.green()).min(out_a),
        mix(colour.b(), dst.blue()).min(out_a),
        out_a,
    );

    if let Some(px) = out {
        pixels[idx] = px;
    }
}
