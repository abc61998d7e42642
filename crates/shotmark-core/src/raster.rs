// Author: Dustin Pilgrim
// License: MIT

//! tiny-skia backend for draw commands.
//!
//! Two layers: the screen layer receives `PaintScreen`, every other command
//! goes to the overlay, and `finish` composites overlay over screen.

use image::RgbaImage;
use tiny_skia::{
    BlendMode, ColorU8, FillRule, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use crate::colour::Colour;
use crate::error::{Result, ShotError};
use crate::geometry::{PointF, Rect};
use crate::render::{Canvas, DrawCommand};
use crate::text::FontBook;

pub fn pixmap_from_image(img: &RgbaImage) -> Result<Pixmap> {
    let (width, height) = img.dimensions();
    let mut pm = Pixmap::new(width, height).ok_or(ShotError::Canvas { width, height })?;
    for (dst, src) in pm.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pm)
}

pub fn image_from_pixmap(pm: &Pixmap) -> Result<RgbaImage> {
    let mut buf = Vec::with_capacity(pm.data().len());
    for px in pm.pixels() {
        let c = px.demultiply();
        buf.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(pm.width(), pm.height(), buf).ok_or(ShotError::Canvas {
        width: pm.width(),
        height: pm.height(),
    })
}

fn paint(colour: Colour) -> Paint<'static> {
    let mut p = Paint::default();
    p.set_color_rgba8(colour.r(), colour.g(), colour.b(), colour.a());
    p.anti_alias = true;
    p
}

fn stroke(width: f32) -> Stroke {
    Stroke {
        width: width.max(1.0),
        ..Stroke::default()
    }
}

fn polyline(points: &[PointF], closed: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

fn rect_path(from: PointF, to: PointF) -> Option<Path> {
    polyline(
        &[from, PointF::new(to.x, from.y), to, PointF::new(from.x, to.y)],
        true,
    )
}

fn round_rect_path(r: Rect, radius: f32) -> Option<Path> {
    let (x, y, w, h) = (r.x as f32, r.y as f32, r.w as f32, r.h as f32);
    let rad = radius.min(w / 2.0).min(h / 2.0).max(0.0);

    let mut pb = PathBuilder::new();
    pb.move_to(x + rad, y);
    pb.line_to(x + w - rad, y);
    pb.quad_to(x + w, y, x + w, y + rad);
    pb.line_to(x + w, y + h - rad);
    pb.quad_to(x + w, y + h, x + w - rad, y + h);
    pb.line_to(x + rad, y + h);
    pb.quad_to(x, y + h, x, y + h - rad);
    pb.line_to(x, y + rad);
    pb.quad_to(x, y, x + rad, y);
    pb.close();
    pb.finish()
}

fn sk_rect(r: Rect) -> Option<tiny_skia::Rect> {
    if r.is_empty() {
        return None;
    }
    tiny_skia::Rect::from_xywh(r.x as f32, r.y as f32, r.w as f32, r.h as f32)
}

pub struct RasterCanvas<'a> {
    screen: &'a Pixmap,
    base: Pixmap,
    overlay: Pixmap,
    fonts: &'a FontBook,
}

impl<'a> RasterCanvas<'a> {
    /// Canvas the size of `screen`; both layers start transparent.
    pub fn new(screen: &'a Pixmap, fonts: &'a FontBook) -> Result<Self> {
        let (width, height) = (screen.width(), screen.height());
        let base = Pixmap::new(width, height).ok_or(ShotError::Canvas { width, height })?;
        let overlay = Pixmap::new(width, height).ok_or(ShotError::Canvas { width, height })?;
        Ok(Self {
            screen,
            base,
            overlay,
            fonts,
        })
    }

    pub fn finish(mut self) -> Pixmap {
        self.base.draw_pixmap(
            0,
            0,
            self.overlay.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        self.base
    }

    fn stroke_path(&mut self, path: Option<Path>, width: f32, colour: Colour) {
        if let Some(path) = path {
            self.overlay
                .stroke_path(&path, &paint(colour), &stroke(width), Transform::identity(), None);
        }
    }

    fn fill_path(&mut self, path: Option<Path>, colour: Colour) {
        if let Some(path) = path {
            self.overlay
                .fill_path(&path, &paint(colour), FillRule::Winding, Transform::identity(), None);
        }
    }
}

impl Canvas for RasterCanvas<'_> {
    fn draw(&mut self, cmd: DrawCommand) {
        match cmd {
            DrawCommand::PaintScreen => {
                self.base.draw_pixmap(
                    0,
                    0,
                    self.screen.as_ref(),
                    &PixmapPaint::default(),
                    Transform::identity(),
                    None,
                );
            }
            DrawCommand::ClearRect { rect } => {
                if let Some(r) = sk_rect(rect) {
                    let mut p = Paint::default();
                    p.blend_mode = BlendMode::Clear;
                    self.overlay.fill_rect(r, &p, Transform::identity(), None);
                }
            }
            DrawCommand::FillRect { rect, colour } => {
                if let Some(r) = sk_rect(rect) {
                    self.overlay
                        .fill_rect(r, &paint(colour), Transform::identity(), None);
                }
            }
            DrawCommand::FillRoundRect {
                rect,
                radius,
                colour,
            } => self.fill_path(round_rect_path(rect, radius), colour),
            DrawCommand::FillCircle {
                centre,
                radius,
                colour,
            } => self.fill_path(PathBuilder::from_circle(centre.x, centre.y, radius), colour),
            DrawCommand::StrokeRect {
                from,
                to,
                width,
                colour,
            } => self.stroke_path(rect_path(from, to), width, colour),
            DrawCommand::StrokeEllipse {
                centre,
                rx,
                ry,
                width,
                colour,
            } => {
                let oval = tiny_skia::Rect::from_xywh(centre.x - rx, centre.y - ry, 2.0 * rx, 2.0 * ry)
                    .and_then(PathBuilder::from_oval);
                self.stroke_path(oval, width, colour);
            }
            DrawCommand::StrokePolyline {
                points,
                closed,
                width,
                colour,
            } => self.stroke_path(polyline(&points, closed), width, colour),
            DrawCommand::FillPath { points, colour } => {
                self.fill_path(polyline(&points, true), colour)
            }
            DrawCommand::DrawText {
                origin,
                font,
                text,
                colour,
            } => self
                .fonts
                .draw_text(&mut self.overlay, origin, &font, &text, colour),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, image::Rgba(rgba))
    }

    #[test]
    fn image_pixmap_conversion_preserves_opaque_pixels() {
        let img = solid(3, 2, [10, 20, 30, 255]);
        let pm = pixmap_from_image(&img).unwrap();
        assert_eq!(image_from_pixmap(&pm).unwrap(), img);
    }

    #[test]
    fn overlay_sits_on_top_of_screen() {
        let screen = pixmap_from_image(&solid(20, 20, [0, 0, 255, 255])).unwrap();
        let fonts = FontBook::empty();
        let mut canvas = RasterCanvas::new(&screen, &fonts).unwrap();

        canvas.draw(DrawCommand::PaintScreen);
        canvas.draw(DrawCommand::FillRect {
            rect: Rect::new(0, 0, 10, 20),
            colour: Colour::rgb(0xff0000),
        });
        let out = image_from_pixmap(&canvas.finish()).unwrap();

        assert_eq!(out.get_pixel(2, 2).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(15, 2).0, [0, 0, 255, 255]);
    }

    #[test]
    fn clear_rect_punches_through_overlay() {
        let screen = pixmap_from_image(&solid(20, 20, [0, 255, 0, 255])).unwrap();
        let fonts = FontBook::empty();
        let mut canvas = RasterCanvas::new(&screen, &fonts).unwrap();

        canvas.draw(DrawCommand::PaintScreen);
        canvas.draw(DrawCommand::FillRect {
            rect: Rect::new(0, 0, 20, 20),
            colour: Colour::BLACK,
        });
        canvas.draw(DrawCommand::ClearRect {
            rect: Rect::new(5, 5, 10, 10),
        });
        let out = image_from_pixmap(&canvas.finish()).unwrap();

        assert_eq!(out.get_pixel(10, 10).0, [0, 255, 0, 255]);
        assert_eq!(out.get_pixel(1, 1).0, [0, 0, 0, 255]);
    }

    #[test]
    fn degenerate_shapes_do_not_panic() {
        let screen = Pixmap::new(10, 10).unwrap();
        let fonts = FontBook::empty();
        let mut canvas = RasterCanvas::new(&screen, &fonts).unwrap();

        canvas.draw(DrawCommand::StrokePolyline {
            points: vec![],
            closed: false,
            width: 2.0,
            colour: Colour::WHITE,
        });
        canvas.draw(DrawCommand::StrokeEllipse {
            centre: PointF::new(5.0, 5.0),
            rx: 0.0,
            ry: 0.0,
            width: 2.0,
            colour: Colour::WHITE,
        });
        canvas.draw(DrawCommand::FillRect {
            rect: Rect::new(3, 3, 0, 0),
            colour: Colour::WHITE,
        });
        let _ = canvas.finish();
    }
}
