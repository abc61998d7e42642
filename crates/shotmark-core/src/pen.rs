// Author: Dustin Pilgrim
// License: MIT

//! Annotation shapes.
//!
//! A `Pen` carries the fields every shape shares; `Shape` carries what is
//! specific to each kind and knows how to record points and render itself.

use std::collections::VecDeque;
use std::f32::consts::{FRAC_PI_4, SQRT_2};

#[cfg(feature = "clap")]
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::colour::Colour;
use crate::geometry::{Point, PointF};
use crate::render::{Canvas, DrawCommand};
use crate::zone::CursorGlyph;

pub const DEFAULT_PEN_SIZE: i32 = 2;
/// Stroke widths are kept within `1..=MAX_PEN_SIZE`.
pub const MAX_PEN_SIZE: i32 = 100;
pub const DEFAULT_PEN_COLOUR: Colour = Colour::rgb(0xff0000);
pub const DEFAULT_PEN_FONT: &str = "Sans 10";

/// Height of the pointer glyph; text is lifted by half of it so it lines up
/// with the entry popup.
pub const CURSOR_SIZE: i32 = 16;

const OFF_CANVAS: Point = Point::new(-100, -100);

#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PenKind {
    Rectangle,
    Ellipse,
    Arrow,
    Line,
    Text,
}

impl PenKind {
    pub fn edit_glyph(self) -> CursorGlyph {
        match self {
            PenKind::Text => CursorGlyph::Text,
            PenKind::Line => CursorGlyph::Pencil,
            PenKind::Rectangle | PenKind::Ellipse | PenKind::Arrow => CursorGlyph::Crosshair,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rect" | "rectangle" => Some(PenKind::Rectangle),
            "ellipse" | "circle" => Some(PenKind::Ellipse),
            "arrow" => Some(PenKind::Arrow),
            "line" | "pencil" | "freehand" => Some(PenKind::Line),
            "text" => Some(PenKind::Text),
            _ => None,
        }
    }
}

/// Stroke settings chosen in the pen editor. New pens start from these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenStyle {
    pub size: i32,
    pub colour: Colour,
    pub font: String,
}

impl Default for PenStyle {
    fn default() -> Self {
        Self {
            size: DEFAULT_PEN_SIZE,
            colour: DEFAULT_PEN_COLOUR,
            font: DEFAULT_PEN_FONT.to_string(),
        }
    }
}

impl PenStyle {
    /// Small / medium / large stroke presets relative to `base`.
    pub fn size_presets(base: i32) -> [i32; 3] {
        [base, base.saturating_mul(2), base.saturating_mul(4)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle,
    Ellipse,
    Arrow,
    /// Recorded points, newest first.
    Line { track: VecDeque<Point> },
    Text { font: String, content: Option<String> },
}

impl Shape {
    fn new(kind: PenKind, font: &str) -> Self {
        match kind {
            PenKind::Rectangle => Shape::Rectangle,
            PenKind::Ellipse => Shape::Ellipse,
            PenKind::Arrow => Shape::Arrow,
            PenKind::Line => Shape::Line { track: VecDeque::new() },
            PenKind::Text => Shape::Text {
                font: font.to_string(),
                content: None,
            },
        }
    }

    pub fn kind(&self) -> PenKind {
        match self {
            Shape::Rectangle => PenKind::Rectangle,
            Shape::Ellipse => PenKind::Ellipse,
            Shape::Arrow => PenKind::Arrow,
            Shape::Line { .. } => PenKind::Line,
            Shape::Text { .. } => PenKind::Text,
        }
    }

    fn record_point(&mut self, p: Point) {
        if let Shape::Line { track } = self {
            if track.front() != Some(&p) {
                track.push_front(p);
            }
        }
    }

    fn clear(&mut self) {
        match self {
            Shape::Line { track } => track.clear(),
            Shape::Text { content, .. } => *content = None,
            Shape::Rectangle | Shape::Ellipse | Shape::Arrow => {}
        }
    }

    fn render(&self, pen: &Pen, canvas: &mut dyn Canvas) {
        match self {
            Shape::Rectangle => draw_rectangle(pen, canvas),
            Shape::Ellipse => draw_ellipse(pen, canvas),
            Shape::Arrow => draw_arrow(pen, canvas),
            Shape::Line { track } => draw_line(pen, track, canvas),
            Shape::Text { font, content } => {
                if let Some(text) = content {
                    canvas.draw(DrawCommand::DrawText {
                        origin: PointF::new(
                            pen.start.x as f32,
                            (pen.start.y - CURSOR_SIZE / 2) as f32,
                        ),
                        font: font.clone(),
                        text: text.clone(),
                        colour: pen.colour,
                    });
                }
            }
        }
    }
}

/// One annotation. The controller owns a live one; history owns clones.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub start: Point,
    pub end: Point,
    pub size: i32,
    pub colour: Colour,
    /// Rectangle becomes a square, ellipse a circle, line a straight segment.
    pub square: bool,
    shape: Shape,
}

impl Pen {
    pub fn new(kind: PenKind) -> Self {
        Self::with_style(kind, &PenStyle::default())
    }

    /// Text pens have no stroke, so their size is always 0.
    pub fn with_style(kind: PenKind, style: &PenStyle) -> Self {
        Self {
            start: OFF_CANVAS,
            end: OFF_CANVAS,
            size: if kind == PenKind::Text { 0 } else { style.size.clamp(1, MAX_PEN_SIZE) },
            colour: style.colour,
            square: false,
            shape: Shape::new(kind, &style.font),
        }
    }

    pub fn kind(&self) -> PenKind {
        self.shape.kind()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn begin(&mut self, p: Point) {
        self.start = p;
        self.end = p;
    }

    pub fn save_track(&mut self, p: Point) {
        self.end = p;
        self.shape.record_point(p);
    }

    pub fn draw_track(&self, canvas: &mut dyn Canvas) {
        self.shape.render(self, canvas);
    }

    /// Drop the recorded payload and park the pen off-canvas for reuse.
    /// Style (size, colour, font) is kept.
    pub fn reset(&mut self) {
        self.shape.clear();
        self.start = OFF_CANVAS;
        self.end = OFF_CANVAS;
    }

    pub fn track(&self) -> Option<&VecDeque<Point>> {
        match &self.shape {
            Shape::Line { track } => Some(track),
            _ => None,
        }
    }

    pub fn font(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { font, .. } => Some(font),
            _ => None,
        }
    }

    pub fn set_font(&mut self, new_font: &str) {
        if let Shape::Text { font, .. } = &mut self.shape {
            *font = new_font.to_string();
        }
    }

    pub fn content(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { content, .. } => content.as_deref(),
            _ => None,
        }
    }

    pub fn set_content(&mut self, text: Option<String>) {
        if let Shape::Text { content, .. } = &mut self.shape {
            *content = text;
        }
    }

    pub fn is_parked(&self) -> bool {
        self.start == OFF_CANVAS && self.end == OFF_CANVAS
    }
}

fn draw_rectangle(pen: &Pen, canvas: &mut dyn Canvas) {
    let s = PointF::from(pen.start);
    let e = PointF::from(pen.end);
    let width = pen.size as f32;

    if !pen.square {
        canvas.draw(DrawCommand::StrokeRect {
            from: s,
            to: e,
            width,
            colour: pen.colour,
        });
        return;
    }

    // Square with start..end as its diagonal: the other two corners are the
    // half-diagonal rotated by 90 degrees around the midpoint.
    let m = PointF::midpoint(s, e);
    let (hx, hy) = ((e.x - s.x) / 2.0, (e.y - s.y) / 2.0);
    canvas.draw(DrawCommand::StrokePolyline {
        points: vec![
            s,
            PointF::new(m.x - hy, m.y + hx),
            e,
            PointF::new(m.x + hy, m.y - hx),
        ],
        closed: true,
        width,
        colour: pen.colour,
    });
}

fn draw_ellipse(pen: &Pen, canvas: &mut dyn Canvas) {
    let s = PointF::from(pen.start);
    let e = PointF::from(pen.end);
    let centre = PointF::midpoint(s, e);
    let dx = (e.x - s.x).abs();
    let dy = (e.y - s.y).abs();
    let width = pen.size as f32;

    if pen.square {
        let r = dx.max(dy) / 2.0;
        canvas.draw(DrawCommand::StrokeEllipse {
            centre,
            rx: r,
            ry: r,
            width,
            colour: pen.colour,
        });
    } else if dx > 0.0 && dy > 0.0 {
        canvas.draw(DrawCommand::StrokeEllipse {
            centre,
            rx: dx / 2.0,
            ry: dy / 2.0,
            width,
            colour: pen.colour,
        });
    } else {
        // Flat ellipse: nothing to scale, draw the degenerate box.
        canvas.draw(DrawCommand::StrokeRect {
            from: s,
            to: e,
            width,
            colour: pen.colour,
        });
    }
}

/// Arrow geometry: shaft from `start` to `shaft_end`, head triangle
/// `apex`/`left`/`right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    pub shaft_end: PointF,
    pub apex: PointF,
    pub left: PointF,
    pub right: PointF,
}

impl ArrowHead {
    pub fn new(start: Point, end: Point, size: i32) -> Self {
        let apex = PointF::from(end);
        let leg = SQRT_2 * 2.0 * size as f32;
        let a = end.x as f32 - start.x as f32;
        let b = end.y as f32 - start.y as f32;
        let len2 = a * a + b * b;

        // Zero-length arrow: point down-right, legs along -x and -y.
        if len2 < f32::EPSILON {
            return Self {
                shaft_end: apex,
                apex,
                left: PointF::new(apex.x - leg, apex.y),
                right: PointF::new(apex.x, apex.y - leg),
            };
        }

        let len = len2.sqrt();
        let (ux, uy) = (a / len, b / len);
        let (sin, cos) = FRAC_PI_4.sin_cos();
        let back = |rx: f32, ry: f32| PointF::new(apex.x - leg * rx, apex.y - leg * ry);

        Self {
            shaft_end: PointF::new(apex.x - ux * size as f32, apex.y - uy * size as f32),
            apex,
            left: back(ux * cos - uy * sin, ux * sin + uy * cos),
            right: back(ux * cos + uy * sin, uy * cos - ux * sin),
        }
    }
}

fn draw_arrow(pen: &Pen, canvas: &mut dyn Canvas) {
    let head = ArrowHead::new(pen.start, pen.end, pen.size);

    canvas.draw(DrawCommand::StrokePolyline {
        points: vec![PointF::from(pen.start), head.shaft_end],
        closed: false,
        width: pen.size as f32,
        colour: pen.colour,
    });
    canvas.draw(DrawCommand::FillPath {
        points: vec![head.apex, head.left, head.right],
        colour: pen.colour,
    });
}

fn draw_line(pen: &Pen, track: &VecDeque<Point>, canvas: &mut dyn Canvas) {
    let mut points = Vec::with_capacity(track.len() + 2);
    points.push(PointF::from(pen.end));
    if !pen.square {
        points.extend(track.iter().copied().map(PointF::from));
    }
    points.push(PointF::from(pen.start));

    canvas.draw(DrawCommand::StrokePolyline {
        points,
        closed: false,
        width: pen.size as f32,
        colour: pen.colour,
    });
}
