// Author: Dustin Pilgrim
// License: MIT

//! Event scripts: one step per line, replayed against a session.
//!
//! ```text
//! # select, then draw an arrow
//! down 100 100
//! drag 400 300
//! up 400 300
//! tool arrow
//! colour #00aaff
//! click 150 150
//! key ctrl+s
//! ```
//!
//! Pointer steps take screen coordinates: `hover`, `down`, `drag` (alias
//! `move`), `up`, `double`, and `click` (down + up). `key` takes a single
//! character or one of `up down left right ctrl enter escape backspace`,
//! optionally prefixed with `ctrl+`. `type` and `font` take the rest of the
//! line verbatim.

use shotmark_core::colour::palette_colour;
use shotmark_core::{Colour, Effect, InputEvent, Key, KeyEvent, PenKind, PointerEvent, Shot};
use shotmark_ipc::Request;

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Input(InputEvent),
    /// `None` puts the tool down.
    Tool(Option<PenKind>),
    Type(String),
    Colour(Colour),
    Size(i32),
    Font(String),
}

impl Step {
    /// Run against a local session.
    pub fn apply(&self, shot: &mut Shot, emit: &mut dyn FnMut(Effect)) {
        match self {
            Step::Input(ev) => shot.handle(ev, emit),
            Step::Tool(kind) => shot.select_tool(*kind, emit),
            Step::Type(text) => shot.insert_text(text),
            Step::Colour(c) => shot.set_pen_colour(*c),
            Step::Size(n) => shot.set_pen_size(*n),
            Step::Font(f) => shot.set_pen_font(f),
        }
    }

    /// The same step as a daemon request.
    pub fn to_request(&self) -> Request {
        match self {
            Step::Input(ev) => Request::Input { event: *ev },
            Step::Tool(kind) => Request::SelectTool { tool: *kind },
            Step::Type(text) => Request::InsertText { text: text.clone() },
            Step::Colour(c) => Request::SetPenStyle {
                size: None,
                colour: Some(*c),
                font: None,
            },
            Step::Size(n) => Request::SetPenStyle {
                size: Some(*n),
                colour: None,
                font: None,
            },
            Step::Font(f) => Request::SetPenStyle {
                size: None,
                colour: None,
                font: Some(f.clone()),
            },
        }
    }
}

pub fn parse(src: &str) -> Result<Vec<Step>, String> {
    let mut steps = Vec::new();
    for (i, line) in src.lines().enumerate() {
        parse_line(line, &mut steps).map_err(|e| format!("line {}: {e}", i + 1))?;
    }
    Ok(steps)
}

fn parse_line(line: &str, out: &mut Vec<Step>) -> Result<(), String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(());
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "hover" => {
            let (x, y) = coords(rest)?;
            out.push(Step::Input(InputEvent::PointerMove(PointerEvent::hover(x, y))));
        }
        "down" => {
            let (x, y) = coords(rest)?;
            out.push(Step::Input(InputEvent::PointerDown(PointerEvent::primary(x, y))));
        }
        "drag" | "move" => {
            let (x, y) = coords(rest)?;
            out.push(Step::Input(InputEvent::PointerMove(PointerEvent::primary(x, y))));
        }
        "up" => {
            let (x, y) = coords(rest)?;
            out.push(Step::Input(InputEvent::PointerUp(PointerEvent::primary(x, y))));
        }
        "double" => {
            let (x, y) = coords(rest)?;
            out.push(Step::Input(InputEvent::PointerDown(PointerEvent::double(x, y))));
        }
        "click" => {
            let (x, y) = coords(rest)?;
            out.push(Step::Input(InputEvent::PointerDown(PointerEvent::primary(x, y))));
            out.push(Step::Input(InputEvent::PointerUp(PointerEvent::primary(x, y))));
        }
        "key" => out.push(Step::Input(InputEvent::KeyPress(key(rest)?))),
        "tool" => {
            let tool = match rest.to_ascii_lowercase().as_str() {
                "" => return Err("tool needs a kind or `none`".into()),
                "none" | "off" => None,
                other => Some(PenKind::parse(other).ok_or_else(|| format!("unknown tool `{other}`"))?),
            };
            out.push(Step::Tool(tool));
        }
        "type" => out.push(Step::Type(rest.to_string())),
        "colour" | "color" => out.push(Step::Colour(parse_colour(rest)?)),
        "size" => {
            let n = rest
                .parse::<i32>()
                .map_err(|_| format!("size expects an integer, got `{rest}`"))?;
            out.push(Step::Size(n));
        }
        "font" => {
            if rest.is_empty() {
                return Err("font needs a description".into());
            }
            out.push(Step::Font(rest.to_string()));
        }
        other => return Err(format!("unknown step `{other}`")),
    }
    Ok(())
}

fn coords(rest: &str) -> Result<(i32, i32), String> {
    let mut it = rest.split_whitespace().map(str::parse::<i32>);
    match (it.next(), it.next(), it.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) => Ok((x, y)),
        _ => Err(format!("expected `X Y`, got `{rest}`")),
    }
}

fn key(spec: &str) -> Result<KeyEvent, String> {
    let (ctrl, name) = match spec.get(..5) {
        Some(prefix) if prefix.eq_ignore_ascii_case("ctrl+") => (true, &spec[5..]),
        _ => (false, spec),
    };

    let key = match name.to_ascii_lowercase().as_str() {
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "ctrl" | "control" => Key::Control,
        "enter" | "return" => Key::Enter,
        "escape" | "esc" => Key::Escape,
        "backspace" => Key::Backspace,
        "space" => Key::Char(' '),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                _ => return Err(format!("unknown key `{spec}`")),
            }
        }
    };

    Ok(if ctrl { KeyEvent::ctrl(key) } else { KeyEvent::plain(key) })
}

/// `#RRGGBB` or a palette name such as `dark blue`.
pub fn parse_colour(spec: &str) -> Result<Colour, String> {
    let spec = spec.trim();
    if spec.starts_with('#') {
        return Colour::parse_hex(spec);
    }
    palette_colour(spec).ok_or_else(|| format!("unknown colour `{spec}`"))
}
