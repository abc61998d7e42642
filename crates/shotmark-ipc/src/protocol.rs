// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};
use shotmark_core::{Colour, DrawCommand, Effect, InputEvent, Mode, PenKind, Rect};

pub const IPC_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Wire {
    Response(Response),
    Event(Event),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcHello {
    pub version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Request {
    Hello(IpcHello),

    /// Grab the screen again and show the overlay.
    /// `clean` drops the previous selection and annotations.
    Wake { clean: bool },

    Hide,

    /// Stop the daemon.
    Quit,

    Status,

    /// Frontend → daemon: one pointer or key event.
    Input { event: InputEvent },

    /// `None` puts the current tool down.
    SelectTool { tool: Option<PenKind> },

    SetPenStyle {
        size: Option<i32>,
        colour: Option<Colour>,
        font: Option<String>,
    },

    /// Text typed into the entry popup.
    InsertText { text: String },

    /// Draw commands for the current frame.
    Frame,

    /// Save the selection. `None` uses a timestamped name in the output dir.
    Save { path: Option<String> },

    CopyToClipboard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub visible: bool,
    pub mode: Mode,
    pub section: Option<Rect>,
    pub annotations: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Response {
    Ok,

    Status(SessionStatus),

    /// What the frontend has to do in reply to input.
    Effects { effects: Vec<Effect> },

    Frame {
        width: u32,
        height: u32,
        commands: Vec<DrawCommand>,
    },

    Saved { path: String },

    Error { message: String },
}

/// Daemon → client notifications, interleaved with responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Shown,
    Hidden,
    Saved { path: String },
    SaveFailed { message: String },
    Copied,
    CopyFailed { message: String },
    Quitting,
}
