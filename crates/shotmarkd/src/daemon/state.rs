// Author: Dustin Pilgrim
// License: MIT

use image::RgbaImage;
use shotmark_core::{FontBook, Rect, Shot};

use crate::capture::ScreenSource;
use crate::clipboard::ClipboardSink;
use crate::config::ShotmarkConfig;

/// Everything one daemon process owns. There is a single session; clients
/// come and go but drive the same `Shot`.
pub struct DaemonState {
    pub cfg: ShotmarkConfig,
    pub source: ScreenSource,
    pub shot: Shot,
    /// Pixels grabbed by the last wake.
    pub screen: Option<RgbaImage>,
    pub fonts: FontBook,
    pub clipboard: ClipboardSink,
    /// Desktop notifications on save/copy results.
    pub notifications: bool,
    pub quit: bool,
}

impl DaemonState {
    pub fn new(cfg: ShotmarkConfig, source: ScreenSource, fonts: FontBook) -> Self {
        let shot = Shot::new(cfg.shot.clone(), Rect::default());
        Self {
            cfg,
            source,
            shot,
            screen: None,
            fonts,
            clipboard: ClipboardSink::new(),
            notifications: true,
            quit: false,
        }
    }
}
