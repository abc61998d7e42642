// Author: Dustin Pilgrim
// License: MIT

use std::borrow::Cow;

use arboard::{Clipboard, ImageData};
use eventline::{debug, info};
use image::RgbaImage;

/// Lazily opened clipboard handle. The handle is kept alive after the first
/// copy: on X11 the contents vanish when the owner drops it.
#[derive(Default)]
pub struct ClipboardSink {
    inner: Option<Clipboard>,
}

impl ClipboardSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy_image(&mut self, img: &RgbaImage) -> Result<(), String> {
        if self.inner.is_none() {
            debug!("opening clipboard");
            self.inner = Some(Clipboard::new().map_err(|e| format!("clipboard: {e}"))?);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err("clipboard unavailable".into());
        };

        clipboard
            .set_image(ImageData {
                width: img.width() as usize,
                height: img.height() as usize,
                bytes: Cow::Borrowed(img.as_raw()),
            })
            .map_err(|e| format!("clipboard: {e}"))?;

        info!("copied {}x{} to clipboard", img.width(), img.height());
        Ok(())
    }
}
