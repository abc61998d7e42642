// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShotError {
    #[error("no visible selection")]
    NoSelection,

    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("invalid font {path}: {reason}")]
    Font { path: PathBuf, reason: String },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShotError>;
