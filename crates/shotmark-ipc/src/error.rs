// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IpcError>;

#[derive(Debug, Error)]
pub enum IpcError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Ser(#[from] postcard::Error),

    #[error("frame of {len} bytes exceeds limit of {max}")]
    FrameTooLarge { len: usize, max: usize },

    #[error("version mismatch (client {client}, server {server})")]
    VersionMismatch { client: u32, server: u32 },

    #[error("daemon returned error: {0}")]
    Remote(String),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}
