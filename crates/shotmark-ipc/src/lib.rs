// Author: Dustin Pilgrim
// License: MIT

pub mod protocol;
pub mod framing;
pub mod client;
pub mod server;
pub mod error;

pub use protocol::{Event, IpcHello, Request, Response, SessionStatus, Wire, IPC_VERSION};
pub use client::IpcClient;
pub use server::{ClientConn, IpcServer};
pub use error::{IpcError, Result};
