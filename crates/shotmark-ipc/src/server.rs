// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};

use crate::error::{IpcError, Result};
use crate::framing::{MAX_FRAME, recv_msg, send_msg};
use crate::protocol::{Event, Request, Response, Wire, IPC_VERSION};

/// Non-blocking listener; the owner polls `try_accept` from its loop.
pub struct IpcServer {
    listener: UnixListener,
    socket_path: PathBuf,
}

pub struct ClientConn {
    stream: UnixStream,
}

impl IpcServer {
    pub fn bind(socket_path: impl AsRef<Path>) -> Result<Self> {
        let socket_path = socket_path.as_ref().to_path_buf();

        // a leftover socket from a dead daemon blocks bind
        let _ = fs::remove_file(&socket_path);

        let listener = UnixListener::bind(&socket_path)?;
        listener.set_nonblocking(true)?;
        Ok(Self {
            listener,
            socket_path,
        })
    }

    /// `Ok(None)` when nobody is waiting.
    pub fn try_accept(&self) -> Result<Option<ClientConn>> {
        match self.listener.accept() {
            Ok((stream, _addr)) => {
                // connections themselves are served blocking
                stream.set_nonblocking(false)?;
                Ok(Some(ClientConn { stream }))
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.socket_path);
    }
}

impl ClientConn {
    pub fn recv(&mut self) -> Result<Request> {
        recv_msg(&mut self.stream, MAX_FRAME)
    }

    pub fn send(&mut self, resp: Response) -> Result<()> {
        send_msg(&mut self.stream, &Wire::Response(resp))
    }

    pub fn send_event(&mut self, ev: Event) -> Result<()> {
        send_msg(&mut self.stream, &Wire::Event(ev))
    }

    /// First request must be a matching hello. A mismatch is reported to
    /// the client before the connection is dropped.
    pub fn handshake(&mut self) -> Result<()> {
        match self.recv()? {
            Request::Hello(h) if h.version == IPC_VERSION => self.send(Response::Ok),
            Request::Hello(h) => {
                let err = IpcError::VersionMismatch {
                    client: h.version,
                    server: IPC_VERSION,
                };
                let _ = self.send(Response::Error {
                    message: err.to_string(),
                });
                Err(err)
            }
            _ => {
                self.send(Response::Error {
                    message: "expected hello".into(),
                })?;
                Err(IpcError::Unexpected("request before hello".into()))
            }
        }
    }
}
