// Author: Dustin Pilgrim
// License: MIT

use std::collections::VecDeque;
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

use shotmark_core::{Effect, InputEvent};

use crate::error::{IpcError, Result};
use crate::framing::{MAX_FRAME, recv_msg, send_msg};
use crate::protocol::{Event, IpcHello, Request, Response, SessionStatus, Wire, IPC_VERSION};

pub struct IpcClient {
    stream: UnixStream,
    pending_events: VecDeque<Event>,
}

impl IpcClient {
    pub fn connect(socket_path: impl AsRef<Path>) -> Result<Self> {
        let stream = UnixStream::connect(socket_path)?;
        let mut this = Self {
            stream,
            pending_events: VecDeque::new(),
        };

        match this.call(Request::Hello(IpcHello { version: IPC_VERSION }))? {
            Response::Ok => Ok(this),
            Response::Error { message } => Err(IpcError::Remote(message)),
            other => Err(IpcError::Unexpected(format!("{other:?}"))),
        }
    }

    /// Bound how long `call` may block on a silent daemon.
    pub fn set_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.stream.set_read_timeout(timeout)?;
        self.stream.set_write_timeout(timeout)?;
        Ok(())
    }

    /// Send one request and wait for its response. Events that arrive first
    /// are queued for `next_event`.
    pub fn call(&mut self, req: Request) -> Result<Response> {
        send_msg(&mut self.stream, &req)?;

        loop {
            match recv_msg::<_, Wire>(&mut self.stream, MAX_FRAME)? {
                Wire::Response(Response::Error { message }) => return Err(IpcError::Remote(message)),
                Wire::Response(resp) => return Ok(resp),
                Wire::Event(ev) => self.pending_events.push_back(ev),
            }
        }
    }

    pub fn next_event(&mut self) -> Result<Event> {
        if let Some(ev) = self.pending_events.pop_front() {
            return Ok(ev);
        }

        loop {
            if let Wire::Event(ev) = recv_msg::<_, Wire>(&mut self.stream, MAX_FRAME)? {
                return Ok(ev);
            }
        }
    }

    /// Events received so far without blocking.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.pending_events.drain(..).collect()
    }

    pub fn status(&mut self) -> Result<SessionStatus> {
        match self.call(Request::Status)? {
            Response::Status(st) => Ok(st),
            other => Err(IpcError::Unexpected(format!("{other:?}"))),
        }
    }

    pub fn send_input(&mut self, event: InputEvent) -> Result<Vec<Effect>> {
        self.effects(Request::Input { event })
    }

    pub fn effects(&mut self, req: Request) -> Result<Vec<Effect>> {
        match self.call(req)? {
            Response::Effects { effects } => Ok(effects),
            Response::Ok => Ok(Vec::new()),
            other => Err(IpcError::Unexpected(format!("{other:?}"))),
        }
    }

    pub fn save(&mut self, path: Option<String>) -> Result<String> {
        match self.call(Request::Save { path })? {
            Response::Saved { path } => Ok(path),
            other => Err(IpcError::Unexpected(format!("{other:?}"))),
        }
    }
}
