// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;
use std::time::Duration;

use eventline::{debug, info, warn};
use shotmark_core::FontBook;
use shotmark_ipc::{ClientConn, IpcServer};

use crate::capture::ScreenSource;
use crate::config::{self, ShotmarkConfig};

use super::handlers::handle_request;
use super::instance_lock::{InstanceLock, LockError};
use super::paths::{default_socket_path, ensure_parent_dir, output_dir_from_cfg, output_dir_override};
use super::signals;
use super::state::DaemonState;

const IDLE_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Default)]
pub struct RunOptions {
    pub verbose: bool,
    /// Replaces the portal (and config `screen_image`) as the screen source.
    pub screen_image: Option<PathBuf>,
}

pub fn run(opts: RunOptions) -> Result<(), String> {
    let cfg = match config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!("failed to load config (using defaults): {e}");
            ShotmarkConfig::default()
        }
    };

    let sock = default_socket_path();
    info!("socket path: {}", sock.display());
    ensure_parent_dir(&sock).map_err(|e| e.to_string())?;

    let _lock = match InstanceLock::acquire_for_socket(&sock) {
        Ok(l) => {
            debug!("acquired singleton lock at {}", l.path().display());
            l
        }
        Err(e @ LockError::AlreadyRunning(_)) => {
            warn!("{e}");
            if !opts.verbose {
                eprintln!("shotmarkd: {e}");
            }
            return Ok(());
        }
        Err(e) => return Err(format!("failed to acquire singleton lock: {e}")),
    };

    let out_dir = output_dir_from_cfg(&cfg);
    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        warn!("failed to create output dir '{}': {e}", out_dir.display());
    }
    info!(
        "SHOTMARK_DIR={}",
        output_dir_override()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    info!("output dir={}", out_dir.display());

    let source = ScreenSource::from_option(opts.screen_image.or_else(|| cfg.screen_image.clone()));
    info!("screen source={:?}", source);

    let fonts = FontBook::discover(cfg.font_path.as_deref());
    let mut state = DaemonState::new(cfg, source, fonts);

    signals::install()?;

    let server = IpcServer::bind(&sock).map_err(|e| e.to_string())?;
    info!("listening on {}", server.socket_path().display());

    serve(&server, &mut state);

    info!("daemon shutting down");
    Ok(())
}

/// Accept clients one at a time until asked to stop.
fn serve(server: &IpcServer, state: &mut DaemonState) {
    loop {
        if state.quit {
            info!("quit requested by client");
            break;
        }
        if signals::shutdown_requested() {
            info!("shutdown requested by signal");
            break;
        }

        let conn = match server.try_accept() {
            Ok(Some(c)) => c,
            Ok(None) => {
                std::thread::sleep(IDLE_POLL);
                continue;
            }
            Err(e) => {
                warn!("accept error: {e}");
                std::thread::sleep(IDLE_POLL * 4);
                continue;
            }
        };

        info!("client connected");
        if let Err(e) = serve_client(conn, state) {
            debug!("client session ended: {e}");
        }
        info!("client disconnected");
    }
}

fn serve_client(mut conn: ClientConn, state: &mut DaemonState) -> shotmark_ipc::Result<()> {
    conn.handshake()?;

    loop {
        let req = conn.recv()?;
        debug!("request: {:?}", req);

        let resp = handle_request(state, req, &mut |ev| {
            debug!("event: {:?}", ev);
            if let Err(e) = conn.send_event(ev) {
                warn!("failed to send event: {e}");
            }
        });
        debug!("response: {:?}", resp);
        conn.send(resp)?;

        if state.quit || signals::shutdown_requested() {
            return Ok(());
        }
    }
}
