// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use shotmark_core::export::{save_section, section_pixels};
use shotmark_core::{DrawCommand, Effect, Rect};
use shotmark_ipc::{Event, Request, Response, SessionStatus};

use eventline::{debug, error, info, warn};

use crate::capture;

use super::notify::Notification;
use super::paths::default_output_path;
use super::state::DaemonState;

/// Serve one request. Events for the client go out through `emit` before the
/// response is sent.
pub fn handle_request(state: &mut DaemonState, req: Request, emit: &mut dyn FnMut(Event)) -> Response {
    match req {
        Request::Hello(_) => Response::Ok,

        Request::Status => Response::Status(status(state)),

        Request::Wake { clean } => wake(state, clean, emit),

        Request::Hide => {
            let effects = collect(|e| state.shot.hide(e));
            respond(state, effects, emit)
        }

        Request::Quit => {
            info!("quit requested");
            state.quit = true;
            emit(Event::Quitting);
            Response::Ok
        }

        Request::Input { event } => {
            if !state.shot.is_visible() {
                return Response::Error {
                    message: "no active session (wake first)".into(),
                };
            }
            let effects = state.shot.dispatch(&event);
            respond(state, effects, emit)
        }

        Request::SelectTool { tool } => {
            let effects = collect(|e| state.shot.select_tool(tool, e));
            respond(state, effects, emit)
        }

        Request::SetPenStyle { size, colour, font } => {
            if let Some(size) = size {
                state.shot.set_pen_size(size);
            }
            if let Some(colour) = colour {
                state.shot.set_pen_colour(colour);
            }
            if let Some(font) = font {
                state.shot.set_pen_font(&font);
            }
            debug!("pen style={:?}", state.shot.style());
            Response::Ok
        }

        Request::InsertText { text } => {
            state.shot.insert_text(&text);
            Response::Ok
        }

        Request::Frame => {
            let mut commands: Vec<DrawCommand> = Vec::new();
            state.shot.render(&mut commands);
            let screen = state.shot.screen();
            Response::Frame {
                width: screen.w.max(0) as u32,
                height: screen.h.max(0) as u32,
                commands,
            }
        }

        Request::Save { path } => match save(state, path.map(PathBuf::from), emit) {
            Ok(path) => Response::Saved {
                path: path.display().to_string(),
            },
            Err(message) => Response::Error { message },
        },

        Request::CopyToClipboard => match copy(state, emit) {
            Ok(()) => Response::Ok,
            Err(message) => Response::Error { message },
        },
    }
}

fn status(state: &DaemonState) -> SessionStatus {
    SessionStatus {
        visible: state.shot.is_visible(),
        mode: state.shot.mode(),
        section: state.shot.section_bounds(),
        annotations: state.shot.history().len(),
    }
}

fn wake(state: &mut DaemonState, clean: bool, emit: &mut dyn FnMut(Event)) -> Response {
    let screen = match capture::grab(&state.source) {
        Ok(img) => img,
        Err(message) => {
            error!("screen grab failed: {message}");
            announce(state, Notification::failed(&message));
            return Response::Error { message };
        }
    };

    info!("wake clean={} screen={}x{}", clean, screen.width(), screen.height());
    state
        .shot
        .set_screen(Rect::new(0, 0, screen.width() as i32, screen.height() as i32));
    state.screen = Some(screen);

    let effects = collect(|e| state.shot.show(clean, e));
    emit(Event::Shown);
    respond(state, effects, emit)
}

/// Perform the effects that belong to the daemon; hand the rest back to the
/// frontend in order.
fn respond(state: &mut DaemonState, effects: Vec<Effect>, emit: &mut dyn FnMut(Event)) -> Response {
    let mut forward = Vec::with_capacity(effects.len());

    for effect in effects {
        match effect {
            Effect::CopyToClipboard => {
                // failure is already reported through events
                let _ = copy(state, emit);
            }
            Effect::SaveToFile => {
                // a keyboard save ends the session
                if save(state, None, emit).is_ok() {
                    forward.extend(collect(|e| state.shot.hide(e)));
                    emit(Event::Hidden);
                }
            }
            Effect::Hide => {
                emit(Event::Hidden);
                forward.push(effect);
            }
            Effect::Quit => {
                info!("quit from session");
                state.quit = true;
                emit(Event::Quitting);
                forward.push(effect);
            }
            other => forward.push(other),
        }
    }

    Response::Effects { effects: forward }
}

fn save(state: &mut DaemonState, path: Option<PathBuf>, emit: &mut dyn FnMut(Event)) -> Result<PathBuf, String> {
    let path = path.unwrap_or_else(|| default_output_path(&state.cfg, "png"));

    let result = match state.screen.as_ref() {
        None => Err("nothing captured yet (wake first)".to_string()),
        Some(screen) => save_section(&state.shot, screen, &state.fonts, &path).map_err(|e| e.to_string()),
    };

    match result {
        Ok(()) => {
            emit(Event::Saved {
                path: path.display().to_string(),
            });
            announce(state, Notification::saved(&path));
            Ok(path)
        }
        Err(message) => {
            error!("save failed: {message}");
            emit(Event::SaveFailed {
                message: message.clone(),
            });
            announce(state, Notification::failed(&message));
            Err(message)
        }
    }
}

fn copy(state: &mut DaemonState, emit: &mut dyn FnMut(Event)) -> Result<(), String> {
    let result = match state.screen.as_ref() {
        None => Err("nothing captured yet (wake first)".to_string()),
        Some(screen) => match section_pixels(&state.shot, screen, &state.fonts) {
            Ok(Some(img)) => state.clipboard.copy_image(&img),
            Ok(None) => Err("no selection to copy".to_string()),
            Err(e) => Err(e.to_string()),
        },
    };

    match result {
        Ok(()) => {
            emit(Event::Copied);
            announce(state, Notification::copied());
            Ok(())
        }
        Err(message) => {
            error!("copy failed: {message}");
            emit(Event::CopyFailed {
                message: message.clone(),
            });
            announce(state, Notification::failed(&message));
            Err(message)
        }
    }
}

/// Best-effort desktop notification.
fn announce(state: &DaemonState, n: Notification) {
    if !state.notifications {
        return;
    }
    if let Err(e) = n.send() {
        warn!("{e}");
    }
}

fn collect(f: impl FnOnce(&mut dyn FnMut(Effect))) -> Vec<Effect> {
    let mut out = Vec::new();
    f(&mut |e| out.push(e));
    out
}
