// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use shotmark_ipc::{IpcClient, Request, Response};

use eventline::{debug, info};

use crate::cli::{Args, Cmd};
use crate::paths;
use crate::render::{self, RenderJob};
use crate::script;

use super::{ipc, print};

pub fn run(args: Args) -> Result<(), String> {
    info!("starting client");
    debug!("parsed args: {:?}", args.cmd);

    // offline: no daemon involved
    if let Cmd::Render {
        screen,
        script,
        out,
        font,
        frame,
    } = args.cmd
    {
        let job = RenderJob {
            screen,
            script,
            out,
            font,
            frame,
        };
        render::run(&job)?;
        println!("{}", job.out.display());
        return Ok(());
    }

    let socket = args.socket.unwrap_or_else(paths::default_socket_path);
    debug!("socket: {}", socket.display());

    let mut client = ipc::connect(&socket)?;
    info!("connected to daemon");

    match args.cmd {
        Cmd::Wake { keep } => call(&mut client, Request::Wake { clean: !keep }),
        Cmd::Hide => call(&mut client, Request::Hide),
        Cmd::Quit => call(&mut client, Request::Quit),

        Cmd::Status => {
            let st = client.status().map_err(|e| format!("{e}"))?;
            print::print_status(&st);
            Ok(())
        }

        Cmd::Save { out } => {
            let out = out.map(|p| p.display().to_string());
            let path = client.save(out);
            flush_events(&mut client);
            println!("{}", path.map_err(|e| format!("{e}"))?);
            Ok(())
        }

        Cmd::Copy => call(&mut client, Request::CopyToClipboard),

        Cmd::Tool { tool } => call(&mut client, Request::SelectTool { tool }),

        Cmd::Style { size, colour, font } => {
            if size.is_none() && colour.is_none() && font.is_none() {
                return Err("style: nothing to change (use --size, --colour or --font)".into());
            }
            call(&mut client, Request::SetPenStyle { size, colour, font })
        }

        Cmd::Play { script } => play(&mut client, &script),

        Cmd::Frame => call(&mut client, Request::Frame),

        Cmd::Render { .. } => unreachable!("handled before connecting"),
    }
}

/// One request; events that came with it are printed first.
fn call(client: &mut IpcClient, req: Request) -> Result<(), String> {
    let resp = client.call(req);
    flush_events(client);
    print_if_interesting(resp.map_err(|e| format!("{e}"))?);
    Ok(())
}

fn play(client: &mut IpcClient, path: &Path) -> Result<(), String> {
    let src = std::fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
    let steps = script::parse(&src).map_err(|e| format!("{}: {e}", path.display()))?;
    info!("playing {} steps from {}", steps.len(), path.display());

    for (i, step) in steps.iter().enumerate() {
        let resp = client.call(step.to_request());
        flush_events(client);
        resp.map_err(|e| format!("step {}: {e}", i + 1))?;
    }
    Ok(())
}

fn flush_events(client: &mut IpcClient) {
    for ev in client.drain_events() {
        debug!("event: {:?}", ev);
        print::print_event(&ev);
    }
}

// effect lists are frontend chatter; only show them when logging verbosely
fn print_if_interesting(resp: Response) {
    match resp {
        Response::Effects { effects } => debug!("effects: {:?}", effects),
        other => print::print_response(other),
    }
}
