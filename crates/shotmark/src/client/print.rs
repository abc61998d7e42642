// Author: Dustin Pilgrim
// License: MIT

use shotmark_core::DrawCommand;
use shotmark_ipc::{Event, Response, SessionStatus};

pub fn print_response(resp: Response) {
    match resp {
        Response::Ok => println!("ok"),

        Response::Status(st) => print_status(&st),

        Response::Effects { effects } => {
            for e in effects {
                println!("effect: {e:?}");
            }
        }

        Response::Frame {
            width,
            height,
            commands,
        } => print_frame(width, height, &commands),

        Response::Saved { path } => println!("{path}"),

        Response::Error { message } => eprintln!("error: {message}"),
    }
}

pub fn print_status(st: &SessionStatus) {
    println!("visible: {}", st.visible);
    println!("mode: {}", st.mode);
    match st.section {
        Some(r) => println!("selection: {}x{} at ({}, {})", r.w, r.h, r.x, r.y),
        None => println!("selection: none"),
    }
    println!("annotations: {}", st.annotations);
}

pub fn print_frame(width: u32, height: u32, commands: &[DrawCommand]) {
    println!("frame {width}x{height}, {} commands", commands.len());
    for c in commands {
        println!("  {c:?}");
    }
}

pub fn print_event(ev: &Event) {
    match ev {
        Event::Shown => println!("shown"),
        Event::Hidden => println!("hidden"),
        Event::Saved { path } => println!("saved to: {path}"),
        Event::SaveFailed { message } => eprintln!("save failed: {message}"),
        Event::Copied => println!("copied to clipboard"),
        Event::CopyFailed { message } => eprintln!("copy failed: {message}"),
        Event::Quitting => println!("daemon stopping"),
    }
}
