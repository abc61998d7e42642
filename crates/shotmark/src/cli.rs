// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use shotmark_core::{Colour, PenKind};

use crate::script::parse_colour;

#[derive(Debug, Parser)]
#[command(name = "shotmark", version, about = "Shotmark: select, annotate, export.")]
pub struct Args {
    /// Override IPC socket path (default: $XDG_RUNTIME_DIR/shotmark/shotmark.sock)
    #[arg(long)]
    pub socket: Option<PathBuf>,

    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/shotmark/shotmark.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Grab the screen and show the session
    Wake {
        /// Keep the previous selection and annotations
        #[arg(long)]
        keep: bool,
    },

    /// Hide the session
    Hide,

    /// Stop the daemon
    Quit,

    /// Show session status
    Status,

    /// Save the selection (default: timestamped file in the output dir)
    Save {
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },

    /// Copy the selection to the clipboard
    Copy,

    /// Pick an annotation tool; without one, put the current tool down
    Tool { tool: Option<PenKind> },

    /// Change the pen used for new annotations
    Style {
        #[arg(long)]
        size: Option<i32>,
        /// #RRGGBB or a palette name
        #[arg(long, value_parser = parse_colour)]
        colour: Option<Colour>,
        /// e.g. "Sans Bold 12"
        #[arg(long)]
        font: Option<String>,
    },

    /// Replay an event script against the running session
    Play { script: PathBuf },

    /// Print the draw commands of the current frame
    Frame,

    /// Replay an event script offline and write the result (no daemon needed)
    Render {
        /// Image standing in for the screen
        #[arg(long)]
        screen: PathBuf,
        #[arg(long)]
        script: PathBuf,
        #[arg(long, short = 'o')]
        out: PathBuf,
        /// TTF/OTF for text annotations and the info label
        #[arg(long)]
        font: Option<PathBuf>,
        /// Write the whole overlay instead of the selection
        #[arg(long)]
        frame: bool,
    },
}
