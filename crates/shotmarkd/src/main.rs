// Author: Dustin Pilgrim
// License: MIT

mod capture;
mod clipboard;
mod config;
mod daemon;
mod logging;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "shotmarkd", version, about = "Shotmark daemon: hosts the selection and annotation session")]
struct Args {
    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/shotmark/shotmarkd.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Use this image as the screen instead of the screenshot portal
    #[arg(long)]
    screen_image: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let log_path = args
        .log_file
        .unwrap_or_else(|| daemon::default_log_path("shotmarkd.log"));

    if let Err(e) = logging::init_logging(&log_path, args.verbose) {
        // logging is not up yet
        eprintln!("shotmarkd: failed to init logging: {e}");
        std::process::exit(1);
    }

    eventline::info!("shotmarkd starting");
    eventline::debug!("verbose={}", args.verbose);
    eventline::debug!("log_path={}", log_path.display());

    let opts = daemon::RunOptions {
        verbose: args.verbose,
        screen_image: args.screen_image,
    };

    if let Err(e) = daemon::run(opts) {
        eventline::error!("fatal error: {e}");
        std::process::exit(1);
    }
}
