// Author: Dustin Pilgrim
// License: MIT

mod cli;
mod client;
mod logging;
mod paths;
mod render;
mod script;

use clap::Parser;

fn main() {
    let args = cli::Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| paths::default_log_path("shotmark.log"));

    if let Err(e) = logging::init_logging(&log_path, args.verbose) {
        // logging should never block normal usage
        eprintln!("shotmark: failed to init logging: {e}");
    }

    if let Err(e) = client::run::run(args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
