// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use eventline::runtime::{self, LogLevel};

pub fn init_logging(log_path: &Path, verbose: bool) -> Result<(), String> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| format!("create log dir: {e}"))?;
    }

    async_io::block_on(runtime::init());

    runtime::enable_file_output(log_path).map_err(|e| format!("enable file output: {e}"))?;

    // console only when verbose
    runtime::enable_console_output(verbose);
    runtime::enable_console_color(verbose);

    runtime::set_log_level(if verbose { LogLevel::Debug } else { LogLevel::Info });

    Ok(())
}
