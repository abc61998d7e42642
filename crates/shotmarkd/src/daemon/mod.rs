// Author: Dustin Pilgrim
// License: MIT

pub mod handlers;
pub mod instance_lock;
pub mod notify;
pub mod paths;
pub mod server;
pub mod signals;
pub mod state;

pub use paths::default_log_path;
pub use server::{RunOptions, run};
