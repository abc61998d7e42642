// Author: Dustin Pilgrim
// License: MIT

pub mod ipc;
pub mod print;
pub mod run;
