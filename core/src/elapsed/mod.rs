//! `elapsed`: runs a command, relays its output, and keeps a live
//! elapsed-time status line under it.

pub mod format;
pub mod runner;
mod status;

pub use format::{Format, ParseFormatError, DEFAULT_FORMAT};
pub use runner::{normalize_exit, relay, run_command, RunOptions};
