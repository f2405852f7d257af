//! Command-line interface

pub mod args;

pub use args::{command_line, Args, LogLevel, SubCommand};
