//! Interactive command-line interface
//!
//! Bridges line input to the execution engine: `args` defines the command
//! grammar with clap, `repl` owns the input loop and printing.

pub mod args;
pub mod repl;

pub use args::{ReplCli, ReplCommand};
pub use repl::{handle_line, run, CliView};
