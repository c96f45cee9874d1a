//! Terminal front end for LilyPad word-ladder puzzles.
//!
//! - [`cli`]: argument parsing and config resolution
//! - [`shell`]: the interactive `play` loop
//! - [`solve`]: the one-shot `solve` lookup

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod shell;
pub mod solve;

pub use cli::{Cli, Command};
pub use shell::{ParseCommandError, Shell, ShellCommand, render_state};
pub use solve::{SolveReport, solve_words};
