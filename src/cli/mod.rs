//! CLI module
//!
//! Command-line interface over corpus files.
//!
//! # Commands
//!
//! - `check` - Validate a corpus and print the diagnostic report
//! - `schema` - Print the validated view definitions

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
