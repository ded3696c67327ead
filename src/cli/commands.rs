//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// View schema generator CLI
#[derive(Parser, Debug)]
#[command(name = "viewgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Generator configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Namespace every generated class is placed under
    #[arg(short = 'p', long, global = true)]
    pub namespace_prefix: Option<String>,

    /// Prefix prepended to every generated class name
    #[arg(short = 'n', long, global = true)]
    pub name_prefix: Option<String>,

    /// Refuse the reference-or-string loosening
    #[arg(long, global = true)]
    pub strict: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a corpus and print every error and warning
    Check {
        /// JSON corpus files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the validated view definitions with their imports
    Schema {
        /// JSON corpus files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
