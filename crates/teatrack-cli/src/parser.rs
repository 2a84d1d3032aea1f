//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the tea and coffee factory price directory.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "teatrack")]
#[command(about = "Tea and coffee factory price directory")]
#[command(version)]
pub struct Cli {
    /// Use this database file instead of the resolved default
    #[arg(long = "database", global = true, env = "TEATRACK_DATABASE")]
    pub database: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
