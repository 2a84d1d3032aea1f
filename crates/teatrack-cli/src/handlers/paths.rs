//! Paths command handler.
//!
//! Displays all resolved paths for diagnostics and debugging.

use anyhow::Result;
use teatrack_core::ResolvedPaths;

use crate::error::CliError;

/// Print resolved paths in `key = value` format.
pub fn execute() -> Result<()> {
    let paths = ResolvedPaths::resolve().map_err(CliError::from)?;
    println!("{paths}");
    Ok(())
}
