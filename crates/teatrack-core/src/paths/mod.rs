//! Path utilities for teatrack data directories.
//!
//! This module provides the canonical path resolution for all teatrack components:
//! - Application data root
//! - `SQLite` database location
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately
//! - OS-specific logic is kept private in `platform`

mod database;
mod error;
mod platform;
mod resolver;

#[cfg(test)]
mod test_utils;

pub use database::{DATABASE_ENV, DATABASE_FILE_NAME, database_path};
pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root};
pub use resolver::ResolvedPaths;
