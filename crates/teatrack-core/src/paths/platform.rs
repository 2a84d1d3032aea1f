//! Platform-specific data root resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "TEATRACK_DATA_DIR";

/// Detect if we are running from the local repository.
///
/// Debug builds always use the repository they were built from, so
/// `cargo run` keeps its database under the checkout.
#[cfg(debug_assertions)]
fn detect_local_repo() -> Option<PathBuf> {
    let repo_root = PathBuf::from(env!("TEATRACK_REPO_ROOT"));
    repo_root.join("Cargo.toml").exists().then_some(repo_root)
}

#[cfg(not(debug_assertions))]
const fn detect_local_repo() -> Option<PathBuf> {
    None
}

/// Get the root directory for application data.
///
/// Resolution order:
/// 1. `TEATRACK_DATA_DIR` environment variable (highest priority)
/// 2. Local repository (debug builds only)
/// 3. System data directory (e.g., `~/.local/share/teatrack`)
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(DATA_DIR_ENV) {
        return absolutize(&path);
    }

    if let Some(repo) = detect_local_repo() {
        return Ok(repo);
    }

    let root = dirs::data_local_dir()
        .ok_or(PathError::NoDataDir)?
        .join("teatrack");
    ensure_dir(&root)?;
    Ok(root)
}

/// Create `dir` and its parents if missing.
pub(super) fn ensure_dir(dir: &Path) -> Result<(), PathError> {
    fs::create_dir_all(dir).map_err(|e| PathError::CreateFailed {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Make a user-supplied path absolute relative to the working directory.
pub(super) fn absolutize(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }
    let path = PathBuf::from(trimmed);
    if path.is_absolute() {
        return Ok(path);
    }
    env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|e| PathError::CurrentDirError(e.to_string()))
}
