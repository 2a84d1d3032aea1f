//! Database path resolution.
//!
//! Provides the canonical path to the teatrack `SQLite` database file.

use std::env;
use std::path::PathBuf;

use super::error::PathError;
use super::platform::{absolutize, data_root, ensure_dir};

/// Environment variable naming an explicit database file.
pub const DATABASE_ENV: &str = "TEATRACK_DATABASE";

/// File name of the database inside `<data_root>/data`.
pub const DATABASE_FILE_NAME: &str = "teatrack.db";

/// Get the path to the teatrack database file.
///
/// `TEATRACK_DATABASE` wins when set. Otherwise the file lives at
/// `<data_root>/data/teatrack.db`. The parent directory is created if it
/// doesn't exist.
pub fn database_path() -> Result<PathBuf, PathError> {
    let path = match env::var(DATABASE_ENV) {
        Ok(raw) => absolutize(&raw)?,
        Err(_) => data_root()?.join("data").join(DATABASE_FILE_NAME),
    };

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::platform::DATA_DIR_ENV;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};

    #[test]
    fn default_lives_under_data_root() {
        let _lock = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let _data = EnvVarGuard::set(DATA_DIR_ENV, dir.path().to_str().unwrap());
        let _db = EnvVarGuard::unset(DATABASE_ENV);

        let path = database_path().unwrap();

        assert_eq!(path, dir.path().join("data").join(DATABASE_FILE_NAME));
        assert!(dir.path().join("data").is_dir());
    }

    #[test]
    fn explicit_database_env_wins() {
        let _lock = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("prices.db");
        let _db = EnvVarGuard::set(DATABASE_ENV, target.to_str().unwrap());

        assert_eq!(database_path().unwrap(), target);
        assert!(dir.path().join("nested").is_dir());
    }
}
