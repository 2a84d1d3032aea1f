//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the terminal commands that read the directory: the database pool,
//! the `SQLite` repositories and the core services.

use std::path::PathBuf;

use anyhow::{Context, Result};
use teatrack_core::paths::database_path;
use teatrack_core::services::AppCore;
use teatrack_db::{CoreFactory, setup_database};
use tracing::debug;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Explicit database file. `None` resolves through `teatrack_core::paths`.
    pub database_path: Option<PathBuf>,
}

impl CliConfig {
    pub const fn with_defaults() -> Self {
        Self {
            database_path: None,
        }
    }

    #[must_use]
    pub fn with_database_path(mut self, path: Option<PathBuf>) -> Self {
        self.database_path = path;
        self
    }

    /// The database file this config points at.
    pub fn resolve_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(database_path()?),
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The core application facade.
    pub app: AppCore,
}

impl CliContext {
    pub const fn new(app: AppCore) -> Self {
        Self { app }
    }

    /// Access the `AppCore`.
    pub const fn app(&self) -> &AppCore {
        &self.app
    }
}

/// Open the database and compose the core.
pub async fn bootstrap(config: &CliConfig) -> Result<CliContext> {
    let db_path = config.resolve_database_path()?;
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating database directory {}", parent.display()))?;
    }
    debug!(database_path = %db_path.display(), "CLI bootstrap");

    let pool = setup_database(&db_path).await?;
    Ok(CliContext::new(CoreFactory::build_app_core(pool)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bootstrap_creates_database_at_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("cli.db");
        let config = CliConfig::with_defaults().with_database_path(Some(path.clone()));

        let ctx = bootstrap(&config).await.unwrap();
        assert!(path.exists());
        assert!(ctx.app().directory().list().await.unwrap().is_empty());
    }
}
