//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are instantiated here.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use teatrack_core::IdentityVerifier;
use teatrack_core::paths::{data_root, database_path};
use teatrack_core::services::AppCore;
use teatrack_db::{CoreFactory, setup_database};
use tracing::info;

use crate::auth::Hs256Verifier;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const PORT_ENV: &str = "TEATRACK_PORT";
pub const JWT_SECRET_ENV: &str = "TEATRACK_JWT_SECRET";
/// Fallback secret variable shared with the login service.
pub const LEGACY_JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const CORS_ORIGINS_ENV: &str = "TEATRACK_CORS_ORIGINS";
pub const REQUEST_TIMEOUT_ENV: &str = "TEATRACK_REQUEST_TIMEOUT_SECS";

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Explicit database file. `None` resolves through `teatrack_core::paths`.
    pub database_path: Option<PathBuf>,
    /// Shared secret for bearer tokens. Required to serve.
    pub jwt_secret: Option<String>,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Requests running longer than this are answered with 408.
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("database_path", &self.database_path)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("cors", &self.cors)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ServerConfig {
    /// Create config with built-in defaults and no secret.
    pub const fn with_defaults() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: None,
            jwt_secret: None,
            cors: CorsConfig::AllowAll,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Build config from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::with_defaults();

        if let Some(port) = get(PORT_ENV) {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("{PORT_ENV} must be a port number, got {port:?}"))?;
        }

        config.jwt_secret = get(JWT_SECRET_ENV).or_else(|| get(LEGACY_JWT_SECRET_ENV));

        if let Some(origins) = get(CORS_ORIGINS_ENV) {
            let origins: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
            if !origins.is_empty() && origins != ["*"] {
                config.cors = CorsConfig::AllowOrigins(origins);
            }
        }

        if let Some(secs) = get(REQUEST_TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().with_context(|| {
                format!("{REQUEST_TIMEOUT_ENV} must be a whole number of seconds, got {secs:?}")
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build the token verifier, failing when no secret is configured.
    pub fn verifier(&self) -> Result<Hs256Verifier> {
        let secret = self.jwt_secret.as_deref().with_context(|| {
            format!("{JWT_SECRET_ENV} (or {LEGACY_JWT_SECRET_ENV}) must be set to serve the API")
        })?;
        Hs256Verifier::new(secret)
    }
}

/// Application context for the Axum adapter.
///
/// Holds the initialized core and the identity verifier for the web server.
pub struct AxumContext {
    /// The core application facade.
    pub core: Arc<AppCore>,
    /// Resolves bearer credentials to users.
    pub verifier: Arc<dyn IdentityVerifier>,
}

impl AxumContext {
    pub fn new(core: AppCore, verifier: impl IdentityVerifier + 'static) -> Self {
        Self {
            core: Arc::new(core),
            verifier: Arc::new(verifier),
        }
    }
}

/// Bootstrap the Axum server: resolve paths, open the database and wire
/// the core with the configured verifier.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let verifier = config.verifier()?;

    let db_path = match &config.database_path {
        Some(path) => path.clone(),
        None => database_path()?,
    };
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating database directory {}", parent.display()))?;
    }

    info!(
        database_path = %db_path.display(),
        data_root = %data_root().map(|p| p.display().to_string()).unwrap_or_default(),
        "Axum bootstrap resolved paths"
    );

    let pool = setup_database(&db_path).await?;
    let core = CoreFactory::build_app_core(pool);

    Ok(AxumContext::new(core, verifier))
}

/// Start the HTTP server with the given configuration.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(&config).await?;
    let app = crate::routes::create_router(ctx, &config);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(
        cors = ?config.cors,
        timeout_secs = config.request_timeout.as_secs(),
        "teatrack API listening on http://{}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::with_defaults());
        assert_eq!(config.port, 5000);
        assert!(config.verifier().is_err());
    }

    #[test]
    fn reads_all_variables() {
        let config = ServerConfig::from_lookup(lookup(&[
            (PORT_ENV, "8080"),
            (JWT_SECRET_ENV, "s3cret"),
            (CORS_ORIGINS_ENV, "https://a.example, https://b.example"),
            (REQUEST_TIMEOUT_ENV, "5"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.jwt_secret.as_deref(), Some("s3cret"));
        assert_eq!(
            config.cors,
            CorsConfig::AllowOrigins(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn falls_back_to_legacy_secret_variable() {
        let config =
            ServerConfig::from_lookup(lookup(&[(LEGACY_JWT_SECRET_ENV, "legacy")])).unwrap();
        assert_eq!(config.jwt_secret.as_deref(), Some("legacy"));

        let both = ServerConfig::from_lookup(lookup(&[
            (LEGACY_JWT_SECRET_ENV, "legacy"),
            (JWT_SECRET_ENV, "primary"),
        ]))
        .unwrap();
        assert_eq!(both.jwt_secret.as_deref(), Some("primary"));
    }

    #[test]
    fn wildcard_origins_mean_allow_all() {
        let config = ServerConfig::from_lookup(lookup(&[(CORS_ORIGINS_ENV, "*")])).unwrap();
        assert_eq!(config.cors, CorsConfig::AllowAll);
    }

    #[test]
    fn bad_numbers_are_reported() {
        assert!(ServerConfig::from_lookup(lookup(&[(PORT_ENV, "http")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[(REQUEST_TIMEOUT_ENV, "-1")])).is_err());
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = ServerConfig::with_defaults().with_jwt_secret("hunter2");
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[tokio::test]
    async fn bootstrap_opens_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("teatrack.db");
        let config = ServerConfig::with_defaults()
            .with_jwt_secret("secret")
            .with_database_path(&db);

        let ctx = bootstrap(&config).await.unwrap();
        assert!(db.exists());
        assert!(ctx.core.directory().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bootstrap_requires_secret() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::with_defaults().with_database_path(dir.path().join("t.db"));
        assert!(bootstrap(&config).await.is_err());
    }
}
