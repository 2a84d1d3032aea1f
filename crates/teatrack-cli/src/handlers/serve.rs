//! Serve command handler.

use std::time::Duration;

use anyhow::Result;
use teatrack_axum::{ServerConfig, start_server};

use crate::error::CliError;

/// Flag overrides for `teatrack serve`. `None`/empty leaves the
/// environment value in place.
#[derive(Debug, Clone, Default)]
pub struct ServeArgs {
    pub port: Option<u16>,
    pub jwt_secret: Option<String>,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: Option<u64>,
    pub database: Option<std::path::PathBuf>,
}

/// Merge environment configuration with command-line flags.
pub fn server_config(base: ServerConfig, args: ServeArgs) -> ServerConfig {
    let mut config = base;
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if let Some(secret) = args.jwt_secret.filter(|s| !s.is_empty()) {
        config = config.with_jwt_secret(secret);
    }
    if !args.cors_origins.is_empty() {
        config = config.with_allowed_origins(args.cors_origins);
    }
    if let Some(secs) = args.request_timeout_secs {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    if let Some(path) = args.database {
        config = config.with_database_path(path);
    }
    config
}

/// Start the HTTP server and run until interrupted.
pub async fn execute(args: ServeArgs) -> Result<()> {
    let base = ServerConfig::from_env().map_err(|e| CliError::Config(e.to_string()))?;
    let config = server_config(base, args);
    if config.jwt_secret.is_none() {
        return Err(CliError::Config(
            "TEATRACK_JWT_SECRET (or JWT_SECRET) must be set to serve the API".to_string(),
        )
        .into());
    }

    println!();
    println!("  teatrack API starting...");
    println!();
    println!("  API:     http://localhost:{}/api", config.port);
    println!("  Health:  http://localhost:{}/health", config.port);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    start_server(config).await
}
