//! Token command handler.
//!
//! Issues a signed bearer token for local testing against `teatrack serve`.
//! Production tokens come from the login service.

use anyhow::Result;
use chrono::Duration;
use teatrack_axum::Hs256Verifier;
use teatrack_core::UserId;

use crate::error::CliError;

/// Build a token for `user` valid for `ttl_hours`.
pub fn issue(user: &str, ttl_hours: u32, secret: Option<&str>) -> Result<String> {
    let user = UserId::new(user)
        .ok_or_else(|| CliError::Arguments("user id must not be empty".to_string()))?;
    if ttl_hours == 0 {
        return Err(CliError::Arguments("--ttl-hours must be at least 1".to_string()).into());
    }
    let secret = secret
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CliError::Config("TEATRACK_JWT_SECRET is not set".to_string()))?;

    let verifier = Hs256Verifier::new(secret)?;
    verifier
        .issue(&user, Duration::hours(i64::from(ttl_hours)))
        .map_err(|e| CliError::Arguments(format!("--ttl-hours {ttl_hours}: {e}")).into())
}

/// Print a token for `user`.
pub fn execute(user: &str, ttl_hours: u32, secret: Option<&str>) -> Result<()> {
    println!("{}", issue(user, ttl_hours, secret)?);
    Ok(())
}
