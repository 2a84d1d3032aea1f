//! Identity verification port.
//!
//! Resolves a bearer credential to the user it was issued for. Issuance,
//! refresh and revocation are outside the core.

use thiserror::Error;

use crate::domain::UserId;

/// Why a credential was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential was presented.
    #[error("missing credential")]
    Missing,

    /// The credential could not be parsed.
    #[error("malformed credential: {0}")]
    Malformed(String),

    /// The signature does not match.
    #[error("invalid credential signature")]
    InvalidSignature,

    /// The credential is past its expiry.
    #[error("credential expired")]
    Expired,
}

/// Validates bearer credentials.
///
/// Verification is CPU-only, so the trait is synchronous.
pub trait IdentityVerifier: Send + Sync {
    /// Resolve `credential` (without the `Bearer ` prefix) to a user.
    fn verify(&self, credential: &str) -> Result<UserId, AuthError>;
}
