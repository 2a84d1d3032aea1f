//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Repository traits are CRUD-focused; ownership and price-change rules
//!   belong in the services
//! - Multi-row writes that must land together are single repository calls

pub mod identity;
pub mod price_history_repository;
pub mod profile_repository;

use std::sync::Arc;
use thiserror::Error;

pub use identity::{AuthError, IdentityVerifier};
pub use price_history_repository::PriceHistoryRepository;
pub use profile_repository::ProfileRepository;

/// Container for all repository trait objects.
///
/// This struct provides a consistent way to wire repositories across adapters
/// without coupling them to concrete implementations. It lives in `teatrack-core`
/// so that `AppCore` can accept it without depending on `teatrack-db`.
///
/// # Example
///
/// ```ignore
/// // In teatrack-db factory:
/// pub fn build_repos(pool: &SqlitePool) -> Repos { ... }
///
/// // In adapter bootstrap:
/// let repos = teatrack_db::CoreFactory::build_repos(pool);
/// let core = AppCore::new(repos);
/// ```
#[derive(Clone)]
pub struct Repos {
    /// Profile repository for CRUD operations on profiles.
    pub profiles: Arc<dyn ProfileRepository>,
    /// Append-only price snapshot store.
    pub price_history: Arc<dyn PriceHistoryRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        price_history: Arc<dyn PriceHistoryRepository>,
    ) -> Self {
        Self {
            profiles,
            price_history,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g., foreign key, check constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Machine-checkable classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Authorization,
    Authentication,
    Storage,
    Internal,
}

impl ErrorKind {
    /// Stable upper-case name used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Conflict => "CONFLICT",
            Self::NotFound => "NOT_FOUND",
            Self::Authorization => "FORBIDDEN",
            Self::Authentication => "UNAUTHORIZED",
            Self::Storage => "STORAGE_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters should map this to their own error types (HTTP status codes,
/// CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(RepositoryError),

    /// A required field is missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The user already owns a profile.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The profile id does not resolve.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authenticated, but not the owner.
    #[error("Not authorized: {0}")]
    Forbidden(String),

    /// Missing or invalid credential.
    #[error("Authentication required: {0}")]
    Unauthenticated(#[from] AuthError),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Conflict(_) | Self::Repository(RepositoryError::AlreadyExists(_)) => {
                ErrorKind::Conflict
            }
            Self::NotFound(_) | Self::Repository(RepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Forbidden(_) => ErrorKind::Authorization,
            Self::Unauthenticated(_) => ErrorKind::Authentication,
            Self::Repository(_) => ErrorKind::Storage,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => Self::NotFound(what),
            RepositoryError::AlreadyExists(what) => Self::Conflict(what),
            other => Self::Repository(other),
        }
    }
}
