//! Profile repository trait definition.
//!
//! This port defines the interface for profile persistence operations.
//! Implementations must handle all storage details internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewPriceSnapshot, NewProfile, Profile, ProfileId, UserId};

/// Repository for profile persistence operations.
///
/// Writes that touch price history take the snapshot as an argument so the
/// profile row and its snapshot commit or fail together.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - No ownership checks; `ProfileService` enforces them before calling
/// - `user_id` is unique across profiles
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// List all profiles, oldest first.
    async fn list(&self) -> Result<Vec<Profile>, RepositoryError>;

    /// Get a profile by its database ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the profile doesn't exist.
    async fn get_by_id(&self, id: ProfileId) -> Result<Profile, RepositoryError>;

    /// Find the profile owned by `user`, if any.
    async fn find_by_owner(&self, user: &UserId) -> Result<Option<Profile>, RepositoryError>;

    /// Insert a new profile together with its first price snapshot.
    ///
    /// Returns `Err(RepositoryError::AlreadyExists)` if the owner already has
    /// a profile. Nothing is written in that case.
    async fn insert(
        &self,
        profile: &NewProfile,
        initial_snapshot: NewPriceSnapshot,
    ) -> Result<Profile, RepositoryError>;

    /// Overwrite a stored profile and optionally append a price snapshot.
    ///
    /// `updated_at` is refreshed by the repository. Returns the stored row.
    /// Returns `Err(RepositoryError::NotFound)` if the profile doesn't exist.
    async fn update(
        &self,
        profile: &Profile,
        snapshot: Option<NewPriceSnapshot>,
    ) -> Result<Profile, RepositoryError>;

    /// Delete a profile and every snapshot referencing it.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the profile doesn't exist.
    async fn delete(&self, id: ProfileId) -> Result<(), RepositoryError>;
}
