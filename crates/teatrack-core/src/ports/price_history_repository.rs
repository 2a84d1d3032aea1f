//! Price history repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewPriceSnapshot, PriceSnapshot, ProfileId};

/// Append-only store of price snapshots.
///
/// Snapshots are never updated or deleted one by one. They disappear only
/// through [`ProfileRepository::delete`](super::ProfileRepository::delete).
#[async_trait]
pub trait PriceHistoryRepository: Send + Sync {
    /// Append a snapshot for `profile_id`.
    async fn append(
        &self,
        profile_id: ProfileId,
        snapshot: NewPriceSnapshot,
    ) -> Result<PriceSnapshot, RepositoryError>;

    /// All snapshots for `profile_id`, ascending by timestamp and then by
    /// insertion order. Empty when the profile has none or does not exist.
    async fn list_for_profile(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<PriceSnapshot>, RepositoryError>;
}
