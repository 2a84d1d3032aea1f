//! Price History Recorder - maintains the append-only snapshot sequence.

use std::sync::Arc;
use tracing::debug;

use crate::domain::{NewPriceSnapshot, PricePerKilo, PriceSnapshot, ProfileId};
use crate::ports::{CoreError, PriceHistoryRepository};

/// Records and serves price snapshots for profiles.
///
/// The snapshot decisions are pure associated functions so that
/// `ProfileService` can hand the snapshot to the repository in the same
/// write as the profile row.
pub struct PriceHistoryRecorder {
    repo: Arc<dyn PriceHistoryRepository>,
}

impl PriceHistoryRecorder {
    pub fn new(repo: Arc<dyn PriceHistoryRepository>) -> Self {
        Self { repo }
    }

    /// The snapshot every new profile starts with.
    pub fn initial_entry(price: PricePerKilo) -> NewPriceSnapshot {
        NewPriceSnapshot::now(price)
    }

    /// The snapshot a price change produces, or `None` if the numeric
    /// value is unchanged.
    pub fn change_entry(old: PricePerKilo, new: PricePerKilo) -> Option<NewPriceSnapshot> {
        new.differs_from(old).then(|| NewPriceSnapshot::now(new))
    }

    /// Append the first snapshot for a profile.
    pub async fn record_initial(
        &self,
        profile_id: ProfileId,
        price: PricePerKilo,
    ) -> Result<PriceSnapshot, CoreError> {
        let snapshot = self
            .repo
            .append(profile_id, Self::initial_entry(price))
            .await?;
        debug!(profile_id, price = %price, "Recorded initial price");
        Ok(snapshot)
    }

    /// Append a snapshot only if `new` differs numerically from `old`.
    ///
    /// An unchanged price is not an error; it returns `Ok(None)`.
    pub async fn record_if_changed(
        &self,
        profile_id: ProfileId,
        old: PricePerKilo,
        new: PricePerKilo,
    ) -> Result<Option<PriceSnapshot>, CoreError> {
        let Some(entry) = Self::change_entry(old, new) else {
            debug!(profile_id, price = %new, "Price unchanged, no snapshot");
            return Ok(None);
        };
        let snapshot = self.repo.append(profile_id, entry).await?;
        debug!(profile_id, old = %old, new = %new, "Recorded price change");
        Ok(Some(snapshot))
    }

    /// All snapshots for a profile, oldest first.
    ///
    /// Does not check that the profile exists; an unknown id yields an
    /// empty history.
    pub async fn history(&self, profile_id: ProfileId) -> Result<Vec<PriceSnapshot>, CoreError> {
        self.repo
            .list_for_profile(profile_id)
            .await
            .map_err(CoreError::from)
    }
}
