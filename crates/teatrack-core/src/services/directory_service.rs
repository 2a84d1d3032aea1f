//! Directory query service - the public, read-only view.

use std::sync::Arc;

use crate::domain::{PriceSummary, Profile, ProfileId, ProfileWithHistory};
use crate::ports::{CoreError, PriceHistoryRepository, ProfileRepository};

/// Read-only composition of profiles and their price history.
///
/// Holds repository handles but only ever calls their read methods.
pub struct DirectoryService {
    profiles: Arc<dyn ProfileRepository>,
    history: Arc<dyn PriceHistoryRepository>,
}

impl DirectoryService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        history: Arc<dyn PriceHistoryRepository>,
    ) -> Self {
        Self { profiles, history }
    }

    /// Every profile in the directory.
    pub async fn list(&self) -> Result<Vec<Profile>, CoreError> {
        self.profiles.list().await.map_err(CoreError::from)
    }

    /// A profile with its full price history and summary.
    ///
    /// Fails with `NotFound` if the profile is missing. A profile with no
    /// snapshots yields an empty history and no summary.
    pub async fn profile_with_history(
        &self,
        id: ProfileId,
    ) -> Result<ProfileWithHistory, CoreError> {
        let (profile, history) = tokio::join!(
            self.profiles.get_by_id(id),
            self.history.list_for_profile(id)
        );
        let profile = profile?;
        let history = history?;
        let summary = PriceSummary::from_history(&history);

        Ok(ProfileWithHistory {
            profile,
            history,
            summary,
        })
    }
}
