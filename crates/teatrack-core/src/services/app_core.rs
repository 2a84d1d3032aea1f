//! `AppCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters (CLI, Web)
//! receive an `AppCore` instance and use it to access all functionality.

use crate::ports::Repos;

use super::{DirectoryService, PriceHistoryRecorder, ProfileService};

/// The core application facade.
///
/// `AppCore` provides access to all core services. It's constructed at the
/// adapter's composition root (main.rs or bootstrap.rs) with concrete
/// repository implementations.
///
/// # Example
///
/// ```ignore
/// let repos = teatrack_db::CoreFactory::build_repos(pool);
/// let core = AppCore::new(repos);
///
/// let listings = core.directory().list().await?;
/// ```
pub struct AppCore {
    profiles: ProfileService,
    directory: DirectoryService,
    history: PriceHistoryRecorder,
}

impl AppCore {
    /// Create a new `AppCore` with the given repositories.
    pub fn new(repos: Repos) -> Self {
        Self {
            profiles: ProfileService::new(repos.profiles.clone()),
            directory: DirectoryService::new(repos.profiles, repos.price_history.clone()),
            history: PriceHistoryRecorder::new(repos.price_history),
        }
    }

    /// Access the profile service (owner writes and single-profile reads).
    pub const fn profiles(&self) -> &ProfileService {
        &self.profiles
    }

    /// Access the public directory.
    pub const fn directory(&self) -> &DirectoryService {
        &self.directory
    }

    /// Access the price history recorder.
    pub const fn history(&self) -> &PriceHistoryRecorder {
        &self.history
    }
}
