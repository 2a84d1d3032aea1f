//! Per-profile write serialization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::ProfileId;

/// Keyed async locks, one per profile id.
///
/// Holding the guard for a profile id excludes every other writer of that
/// profile in this process, so a read-compare-write sequence cannot
/// interleave with another one. Different ids never contend.
#[derive(Debug, Default)]
pub struct ProfileLocks {
    slots: Mutex<HashMap<ProfileId, Arc<AsyncMutex<()>>>>,
}

impl ProfileLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `id`.
    pub async fn lock(&self, id: ProfileId) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            // Drop slots nobody holds or waits on.
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            Arc::clone(slots.entry(id).or_default())
        };
        slot.lock_owned().await
    }

    /// Number of ids with a live slot.
    #[cfg(test)]
    fn active(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
