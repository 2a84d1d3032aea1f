//! In-memory repositories for service tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

use crate::domain::{NewPriceSnapshot, NewProfile, PriceSnapshot, Profile, ProfileId, UserId};
use crate::ports::{PriceHistoryRepository, ProfileRepository, Repos, RepositoryError};

#[derive(Default)]
struct State {
    profiles: Vec<Profile>,
    snapshots: Vec<PriceSnapshot>,
    next_profile_id: i64,
    next_snapshot_id: i64,
}

impl State {
    fn push_snapshot(&mut self, profile_id: ProfileId, snapshot: NewPriceSnapshot) -> PriceSnapshot {
        self.next_snapshot_id += 1;
        let stored = PriceSnapshot {
            id: self.next_snapshot_id,
            profile_id,
            price: snapshot.price,
            recorded_at: snapshot.recorded_at,
        };
        self.snapshots.push(stored.clone());
        stored
    }
}

/// Both repositories over one shared state, so profile writes and snapshot
/// writes are visible to each other like in a real database.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn repos(self: &Arc<Self>) -> Repos {
        Repos::new(self.clone(), self.clone())
    }

    pub fn snapshot_count(&self) -> usize {
        self.state.lock().unwrap().snapshots.len()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Profile>, RepositoryError> {
        Ok(self.state.lock().unwrap().profiles.clone())
    }

    async fn get_by_id(&self, id: ProfileId) -> Result<Profile, RepositoryError> {
        // Let other tasks run between the read and any following write.
        tokio::task::yield_now().await;
        self.state
            .lock()
            .unwrap()
            .profiles
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("profile id={id}")))
    }

    async fn find_by_owner(&self, user: &UserId) -> Result<Option<Profile>, RepositoryError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .profiles
            .iter()
            .find(|p| p.user_id == *user)
            .cloned())
    }

    async fn insert(
        &self,
        profile: &NewProfile,
        initial_snapshot: NewPriceSnapshot,
    ) -> Result<Profile, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.profiles.iter().any(|p| p.user_id == profile.user_id) {
            return Err(RepositoryError::AlreadyExists(format!(
                "profile for user {}",
                profile.user_id
            )));
        }
        state.next_profile_id += 1;
        let stored = profile
            .clone()
            .into_profile(state.next_profile_id, Utc::now());
        state.profiles.push(stored.clone());
        state.push_snapshot(stored.id, initial_snapshot);
        Ok(stored)
    }

    async fn update(
        &self,
        profile: &Profile,
        snapshot: Option<NewPriceSnapshot>,
    ) -> Result<Profile, RepositoryError> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().unwrap();
        let slot = state
            .profiles
            .iter_mut()
            .find(|p| p.id == profile.id)
            .ok_or_else(|| RepositoryError::NotFound(format!("profile id={}", profile.id)))?;
        *slot = Profile {
            updated_at: Utc::now(),
            ..profile.clone()
        };
        let stored = slot.clone();
        if let Some(snapshot) = snapshot {
            state.push_snapshot(profile.id, snapshot);
        }
        Ok(stored)
    }

    async fn delete(&self, id: ProfileId) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.profiles.len();
        state.profiles.retain(|p| p.id != id);
        if state.profiles.len() == before {
            return Err(RepositoryError::NotFound(format!("profile id={id}")));
        }
        state.snapshots.retain(|s| s.profile_id != id);
        Ok(())
    }
}

#[async_trait]
impl PriceHistoryRepository for InMemoryStore {
    async fn append(
        &self,
        profile_id: ProfileId,
        snapshot: NewPriceSnapshot,
    ) -> Result<PriceSnapshot, RepositoryError> {
        Ok(self.state.lock().unwrap().push_snapshot(profile_id, snapshot))
    }

    async fn list_for_profile(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<PriceSnapshot>, RepositoryError> {
        let mut history: Vec<PriceSnapshot> = self
            .state
            .lock()
            .unwrap()
            .snapshots
            .iter()
            .filter(|s| s.profile_id == profile_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at).then(a.id.cmp(&b.id)));
        Ok(history)
    }
}
