//! Profile service - profile CRUD with ownership rules.

use std::sync::Arc;
use tracing::{debug, info};

use super::{PriceHistoryRecorder, ProfileLocks};
use crate::domain::{Profile, ProfileFields, ProfileId, UserId};
use crate::ports::{CoreError, ProfileRepository, RepositoryError};
use crate::utils::validation::{apply_update, validate_new_profile};

const DUPLICATE_PROFILE: &str = "Profile already exists for this user";

/// Service for profile operations.
///
/// Enforces one profile per user and owner-only mutation. Every write that
/// changes the price carries its history snapshot into the same repository
/// call.
pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
    locks: ProfileLocks,
}

impl ProfileService {
    /// Create a new profile service with the given repository.
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self {
            repo,
            locks: ProfileLocks::new(),
        }
    }

    /// Create the profile for `user_id` with its initial price snapshot.
    ///
    /// Fails with `Validation` if any field is missing or malformed and
    /// with `Conflict` if the user already has a profile.
    pub async fn create(
        &self,
        user_id: UserId,
        fields: &ProfileFields,
    ) -> Result<Profile, CoreError> {
        let new = validate_new_profile(user_id, fields)?;

        if self.repo.find_by_owner(&new.user_id).await?.is_some() {
            return Err(CoreError::Conflict(DUPLICATE_PROFILE.to_string()));
        }

        // A concurrent create can still win the race; the unique owner index catches it.
        let initial = PriceHistoryRecorder::initial_entry(new.price_per_kilo);
        let profile = self
            .repo
            .insert(&new, initial)
            .await
            .map_err(|e| match e {
                RepositoryError::AlreadyExists(_) => {
                    CoreError::Conflict(DUPLICATE_PROFILE.to_string())
                }
                other => CoreError::from(other),
            })?;

        info!(
            profile_id = profile.id,
            user_id = %profile.user_id,
            price = %profile.price_per_kilo,
            "Created profile"
        );
        Ok(profile)
    }

    /// Get a profile by id. Public.
    pub async fn get(&self, id: ProfileId) -> Result<Profile, CoreError> {
        self.repo.get_by_id(id).await.map_err(CoreError::from)
    }

    /// List all profiles. Public, unfiltered.
    pub async fn list(&self) -> Result<Vec<Profile>, CoreError> {
        self.repo.list().await.map_err(CoreError::from)
    }

    /// The profile owned by `user_id`, or `None` if they have not created one yet.
    pub async fn own(&self, user_id: &UserId) -> Result<Option<Profile>, CoreError> {
        self.repo.find_by_owner(user_id).await.map_err(CoreError::from)
    }

    /// Load `id` and check that `requester` owns it.
    async fn owned(&self, id: ProfileId, requester: &UserId) -> Result<Profile, CoreError> {
        let profile = self.get(id).await?;
        if !profile.is_owned_by(requester) {
            debug!(profile_id = id, requester = %requester, "Rejected non-owner write");
            return Err(CoreError::Forbidden("Not authorized".to_string()));
        }
        Ok(profile)
    }

    /// Apply a partial update on behalf of `requester`.
    ///
    /// Checks run in order: existence, ownership, field validation. A
    /// snapshot is appended only when the numeric price changes. An empty
    /// field set only refreshes `updated_at`.
    pub async fn update(
        &self,
        id: ProfileId,
        requester: &UserId,
        fields: &ProfileFields,
    ) -> Result<Profile, CoreError> {
        let _guard = self.locks.lock(id).await;

        let current = self.owned(id, requester).await?;
        let next = apply_update(&current, fields)?;
        if fields.is_empty() {
            debug!(profile_id = id, "Empty update, refreshing timestamp only");
        }
        let snapshot =
            PriceHistoryRecorder::change_entry(current.price_per_kilo, next.price_per_kilo);

        if snapshot.is_some() {
            debug!(
                profile_id = id,
                old = %current.price_per_kilo,
                new = %next.price_per_kilo,
                "Price changed, appending snapshot"
            );
        } else {
            debug!(profile_id = id, "Price unchanged, no snapshot");
        }

        self.repo
            .update(&next, snapshot)
            .await
            .map_err(CoreError::from)
    }

    /// Delete a profile and its whole price history on behalf of `requester`.
    pub async fn delete(&self, id: ProfileId, requester: &UserId) -> Result<(), CoreError> {
        let _guard = self.locks.lock(id).await;

        self.owned(id, requester).await?;
        self.repo.delete(id).await?;

        info!(profile_id = id, "Deleted profile and price history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceInput;
    use crate::ports::{ErrorKind, PriceHistoryRepository};
    use crate::services::test_support::InMemoryStore;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn fields(price: PriceInput) -> ProfileFields {
        ProfileFields {
            factory_name: Some("Nilgiri Estates".to_string()),
            owner_name: Some("R. Kumar".to_string()),
            contact_number: Some("0423-555-0101".to_string()),
            address: Some("Coonoor, Tamil Nadu".to_string()),
            commodity_type: Some("Tea".to_string()),
            price_per_kilo: Some(price),
            effective_date: Some("2024-05-01".to_string()),
            operating_hours: Some("8am - 5pm".to_string()),
            ..Default::default()
        }
    }

    fn price_update(price: PriceInput) -> ProfileFields {
        ProfileFields {
            price_per_kilo: Some(price),
            ..Default::default()
        }
    }

    fn prices(history: &[crate::domain::PriceSnapshot]) -> Vec<f64> {
        history.iter().map(|s| s.price.value()).collect()
    }

    #[tokio::test]
    async fn second_create_for_same_user_conflicts() {
        let store = InMemoryStore::new();
        let service = ProfileService::new(store.clone());

        service.create(user("u1"), &fields(300.0.into())).await.unwrap();
        let err = service
            .create(user("u1"), &fields(310.0.into()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(store.snapshot_count(), 1);
    }

    #[tokio::test]
    async fn create_records_exactly_one_initial_snapshot() {
        let store = InMemoryStore::new();
        let service = ProfileService::new(store.clone());

        let profile = service.create(user("u1"), &fields("300".into())).await.unwrap();
        let history = store.list_for_profile(profile.id).await.unwrap();

        assert_eq!(prices(&history), vec![300.0]);
    }

    #[tokio::test]
    async fn create_with_missing_field_writes_nothing() {
        let store = InMemoryStore::new();
        let service = ProfileService::new(store.clone());
        let incomplete = ProfileFields {
            operating_hours: None,
            ..fields(300.0.into())
        };

        let err = service.create(user("u1"), &incomplete).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(service.list().await.unwrap().is_empty());
        assert_eq!(store.snapshot_count(), 0);
    }

    #[tokio::test]
    async fn price_change_appends_one_snapshot() {
        let store = InMemoryStore::new();
        let service = ProfileService::new(store.clone());
        let owner = user("u1");
        let profile = service.create(owner.clone(), &fields(300.0.into())).await.unwrap();

        let updated = service
            .update(profile.id, &owner, &price_update(320.0.into()))
            .await
            .unwrap();

        assert!((updated.price_per_kilo.value() - 320.0).abs() < f64::EPSILON);
        let history = store.list_for_profile(profile.id).await.unwrap();
        assert_eq!(prices(&history), vec![300.0, 320.0]);
    }

    #[tokio::test]
    async fn same_numeric_price_as_text_appends_nothing() {
        let store = InMemoryStore::new();
        let service = ProfileService::new(store.clone());
        let owner = user("u1");
        let profile = service.create(owner.clone(), &fields(340.0.into())).await.unwrap();

        service
            .update(profile.id, &owner, &price_update("340".into()))
            .await
            .unwrap();

        assert_eq!(store.snapshot_count(), 1);
    }

    #[tokio::test]
    async fn update_without_price_keeps_history() {
        let store = InMemoryStore::new();
        let service = ProfileService::new(store.clone());
        let owner = user("u1");
        let profile = service.create(owner.clone(), &fields(300.0.into())).await.unwrap();
        let rename = ProfileFields {
            factory_name: Some("Nilgiri Estates Ltd".to_string()),
            ..Default::default()
        };

        let updated = service.update(profile.id, &owner, &rename).await.unwrap();

        assert_eq!(updated.factory_name, "Nilgiri Estates Ltd");
        assert_eq!(updated.owner_name, profile.owner_name);
        assert_eq!(store.snapshot_count(), 1);
    }

    #[tokio::test]
    async fn empty_update_returns_profile_without_snapshot() {
        let store = InMemoryStore::new();
        let service = ProfileService::new(store.clone());
        let owner = user("u1");
        let profile = service.create(owner.clone(), &fields(300.0.into())).await.unwrap();

        let updated = service
            .update(profile.id, &owner, &ProfileFields::default())
            .await
            .unwrap();

        assert_eq!(updated.factory_name, profile.factory_name);
        assert_eq!(updated.price_per_kilo, profile.price_per_kilo);
        assert!(updated.updated_at >= profile.updated_at);
        assert_eq!(store.snapshot_count(), 1);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden_even_with_wrongly_typed_fields() {
        let store = InMemoryStore::new();
        let service = ProfileService::new(store.clone());
        let profile = service.create(user("u1"), &fields(300.0.into())).await.unwrap();
        let wrong = ProfileFields {
            rejected: vec!["pricePerKilo"],
            ..Default::default()
        };

        let err = service
            .update(profile.id, &user("u2"), &wrong)
            .await
            .unwrap_err();
        let missing = service.update(99, &user("u2"), &wrong).await.unwrap_err();
        let owner_err = service
            .update(profile.id, &user("u1"), &wrong)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(missing.kind(), ErrorKind::NotFound);
        assert_eq!(owner_err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden_even_with_invalid_fields() {
        let store = InMemoryStore::new();
        let service = ProfileService::new(store.clone());
        let profile = service.create(user("u1"), &fields(300.0.into())).await.unwrap();
        let garbage = price_update("not a price".into());

        let update_err = service
            .update(profile.id, &user("u2"), &garbage)
            .await
            .unwrap_err();
        let delete_err = service.delete(profile.id, &user("u2")).await.unwrap_err();

        assert_eq!(update_err.kind(), ErrorKind::Authorization);
        assert_eq!(delete_err.kind(), ErrorKind::Authorization);
        assert!(service.get(profile.id).await.is_ok());
    }

    #[tokio::test]
    async fn missing_profile_is_not_found_before_ownership() {
        let service = ProfileService::new(InMemoryStore::new());

        let update_err = service
            .update(99, &user("u1"), &price_update(1.0.into()))
            .await
            .unwrap_err();
        let delete_err = service.delete(99, &user("u1")).await.unwrap_err();

        assert_eq!(update_err.kind(), ErrorKind::NotFound);
        assert_eq!(delete_err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn delete_cascades_to_history() {
        let store = InMemoryStore::new();
        let service = ProfileService::new(store.clone());
        let owner = user("u1");
        let profile = service.create(owner.clone(), &fields(300.0.into())).await.unwrap();
        service
            .update(profile.id, &owner, &price_update(320.0.into()))
            .await
            .unwrap();

        service.delete(profile.id, &owner).await.unwrap();

        assert!(store.list_for_profile(profile.id).await.unwrap().is_empty());
        assert_eq!(
            service.get(profile.id).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert!(service.own(&owner).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn own_profile_is_none_until_created() {
        let service = ProfileService::new(InMemoryStore::new());
        let owner = user("u1");

        assert!(service.own(&owner).await.unwrap().is_none());
        let created = service.create(owner.clone(), &fields(300.0.into())).await.unwrap();
        assert_eq!(service.own(&owner).await.unwrap().map(|p| p.id), Some(created.id));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_keep_latest_snapshot_in_step() {
        let store = InMemoryStore::new();
        let service = Arc::new(ProfileService::new(store.clone()));
        let owner = user("u1");
        let profile = service.create(owner.clone(), &fields(300.0.into())).await.unwrap();

        let mut tasks = Vec::new();
        for step in 1..=20 {
            let service = Arc::clone(&service);
            let owner = owner.clone();
            tasks.push(tokio::spawn(async move {
                let price = PriceInput::Number(300.0 + f64::from(step));
                service
                    .update(profile.id, &owner, &price_update(price))
                    .await
                    .unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let current = service.get(profile.id).await.unwrap();
        let history = store.list_for_profile(profile.id).await.unwrap();
        // Every update changed the price it observed.
        assert_eq!(history.len(), 21);
        let last = history.last().unwrap();
        assert!(!last.price.differs_from(current.price_per_kilo));
    }
}
