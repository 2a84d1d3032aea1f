//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! This module provides factory functions for wiring up the application
//! with `SQLite` repositories. It is focused purely on construction and
//! should not contain any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use teatrack_core::Repos;
use teatrack_core::services::AppCore;

use crate::repositories::{SqlitePriceHistoryRepository, SqliteProfileRepository};

/// Factory for creating repository instances with `SQLite` backends.
///
/// This struct provides composition utilities only, no domain logic.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// Returns a `Repos` struct from `teatrack-core` containing
    /// trait-object-wrapped repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteProfileRepository::new(pool.clone())),
            Arc::new(SqlitePriceHistoryRepository::new(pool)),
        )
    }

    /// Build a complete `AppCore` instance from a pool.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use teatrack_db::{CoreFactory, setup_database};
    ///
    /// let pool = setup_database(&db_path).await?;
    /// let core = CoreFactory::build_app_core(pool);
    /// ```
    pub fn build_app_core(pool: SqlitePool) -> AppCore {
        AppCore::new(Self::build_repos(pool))
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema
/// already applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Build an `AppCore` over this database.
    pub fn app_core(&self) -> AppCore {
        CoreFactory::build_app_core(self.pool.clone())
    }

    /// Create a profile repository using this test database.
    pub fn profile_repository(&self) -> SqliteProfileRepository {
        SqliteProfileRepository::new(self.pool.clone())
    }

    /// Create a price history repository using this test database.
    pub fn price_history_repository(&self) -> SqlitePriceHistoryRepository {
        SqlitePriceHistoryRepository::new(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teatrack_core::{ErrorKind, PriceInput, ProfileFields, UserId};

    fn fields(price: PriceInput) -> ProfileFields {
        ProfileFields {
            factory_name: Some("Nilgiri Estates".to_string()),
            owner_name: Some("R. Kumar".to_string()),
            contact_number: Some("0423-555-0101".to_string()),
            address: Some("Coonoor".to_string()),
            commodity_type: Some("Tea".to_string()),
            price_per_kilo: Some(price),
            effective_date: Some("2024-05-01".to_string()),
            operating_hours: Some("8am - 5pm".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn app_core_runs_end_to_end_on_sqlite() {
        let db = TestDb::new().await.unwrap();
        let core = db.app_core();
        let owner = UserId::new("owner").unwrap();

        let created = core
            .profiles()
            .create(owner.clone(), &fields(PriceInput::Number(300.0)))
            .await
            .unwrap();
        let again = core
            .profiles()
            .create(owner.clone(), &fields(PriceInput::Number(300.0)))
            .await
            .unwrap_err();
        assert_eq!(again.kind(), ErrorKind::Conflict);

        let bump = ProfileFields {
            price_per_kilo: Some(PriceInput::Text("320".to_string())),
            ..Default::default()
        };
        core.profiles().update(created.id, &owner, &bump).await.unwrap();
        core.profiles().update(created.id, &owner, &bump).await.unwrap();

        let view = core.directory().profile_with_history(created.id).await.unwrap();
        let prices: Vec<f64> = view.history.iter().map(|s| s.price.value()).collect();
        assert_eq!(prices, vec![300.0, 320.0]);

        core.profiles().delete(created.id, &owner).await.unwrap();
        assert!(core.history().history(created.id).await.unwrap().is_empty());
        assert_eq!(
            core.profiles().get(created.id).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
