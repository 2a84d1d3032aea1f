//! `SQLite` implementation of the `PriceHistoryRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use teatrack_core::{
    NewPriceSnapshot, PriceHistoryRepository, PriceSnapshot, ProfileId, RepositoryError,
};

use super::row_mappers::{SNAPSHOT_SELECT_COLUMNS, format_timestamp, row_to_snapshot};

/// `SQLite` implementation of the append-only price history store.
pub struct SqlitePriceHistoryRepository {
    pool: SqlitePool,
}

impl SqlitePriceHistoryRepository {
    /// Create a new `SQLite` price history repository.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PriceHistoryRepository for SqlitePriceHistoryRepository {
    async fn append(
        &self,
        profile_id: ProfileId,
        snapshot: NewPriceSnapshot,
    ) -> Result<PriceSnapshot, RepositoryError> {
        let query = format!(
            "INSERT INTO price_snapshots (profile_id, price, recorded_at) VALUES (?, ?, ?) RETURNING {SNAPSHOT_SELECT_COLUMNS}"
        );

        // Read back the stored row so the timestamp carries storage precision.
        let row = sqlx::query(&query)
            .bind(profile_id)
            .bind(snapshot.price.value())
            .bind(format_timestamp(snapshot.recorded_at))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        row_to_snapshot(&row)
    }

    async fn list_for_profile(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<PriceSnapshot>, RepositoryError> {
        let query = format!(
            "SELECT {SNAPSHOT_SELECT_COLUMNS} FROM price_snapshots WHERE profile_id = ? ORDER BY recorded_at ASC, id ASC"
        );

        let rows = sqlx::query(&query)
            .bind(profile_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_snapshot).collect()
    }
}
