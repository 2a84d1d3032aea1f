//! `SQLite` implementation of the `ProfileRepository` trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};

use teatrack_core::{
    NewPriceSnapshot, NewProfile, Profile, ProfileId, ProfileRepository, RepositoryError, UserId,
};

use super::row_mappers::{
    PROFILE_SELECT_COLUMNS, format_date, format_timestamp, map_write_error, row_to_profile,
};

fn storage(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

/// Insert a snapshot row inside an open transaction.
async fn insert_snapshot(
    tx: &mut Transaction<'_, Sqlite>,
    profile_id: ProfileId,
    snapshot: NewPriceSnapshot,
) -> Result<(), RepositoryError> {
    sqlx::query("INSERT INTO price_snapshots (profile_id, price, recorded_at) VALUES (?, ?, ?)")
        .bind(profile_id)
        .bind(snapshot.price.value())
        .bind(format_timestamp(snapshot.recorded_at))
        .execute(&mut **tx)
        .await
        .map_err(storage)?;
    Ok(())
}

async fn fetch_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    id: ProfileId,
) -> Result<Profile, RepositoryError> {
    let row = sqlx::query(&format!(
        "SELECT {PROFILE_SELECT_COLUMNS} FROM profiles WHERE id = ?"
    ))
    .bind(id)
    .fetch_one(&mut **tx)
    .await
    .map_err(storage)?;
    row_to_profile(&row)
}

/// `SQLite` implementation of the `ProfileRepository` trait.
///
/// Profile writes that carry a price snapshot run in a single transaction.
pub struct SqliteProfileRepository {
    pool: SqlitePool,
}

impl SqliteProfileRepository {
    /// Create a new `SQLite` profile repository.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
    async fn list(&self) -> Result<Vec<Profile>, RepositoryError> {
        let query = format!("SELECT {PROFILE_SELECT_COLUMNS} FROM profiles ORDER BY id ASC");

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;

        rows.iter().map(row_to_profile).collect()
    }

    async fn get_by_id(&self, id: ProfileId) -> Result<Profile, RepositoryError> {
        let query = format!("SELECT {PROFILE_SELECT_COLUMNS} FROM profiles WHERE id = ?");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?
            .ok_or_else(|| RepositoryError::NotFound(format!("Profile with ID {id}")))?;

        row_to_profile(&row)
    }

    async fn find_by_owner(&self, user: &UserId) -> Result<Option<Profile>, RepositoryError> {
        let query = format!("SELECT {PROFILE_SELECT_COLUMNS} FROM profiles WHERE user_id = ?");

        sqlx::query(&query)
            .bind(user.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?
            .as_ref()
            .map(row_to_profile)
            .transpose()
    }

    async fn insert(
        &self,
        profile: &NewProfile,
        initial_snapshot: NewPriceSnapshot,
    ) -> Result<Profile, RepositoryError> {
        let now = format_timestamp(Utc::now());
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let result = sqlx::query(
            r"INSERT INTO profiles (
                user_id, factory_name, owner_name, contact_number, address,
                commodity_type, price_per_kilo, effective_date, operating_hours,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(profile.user_id.as_str())
        .bind(&profile.factory_name)
        .bind(&profile.owner_name)
        .bind(&profile.contact_number)
        .bind(&profile.address)
        .bind(profile.commodity_type.as_str())
        .bind(profile.price_per_kilo.value())
        .bind(format_date(profile.effective_date))
        .bind(&profile.operating_hours)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, || format!("Profile for user {}", profile.user_id)))?;

        let id = result.last_insert_rowid();
        insert_snapshot(&mut tx, id, initial_snapshot).await?;
        let stored = fetch_in_tx(&mut tx, id).await?;

        tx.commit().await.map_err(storage)?;
        Ok(stored)
    }

    async fn update(
        &self,
        profile: &Profile,
        snapshot: Option<NewPriceSnapshot>,
    ) -> Result<Profile, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let result = sqlx::query(
            r"UPDATE profiles SET
                factory_name = ?, owner_name = ?, contact_number = ?, address = ?,
                commodity_type = ?, price_per_kilo = ?, effective_date = ?,
                operating_hours = ?, updated_at = ?
            WHERE id = ?",
        )
        .bind(&profile.factory_name)
        .bind(&profile.owner_name)
        .bind(&profile.contact_number)
        .bind(&profile.address)
        .bind(profile.commodity_type.as_str())
        .bind(profile.price_per_kilo.value())
        .bind(format_date(profile.effective_date))
        .bind(&profile.operating_hours)
        .bind(format_timestamp(Utc::now()))
        .bind(profile.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, || format!("Profile with ID {}", profile.id)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Profile with ID {}",
                profile.id
            )));
        }

        if let Some(snapshot) = snapshot {
            insert_snapshot(&mut tx, profile.id, snapshot).await?;
        }
        let stored = fetch_in_tx(&mut tx, profile.id).await?;

        tx.commit().await.map_err(storage)?;
        Ok(stored)
    }

    async fn delete(&self, id: ProfileId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let result = sqlx::query("DELETE FROM profiles WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Profile with ID {id}")));
        }

        sqlx::query("DELETE FROM price_snapshots WHERE profile_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        tx.commit().await.map_err(storage)?;
        Ok(())
    }
}
