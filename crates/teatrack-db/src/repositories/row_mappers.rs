//! Row mapping helpers for `SQLite` queries.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use teatrack_core::{CommodityType, PricePerKilo, PriceSnapshot, Profile, RepositoryError, UserId};

/// Shared SELECT column list for profile queries.
pub const PROFILE_SELECT_COLUMNS: &str = "id, user_id, factory_name, owner_name, contact_number, address, commodity_type, price_per_kilo, effective_date, operating_hours, created_at, updated_at";

/// Shared SELECT column list for snapshot queries.
pub const SNAPSHOT_SELECT_COLUMNS: &str = "id, profile_id, price, recorded_at";

/// Date format for `effective_date`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed-width timestamp text, so lexical order is chronological.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Serialization(format!("timestamp {raw:?}: {e}")))
}

fn get<'r, T>(row: &'r SqliteRow, column: &str) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|e| RepositoryError::Storage(e.to_string()))
}

fn price(value: f64) -> Result<PricePerKilo, RepositoryError> {
    PricePerKilo::new(value).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Parse a database row into a Profile.
pub fn row_to_profile(row: &SqliteRow) -> Result<Profile, RepositoryError> {
    let user_id: String = get(row, "user_id")?;
    let commodity: String = get(row, "commodity_type")?;
    let effective_date: String = get(row, "effective_date")?;
    let created_at: String = get(row, "created_at")?;
    let updated_at: String = get(row, "updated_at")?;

    Ok(Profile {
        id: get(row, "id")?,
        user_id: UserId::new(user_id)
            .ok_or_else(|| RepositoryError::Serialization("blank user_id".to_string()))?,
        factory_name: get(row, "factory_name")?,
        owner_name: get(row, "owner_name")?,
        contact_number: get(row, "contact_number")?,
        address: get(row, "address")?,
        commodity_type: CommodityType::parse(&commodity).ok_or_else(|| {
            RepositoryError::Serialization(format!("unknown commodity {commodity:?}"))
        })?,
        price_per_kilo: price(get(row, "price_per_kilo")?)?,
        effective_date: NaiveDate::parse_from_str(&effective_date, DATE_FORMAT).map_err(|e| {
            RepositoryError::Serialization(format!("effective_date {effective_date:?}: {e}"))
        })?,
        operating_hours: get(row, "operating_hours")?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// Parse a database row into a `PriceSnapshot`.
pub fn row_to_snapshot(row: &SqliteRow) -> Result<PriceSnapshot, RepositoryError> {
    let recorded_at: String = get(row, "recorded_at")?;
    Ok(PriceSnapshot {
        id: get(row, "id")?,
        profile_id: get(row, "profile_id")?,
        price: price(get(row, "price")?)?,
        recorded_at: parse_timestamp(&recorded_at)?,
    })
}

/// Map a sqlx error, turning unique-index violations into `AlreadyExists`.
pub fn map_write_error(err: sqlx::Error, what: impl FnOnce() -> String) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::AlreadyExists(what())
        }
        sqlx::Error::Database(db) if db.is_check_violation() => {
            RepositoryError::Constraint(db.message().to_string())
        }
        _ => RepositoryError::Storage(err.to_string()),
    }
}
