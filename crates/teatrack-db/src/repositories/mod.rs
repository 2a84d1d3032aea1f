//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_price_history_repository;
mod sqlite_profile_repository;

pub use sqlite_price_history_repository::SqlitePriceHistoryRepository;
pub use sqlite_profile_repository::SqliteProfileRepository;
