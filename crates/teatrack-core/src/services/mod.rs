//! Core services - the application's business logic layer.
//!
//! This module contains high-level service abstractions that orchestrate
//! between ports (trait interfaces) and domain logic. Services here are
//! pure orchestrators - they don't know about concrete implementations.

mod app_core;
mod directory_service;
mod price_history;
mod profile_locks;
mod profile_service;

#[cfg(test)]
mod test_support;

pub use app_core::AppCore;
pub use directory_service::DirectoryService;
pub use price_history::PriceHistoryRecorder;
pub use profile_locks::ProfileLocks;
pub use profile_service::ProfileService;
