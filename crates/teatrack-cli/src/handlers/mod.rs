#![doc = include_str!("README.md")]

//! Command handlers that delegate to `AppCore`.
//!
//! Handlers should NOT:
//! - Access repositories directly
//! - Contain business logic
//! - Manage database connections

pub mod history;
pub mod list;
pub mod paths;
pub mod serve;
pub mod show;
pub mod token;
