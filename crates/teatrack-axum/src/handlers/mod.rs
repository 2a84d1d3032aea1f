//! HTTP handlers for the Axum adapter.
//!
//! Handlers are thin: extract, call the core, convert to DTOs. All error
//! mapping happens in `HttpError`.

pub mod history;
pub mod profiles;
