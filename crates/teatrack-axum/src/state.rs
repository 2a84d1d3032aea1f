//! Shared application state type.
//!
//! Defines the `AppState` type used across all handlers and routers.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// This is an Arc-wrapped `AxumContext` holding the core facade and the
/// identity verifier used by the `AuthUser` extractor.
pub type AppState = Arc<AxumContext>;
