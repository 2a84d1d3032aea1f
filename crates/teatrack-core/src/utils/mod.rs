//! Utility functions shared by services and adapters.

pub mod validation;
