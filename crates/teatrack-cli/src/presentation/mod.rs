#![doc = include_str!("README.md")]

//! Shared CLI presentation utilities.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no domain transforms
//! - Domain aggregates such as the price summary come from core services

pub mod profile_display;
pub mod tables;

pub use profile_display::{render_history, render_profile, render_profile_table};
pub use tables::{format_change, format_price, separator, truncate_string};
