//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, HTTP, etc.).
//!
//! # Structure
//!
//! - `profile` - Profile types (`Profile`, `NewProfile`, `ProfileFields`, `UserId`)
//! - `price` - Price and commodity value types
//! - `history` - Price snapshots and derived summaries

pub mod history;
pub mod price;
pub mod profile;

pub use history::{NewPriceSnapshot, PriceSnapshot, PriceSummary, ProfileWithHistory};
pub use price::{CommodityType, PriceError, PriceInput, PricePerKilo};
pub use profile::{NewProfile, Profile, ProfileFields, ProfileId, UserId};
