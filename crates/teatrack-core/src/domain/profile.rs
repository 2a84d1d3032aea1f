//! Profile domain types.
//!
//! A profile is one factory's public procurement listing. Each user owns
//! at most one profile.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::price::{CommodityType, PriceInput, PricePerKilo};

/// Database ID of a profile.
pub type ProfileId = i64;

/// Opaque identifier of an authenticated user.
///
/// Produced by an identity verifier; the core never inspects its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a user identifier. Returns `None` for blank input.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Input Types
// ─────────────────────────────────────────────────────────────────────────────

/// Profile fields as supplied by a caller, before validation.
///
/// Every field is optional so the same type serves both creation (where all
/// fields are required) and partial update (where absent fields keep their
/// stored values).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub factory_name: Option<String>,
    pub owner_name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub commodity_type: Option<String>,
    pub price_per_kilo: Option<PriceInput>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub effective_date: Option<String>,
    pub operating_hours: Option<String>,
    /// Fields the caller supplied with a value of the wrong type.
    #[serde(skip)]
    pub rejected: Vec<&'static str>,
}

impl ProfileFields {
    /// Whether the caller supplied no fields at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validated Types
// ─────────────────────────────────────────────────────────────────────────────

/// A validated profile that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    pub user_id: UserId,
    pub factory_name: String,
    pub owner_name: String,
    pub contact_number: String,
    pub address: String,
    pub commodity_type: CommodityType,
    pub price_per_kilo: PricePerKilo,
    pub effective_date: NaiveDate,
    pub operating_hours: String,
}

/// A persisted profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Database ID (always present for persisted profiles).
    pub id: ProfileId,
    /// The single user allowed to mutate or delete this profile.
    pub user_id: UserId,
    pub factory_name: String,
    pub owner_name: String,
    pub contact_number: String,
    pub address: String,
    pub commodity_type: CommodityType,
    pub price_per_kilo: PricePerKilo,
    pub effective_date: NaiveDate,
    pub operating_hours: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every write.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Whether `user` owns this profile.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.user_id == *user
    }
}

impl NewProfile {
    /// Attach persistence metadata, producing a stored profile.
    pub fn into_profile(self, id: ProfileId, now: DateTime<Utc>) -> Profile {
        Profile {
            id,
            user_id: self.user_id,
            factory_name: self.factory_name,
            owner_name: self.owner_name,
            contact_number: self.contact_number,
            address: self.address,
            commodity_type: self.commodity_type,
            price_per_kilo: self.price_per_kilo,
            effective_date: self.effective_date,
            operating_hours: self.operating_hours,
            created_at: now,
            updated_at: now,
        }
    }
}
