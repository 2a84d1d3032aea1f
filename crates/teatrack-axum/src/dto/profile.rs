//! Profile and price history wire types (camelCase JSON).

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use teatrack_core::{
    CommodityType, PriceInput, PriceSnapshot, PriceSummary, Profile, ProfileFields, ProfileId,
    ProfileWithHistory,
};

/// Body of `POST /api/profile` and `PUT /api/profile/{id}`.
///
/// Every field is optional on the wire; create requires all of them and
/// update applies whichever are present. `pricePerKilo` may be a number or
/// a numeric string.
///
/// Fields are kept as raw JSON so that a value of the wrong type is
/// reported by field validation, after the existence and ownership checks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub factory_name: Option<Value>,
    pub owner_name: Option<Value>,
    pub contact_number: Option<Value>,
    pub address: Option<Value>,
    pub commodity_type: Option<Value>,
    pub price_per_kilo: Option<Value>,
    pub effective_date: Option<Value>,
    pub operating_hours: Option<Value>,
}

fn typed<T: DeserializeOwned>(
    value: Option<Value>,
    name: &'static str,
    rejected: &mut Vec<&'static str>,
) -> Option<T> {
    match serde_json::from_value(value?) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            rejected.push(name);
            None
        }
    }
}

impl From<ProfileRequest> for ProfileFields {
    fn from(req: ProfileRequest) -> Self {
        let mut rejected = Vec::new();
        Self {
            factory_name: typed(req.factory_name, "factoryName", &mut rejected),
            owner_name: typed(req.owner_name, "ownerName", &mut rejected),
            contact_number: typed(req.contact_number, "contactNumber", &mut rejected),
            address: typed(req.address, "address", &mut rejected),
            commodity_type: typed(req.commodity_type, "commodityType", &mut rejected),
            price_per_kilo: typed(req.price_per_kilo, "pricePerKilo", &mut rejected),
            effective_date: typed(req.effective_date, "effectiveDate", &mut rejected),
            operating_hours: typed(req.operating_hours, "operatingHours", &mut rejected),
            rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: ProfileId,
    pub user_id: String,
    pub factory_name: String,
    pub owner_name: String,
    pub contact_number: String,
    pub address: String,
    pub commodity_type: CommodityType,
    pub price_per_kilo: f64,
    pub effective_date: NaiveDate,
    pub operating_hours: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id.as_str().to_string(),
            factory_name: p.factory_name,
            owner_name: p.owner_name,
            contact_number: p.contact_number,
            address: p.address,
            commodity_type: p.commodity_type,
            price_per_kilo: p.price_per_kilo.value(),
            effective_date: p.effective_date,
            operating_hours: p.operating_hours,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// One point of a profile's price history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<PriceSnapshot> for HistoryEntry {
    fn from(s: PriceSnapshot) -> Self {
        Self {
            price: s.price.value(),
            timestamp: s.recorded_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummaryDto {
    pub latest: f64,
    pub previous: f64,
    pub highest: f64,
    pub lowest: f64,
    pub average: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl From<PriceSummary> for PriceSummaryDto {
    fn from(s: PriceSummary) -> Self {
        Self {
            latest: s.latest,
            previous: s.previous,
            highest: s.highest,
            lowest: s.lowest,
            average: s.average,
            change: s.change,
            change_percent: s.change_percent,
        }
    }
}

/// Body of `GET /api/profile/{id}/details`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileDetailsResponse {
    pub profile: ProfileResponse,
    pub history: Vec<HistoryEntry>,
    pub summary: Option<PriceSummaryDto>,
}

impl From<ProfileWithHistory> for ProfileDetailsResponse {
    fn from(v: ProfileWithHistory) -> Self {
        Self {
            profile: v.profile.into(),
            history: v.history.into_iter().map(HistoryEntry::from).collect(),
            summary: v.summary.map(PriceSummaryDto::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Profile deleted successfully".to_string(),
        }
    }
}
