//! Price history types.
//!
//! Snapshots are append-only. They are removed only together with the
//! profile that owns them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::price::PricePerKilo;
use super::profile::{Profile, ProfileId};

/// A snapshot about to be written.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewPriceSnapshot {
    pub price: PricePerKilo,
    pub recorded_at: DateTime<Utc>,
}

impl NewPriceSnapshot {
    /// A snapshot stamped with the current time.
    pub fn now(price: PricePerKilo) -> Self {
        Self {
            price,
            recorded_at: Utc::now(),
        }
    }
}

/// An immutable, persisted point-in-time price record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub id: i64,
    pub profile_id: ProfileId,
    pub price: PricePerKilo,
    pub recorded_at: DateTime<Utc>,
}

/// Aggregate figures over a non-empty price history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub latest: f64,
    /// Second-to-last price, or `latest` when there is only one snapshot.
    pub previous: f64,
    pub highest: f64,
    pub lowest: f64,
    pub average: f64,
    /// `latest - previous`.
    pub change: f64,
    /// Change relative to `previous`, in percent.
    pub change_percent: f64,
}

impl PriceSummary {
    /// Summarise a history ordered oldest first. Returns `None` when empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_history(history: &[PriceSnapshot]) -> Option<Self> {
        let prices: Vec<f64> = history.iter().map(|s| s.price.value()).collect();
        let latest = *prices.last()?;
        let previous = if prices.len() > 1 {
            prices[prices.len() - 2]
        } else {
            latest
        };

        let highest = prices.iter().copied().fold(f64::MIN, f64::max);
        let lowest = prices.iter().copied().fold(f64::MAX, f64::min);
        let average = prices.iter().sum::<f64>() / prices.len() as f64;
        let change = latest - previous;
        let change_percent = if previous == 0.0 {
            0.0
        } else {
            change / previous * 100.0
        };

        Some(Self {
            latest,
            previous,
            highest,
            lowest,
            average,
            change,
            change_percent,
        })
    }
}

/// A profile joined with its price history, as served by the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileWithHistory {
    pub profile: Profile,
    pub history: Vec<PriceSnapshot>,
    pub summary: Option<PriceSummary>,
}
