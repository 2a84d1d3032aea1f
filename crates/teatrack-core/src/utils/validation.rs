//! Profile field validation.
//!
//! All schema checks happen here, once, before anything is written:
//! presence of required fields, commodity enum membership, numeric price
//! positivity and date parsing.

use chrono::{DateTime, NaiveDate};
use thiserror::Error;

use crate::domain::{CommodityType, NewProfile, PriceError, Profile, ProfileFields, UserId};
use crate::ports::CoreError;

/// A field failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// One or more required fields were absent or blank.
    #[error("All fields are required (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A supplied text field was blank.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("commodityType must be one of Tea, Coffee (got {0:?})")]
    InvalidCommodity(String),

    #[error("pricePerKilo: {0}")]
    InvalidPrice(#[from] PriceError),

    #[error("effectiveDate must be YYYY-MM-DD or an RFC 3339 timestamp (got {0:?})")]
    InvalidDate(String),

    /// A field was supplied with a value of the wrong type.
    #[error("{0} has an invalid type")]
    WrongType(&'static str),
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Parse an effective date given as `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// For timestamps only the calendar date is kept.
pub fn parse_effective_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

fn parse_commodity(raw: &str) -> Result<CommodityType, ValidationError> {
    CommodityType::parse(raw).ok_or_else(|| ValidationError::InvalidCommodity(raw.to_string()))
}

fn reject_wrong_types(fields: &ProfileFields) -> Result<(), ValidationError> {
    fields
        .rejected
        .first()
        .copied()
        .map_or(Ok(()), |name| Err(ValidationError::WrongType(name)))
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Validate a full field set for profile creation.
///
/// Every field is required. Missing fields are reported together.
pub fn validate_new_profile(
    user_id: UserId,
    fields: &ProfileFields,
) -> Result<NewProfile, ValidationError> {
    reject_wrong_types(fields)?;

    let mut missing = Vec::new();
    let mut require = |name: &'static str, value: Option<&String>| {
        present(value).map_or_else(
            || {
                missing.push(name);
                String::new()
            },
            str::to_string,
        )
    };

    let factory_name = require("factoryName", fields.factory_name.as_ref());
    let owner_name = require("ownerName", fields.owner_name.as_ref());
    let contact_number = require("contactNumber", fields.contact_number.as_ref());
    let address = require("address", fields.address.as_ref());
    let commodity_type = require("commodityType", fields.commodity_type.as_ref());
    let effective_date = require("effectiveDate", fields.effective_date.as_ref());
    let operating_hours = require("operatingHours", fields.operating_hours.as_ref());
    let price = fields.price_per_kilo.as_ref();
    if price.is_none() {
        missing.push("pricePerKilo");
    }

    let Some(price) = price.filter(|_| missing.is_empty()) else {
        return Err(ValidationError::MissingFields(missing));
    };

    Ok(NewProfile {
        user_id,
        factory_name,
        owner_name,
        contact_number,
        address,
        commodity_type: parse_commodity(&commodity_type)?,
        price_per_kilo: price.coerce()?,
        effective_date: parse_effective_date(&effective_date)?,
        operating_hours,
    })
}

fn merge_text(
    target: &mut String,
    name: &'static str,
    value: Option<&String>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField(name));
        }
        *target = trimmed.to_string();
    }
    Ok(())
}

/// Apply a partial update to `current`, returning the merged profile.
///
/// Absent fields keep their stored values, so an empty field set yields
/// `current` unchanged. Supplied fields must be valid. Identity, ownership
/// and timestamps are never touched.
pub fn apply_update(current: &Profile, fields: &ProfileFields) -> Result<Profile, ValidationError> {
    reject_wrong_types(fields)?;

    let mut next = current.clone();
    merge_text(&mut next.factory_name, "factoryName", fields.factory_name.as_ref())?;
    merge_text(&mut next.owner_name, "ownerName", fields.owner_name.as_ref())?;
    merge_text(
        &mut next.contact_number,
        "contactNumber",
        fields.contact_number.as_ref(),
    )?;
    merge_text(&mut next.address, "address", fields.address.as_ref())?;
    merge_text(
        &mut next.operating_hours,
        "operatingHours",
        fields.operating_hours.as_ref(),
    )?;

    if let Some(raw) = &fields.commodity_type {
        next.commodity_type = parse_commodity(raw)?;
    }
    if let Some(raw) = &fields.effective_date {
        next.effective_date = parse_effective_date(raw)?;
    }
    if let Some(price) = &fields.price_per_kilo {
        next.price_per_kilo = price.coerce()?;
    }

    Ok(next)
}
