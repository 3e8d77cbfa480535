// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Accommodation booking model.

use crate::models::Location;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// A place to stay, occupying the nights `[arrival_date, departure_date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_stay"))]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct Accommodation {
    pub id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    /// Price in minor units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub location: Option<Location>,
}

impl Accommodation {
    /// Whether the night starting on `day` is spent here.
    pub fn covers_night(&self, day: NaiveDate) -> bool {
        self.arrival_date <= day && day < self.departure_date
    }
}

fn validate_stay(accommodation: &Accommodation) -> Result<(), ValidationError> {
    if accommodation.departure_date < accommodation.arrival_date {
        return Err(ValidationError::new("departure_before_arrival"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel(arrival: &str, departure: &str) -> Accommodation {
        Accommodation {
            id: "acc-1".to_string(),
            name: "Hotel Central".to_string(),
            description: None,
            arrival_date: arrival.parse().unwrap(),
            departure_date: departure.parse().unwrap(),
            price: Some(45_000),
            address: None,
            location: None,
        }
    }

    #[test]
    fn test_covers_night_is_half_open() {
        let acc = hotel("2025-06-01", "2025-06-03");
        assert!(acc.covers_night("2025-06-01".parse().unwrap()));
        assert!(acc.covers_night("2025-06-02".parse().unwrap()));
        assert!(!acc.covers_night("2025-06-03".parse().unwrap()));
        assert!(!acc.covers_night("2025-05-31".parse().unwrap()));
    }

    #[test]
    fn test_departure_before_arrival_is_invalid() {
        assert!(hotel("2025-06-01", "2025-06-03").validate().is_ok());
        assert!(hotel("2025-06-03", "2025-06-01").validate().is_err());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(hotel("2025-06-01", "2025-06-03")).unwrap();
        assert_eq!(json["arrivalDate"], "2025-06-01");
        assert_eq!(json["departureDate"], "2025-06-03");
        assert!(json.get("address").is_none());
    }
}
