// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip model: the top-level planning unit.

use crate::models::{Accommodation, Activity, FileAttachment, Transportation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError, ValidationErrors};

/// Longest accepted trip, roughly ten years.
pub const MAX_TRIP_DAYS: u32 = 3660;

/// A trip with everything planned for it.
///
/// `stid` identifies the shared (collaboration) wrapper, `tid` the trip
/// record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct Trip {
    #[serde(default)]
    pub stid: String,
    #[serde(default)]
    pub tid: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub image_url: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    #[validate(nested)]
    pub accommodation: Vec<Accommodation>,
    #[serde(default)]
    pub transportation: Vec<Transportation>,
    #[serde(default)]
    #[validate(nested)]
    pub files: Vec<FileAttachment>,
}

impl Trip {
    /// Validate the trip and every record it contains.
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if self.end_date < self.start_date {
            errors.add("end_date", ValidationError::new("end_before_start"));
        } else if self.length_in_days() > MAX_TRIP_DAYS {
            let mut error = ValidationError::new("trip_too_long");
            error.message = Some(format!("trips are limited to {} days", MAX_TRIP_DAYS).into());
            errors.add("end_date", error);
        }

        for transportation in &self.transportation {
            if let Err(nested) = transportation.validate() {
                let mut error = ValidationError::new("invalid_transportation");
                error.message = Some(format!("{}: {}", transportation.id(), nested).into());
                errors.add("transportation", error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Number of calendar days covered, zero if the dates are inverted.
    pub fn length_in_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        u32::try_from(days.max(0)).unwrap_or(u32::MAX)
    }

    pub fn find_accommodation(&self, id: &str) -> Option<&Accommodation> {
        self.accommodation.iter().find(|a| a.id == id)
    }

    /// Files attached to the given activity, accommodation or transportation.
    pub fn files_for<'a>(&'a self, entity_id: &'a str) -> impl Iterator<Item = &'a FileAttachment> {
        self.files.iter().filter(move |f| f.is_attached_to(entity_id))
    }

    /// Sum of all known prices in minor units.
    pub fn total_price(&self) -> i64 {
        let activities = self.activities.iter().filter_map(|a| a.price);
        let accommodation = self.accommodation.iter().filter_map(|a| a.price);
        let transportation = self.transportation.iter().filter_map(Transportation::price);
        activities
            .chain(accommodation)
            .chain(transportation)
            .fold(0_i64, i64::saturating_add)
    }
}
