// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Transportation model: flights, trains and generic legs.
//!
//! `Transportation` is a closed sum type tagged by `type` on the wire.
//! Every consumer matches on all three variants.

use crate::models::Location;
use crate::time_utils::wall_clock;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError, ValidationErrors};

// ─── Flights ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct Airport {
    #[validate(length(equal = 3))]
    pub iata: String,
    pub name: String,
    pub municipality: String,
    #[validate(nested)]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_flight_leg"))]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct FlightLeg {
    pub id: String,
    #[validate(nested)]
    pub origin: Airport,
    #[validate(nested)]
    pub destination: Airport,
    pub airline: String,
    #[validate(length(min = 1))]
    pub flight_number: String,
    #[serde(with = "wall_clock")]
    pub departure_date_time: NaiveDateTime,
    #[serde(with = "wall_clock")]
    pub arrival_date_time: NaiveDateTime,
    /// Departure date as known to the flight data provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amadeus_flight_date: Option<NaiveDate>,
    pub duration_in_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft: Option<String>,
}

/// Booking reference for one airline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct Pnr {
    pub id: String,
    pub airline: String,
    pub pnr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct Flight {
    pub id: String,
    #[validate(length(min = 1), nested)]
    pub legs: Vec<FlightLeg>,
    #[serde(default)]
    pub pnrs: Vec<Pnr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_json: Option<serde_json::Value>,
}

// ─── Trains ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct TrainStation {
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(nested)]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_train_leg"))]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct TrainLeg {
    pub id: String,
    #[validate(nested)]
    pub origin: TrainStation,
    #[validate(nested)]
    pub destination: TrainStation,
    #[serde(with = "wall_clock")]
    pub departure_date_time: NaiveDateTime,
    #[serde(with = "wall_clock")]
    pub arrival_date_time: NaiveDateTime,
    pub duration_in_minutes: u32,
    pub line_name: String,
    pub operator_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct Train {
    pub id: String,
    #[validate(length(min = 1), nested)]
    pub legs: Vec<TrainLeg>,
    /// Token to re-fetch the journey from the rail provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_json: Option<serde_json::Value>,
}

// ─── Generic ─────────────────────────────────────────────────

/// Any other way of getting around (bus, car, ferry, bike, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_generic"))]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct GenericTransportation {
    pub id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Free-form kind, e.g. "BUS" or "FERRY"
    pub generic_type: String,
    #[serde(with = "wall_clock")]
    pub departure_date_time: NaiveDateTime,
    #[serde(with = "wall_clock")]
    pub arrival_date_time: NaiveDateTime,
    #[validate(nested)]
    pub origin: Location,
    #[validate(nested)]
    pub destination: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_json: Option<serde_json::Value>,
}

fn validate_flight_leg(leg: &FlightLeg) -> Result<(), ValidationError> {
    check_order(leg.departure_date_time, leg.arrival_date_time)
}

fn validate_train_leg(leg: &TrainLeg) -> Result<(), ValidationError> {
    check_order(leg.departure_date_time, leg.arrival_date_time)
}

fn validate_generic(generic: &GenericTransportation) -> Result<(), ValidationError> {
    check_order(generic.departure_date_time, generic.arrival_date_time)
}

fn check_order(departure: NaiveDateTime, arrival: NaiveDateTime) -> Result<(), ValidationError> {
    if arrival < departure {
        return Err(ValidationError::new("arrival_before_departure"));
    }
    Ok(())
}

// ─── Union ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub enum Transportation {
    Flight(Flight),
    Train(Train),
    Generic(GenericTransportation),
}

impl Validate for Transportation {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Transportation::Flight(flight) => flight.validate(),
            Transportation::Train(train) => train.validate(),
            Transportation::Generic(generic) => generic.validate(),
        }
    }
}

/// Departure and arrival of one leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegTimes {
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
}

impl LegTimes {
    fn departs_on(&self, day: NaiveDate) -> bool {
        self.departure.date() == day
    }

    fn arrives_on(&self, day: NaiveDate) -> bool {
        self.arrival.date() == day
    }
}

impl Transportation {
    pub fn id(&self) -> &str {
        match self {
            Transportation::Flight(flight) => &flight.id,
            Transportation::Train(train) => &train.id,
            Transportation::Generic(generic) => &generic.id,
        }
    }

    pub fn price(&self) -> Option<i64> {
        match self {
            Transportation::Flight(flight) => flight.price,
            Transportation::Train(train) => train.price,
            Transportation::Generic(generic) => generic.price,
        }
    }

    /// Times of every leg in travel order. A generic transportation is one leg.
    pub fn leg_times(&self) -> Vec<LegTimes> {
        match self {
            Transportation::Flight(flight) => flight
                .legs
                .iter()
                .map(|leg| LegTimes {
                    departure: leg.departure_date_time,
                    arrival: leg.arrival_date_time,
                })
                .collect(),
            Transportation::Train(train) => train
                .legs
                .iter()
                .map(|leg| LegTimes {
                    departure: leg.departure_date_time,
                    arrival: leg.arrival_date_time,
                })
                .collect(),
            Transportation::Generic(generic) => vec![LegTimes {
                departure: generic.departure_date_time,
                arrival: generic.arrival_date_time,
            }],
        }
    }

    /// Departure of the first leg; `None` if there are no legs.
    pub fn departure_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            Transportation::Flight(flight) => flight.legs.first().map(|l| l.departure_date_time),
            Transportation::Train(train) => train.legs.first().map(|l| l.departure_date_time),
            Transportation::Generic(generic) => Some(generic.departure_date_time),
        }
    }

    /// Arrival of the last leg; `None` if there are no legs.
    pub fn arrival_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            Transportation::Flight(flight) => flight.legs.last().map(|l| l.arrival_date_time),
            Transportation::Train(train) => train.legs.last().map(|l| l.arrival_date_time),
            Transportation::Generic(generic) => Some(generic.arrival_date_time),
        }
    }

    /// Calendar days of the first departure and the last arrival.
    pub fn day_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((
            self.departure_date_time()?.date(),
            self.arrival_date_time()?.date(),
        ))
    }

    /// Whether the journey is underway at some point on `day`.
    pub fn spans_day(&self, day: NaiveDate) -> bool {
        self.day_span()
            .is_some_and(|(departure, arrival)| departure <= day && day <= arrival)
    }

    /// Whether the journey ends on `day`.
    pub fn arrives_on(&self, day: NaiveDate) -> bool {
        self.arrival_date_time().is_some_and(|a| a.date() == day)
    }

    /// Whether travel continues past midnight after `day`.
    ///
    /// For flights and trains some leg departs on `day` and arrives later;
    /// a generic transportation is overnight on every day it does not arrive.
    pub fn is_overnight_on(&self, day: NaiveDate) -> bool {
        match self {
            Transportation::Flight(_) | Transportation::Train(_) => self
                .leg_times()
                .iter()
                .any(|leg| leg.departs_on(day) && !leg.arrives_on(day)),
            Transportation::Generic(generic) => generic.arrival_date_time.date() != day,
        }
    }

    /// Connection times between consecutive legs departing on `day`.
    pub fn layovers_on(&self, day: NaiveDate) -> Vec<Duration> {
        let legs: Vec<LegTimes> = self
            .leg_times()
            .into_iter()
            .filter(|leg| leg.departs_on(day))
            .collect();
        legs.windows(2)
            .map(|pair| pair[1].departure - pair[0].arrival)
            .collect()
    }

    /// Long display name, e.g. "Flight LH1234 from Munich to Lisbon (+1)".
    pub fn name(&self) -> String {
        match self {
            Transportation::Flight(flight) => match (flight.legs.first(), flight.legs.last()) {
                (Some(first), Some(last)) => format!(
                    "Flight {} from {} to {}{}",
                    first.flight_number,
                    first.origin.municipality,
                    last.destination.municipality,
                    extra_legs_suffix(flight.legs.len())
                ),
                _ => "Flight".to_string(),
            },
            Transportation::Train(train) => match (train.legs.first(), train.legs.last()) {
                (Some(first), Some(last)) => format!(
                    "Train {} from {} to {}{}",
                    first.line_name,
                    first.origin.name,
                    last.destination.name,
                    extra_legs_suffix(train.legs.len())
                ),
                _ => "Train".to_string(),
            },
            Transportation::Generic(generic) => generic.name.clone(),
        }
    }

    /// Short display name, e.g. "MUC → LIS".
    pub fn short_name(&self) -> String {
        match self {
            Transportation::Flight(flight) => match (flight.legs.first(), flight.legs.last()) {
                (Some(first), Some(last)) => {
                    format!("{} → {}", first.origin.iata, last.destination.iata)
                }
                _ => "Flight".to_string(),
            },
            Transportation::Train(train) => match (train.legs.first(), train.legs.last()) {
                (Some(first), Some(last)) => {
                    format!("{} → {}", first.origin.name, last.destination.name)
                }
                _ => "Train".to_string(),
            },
            Transportation::Generic(generic) => generic.name.clone(),
        }
    }
}

fn extra_legs_suffix(leg_count: usize) -> String {
    if leg_count > 1 {
        format!(" (+{})", leg_count - 1)
    } else {
        String::new()
    }
}
