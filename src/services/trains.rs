// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Train journey lookup by train numbers.
//!
//! Journeys between the two stations are paged through until one uses
//! the requested trains in order. The chosen journey is re-fetched with
//! polylines to draw its map.

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Train, TrainLeg};
use crate::services::dbvendo::{DbVendoClient, Journey};
use crate::services::geocoding::{build_http_client, LookupError};
use crate::services::journey_map::JourneyMap;
use crate::time_utils::{format_wall_clock, parse_wall_clock};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use geojson::FeatureCollection;
use serde::Deserialize;
use serde_json::{json, Value};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Pages of later departures searched after the first one.
const MAX_LATER_PAGES: usize = 10;

const MAX_TRAINS: u64 = 8;

/// Journey request: the trains to take, in order.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct TrainQuery {
    #[validate(length(min = 1))]
    pub from_station_id: String,
    #[validate(length(min = 1))]
    pub to_station_id: String,
    /// Line names such as `"ICE 707"`; spacing and case are ignored
    #[validate(
        length(min = 1, max = MAX_TRAINS),
        custom(function = "validate_train_numbers")
    )]
    pub train_numbers: Vec<String>,
    pub departure_date: NaiveDate,
    #[serde(default)]
    pub via_station_id: Option<String>,
}

fn validate_train_numbers(numbers: &[String]) -> Result<(), ValidationError> {
    if numbers.iter().any(|n| n.trim().is_empty()) {
        return Err(ValidationError::new("blank_train_number"));
    }
    Ok(())
}

#[derive(Clone)]
pub struct TrainService {
    dbvendo: DbVendoClient,
}

impl TrainService {
    pub fn new(dbvendo: DbVendoClient) -> Self {
        Self { dbvendo }
    }

    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        let http = build_http_client(config)?;
        Ok(Self::new(DbVendoClient::new(http, &config.dbvendo_url)))
    }

    pub async fn find_journey(&self, query: &TrainQuery) -> Result<Train, AppError> {
        let journey = self.find_matching_journey(query).await?;
        let mut train = convert_journey(journey)?;

        if let Some(refresh_token) = train.refresh_token.as_deref() {
            let polylines = self.dbvendo.journey_polylines(refresh_token).await?;
            train.geo_json = train_map(&train.legs, &polylines)?;
        }

        tracing::info!(
            from = %query.from_station_id,
            to = %query.to_station_id,
            legs = train.legs.len(),
            "Train journey found"
        );
        Ok(train)
    }

    async fn find_matching_journey(&self, query: &TrainQuery) -> Result<Journey, AppError> {
        let mut later_than: Option<String> = None;
        for _ in 0..=MAX_LATER_PAGES {
            let page = self.dbvendo.journeys(query, later_than.as_deref()).await?;
            if let Some(journey) = page
                .journeys
                .into_iter()
                .find(|journey| uses_trains(journey, &query.train_numbers))
            {
                return Ok(journey);
            }
            match page.later_ref {
                Some(cursor) => later_than = Some(cursor),
                None => break,
            }
        }

        Err(AppError::NotFound(format!(
            "no journey with trains {} found",
            query.train_numbers.join(", ")
        )))
    }
}

fn normalized_line_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether the journey's rides start with the requested trains, in order.
/// Walking legs are skipped.
fn uses_trains(journey: &Journey, train_numbers: &[String]) -> bool {
    let mut lines = journey.legs.iter().filter_map(|leg| leg.line.as_ref());
    train_numbers.iter().all(|wanted| {
        lines
            .next()
            .is_some_and(|line| normalized_line_name(&line.name) == normalized_line_name(wanted))
    })
}

struct PlannedTime {
    wall_clock: NaiveDateTime,
    instant: Option<DateTime<FixedOffset>>,
}

fn planned_time(raw: Option<&str>) -> Result<PlannedTime, LookupError> {
    let raw = raw.ok_or_else(|| LookupError::Decode("journey leg without planned time".into()))?;
    let wall_clock = parse_wall_clock(raw)
        .map_err(|e| LookupError::Decode(format!("invalid timestamp '{}': {}", raw, e)))?;
    Ok(PlannedTime {
        wall_clock,
        instant: DateTime::parse_from_rfc3339(raw).ok(),
    })
}

/// Elapsed minutes, honoring offsets when both times carry one.
fn elapsed_minutes(departure: &PlannedTime, arrival: &PlannedTime) -> u32 {
    let elapsed = match (departure.instant, arrival.instant) {
        (Some(departure), Some(arrival)) => arrival - departure,
        _ => arrival.wall_clock - departure.wall_clock,
    };
    u32::try_from(elapsed.num_minutes()).unwrap_or(0)
}

fn convert_journey(journey: Journey) -> Result<Train, LookupError> {
    let mut legs = Vec::new();
    for leg in journey.legs {
        let Some(line) = leg.line else {
            continue;
        };
        let departure = planned_time(leg.planned_departure.as_deref())?;
        let arrival = planned_time(leg.planned_arrival.as_deref())?;

        legs.push(TrainLeg {
            id: leg.trip_id.unwrap_or_default(),
            origin: leg.origin.into_station(),
            destination: leg.destination.into_station(),
            departure_date_time: departure.wall_clock,
            arrival_date_time: arrival.wall_clock,
            duration_in_minutes: elapsed_minutes(&departure, &arrival),
            line_name: line.name,
            operator_name: line.operator.map(|o| o.name).unwrap_or_default(),
        });
    }

    Ok(Train {
        id: String::new(),
        legs,
        refresh_token: journey.refresh_token,
        price: None,
        geo_json: None,
    })
}

/// Route map of the journey; `None` without any route geometry.
fn train_map(legs: &[TrainLeg], polylines: &[FeatureCollection]) -> Result<Option<Value>, AppError> {
    let (Some(first), Some(last)) = (legs.first(), legs.last()) else {
        return Ok(None);
    };
    if polylines.is_empty() {
        return Ok(None);
    }

    let mut map = JourneyMap::new("TRAIN", &first.origin.name, &last.destination.name);
    for polyline in polylines {
        let points = polyline
            .features
            .iter()
            .filter_map(|feature| feature.geometry.as_ref())
            .filter_map(|geometry| geo::Point::<f64>::try_from(geometry.value.clone()).ok())
            .collect();
        map.add_line(points);
    }

    for leg in legs {
        let properties = json!({
            "lineName": leg.line_name,
            "departureDateTime": format_wall_clock(leg.departure_date_time),
            "arrivalDateTime": format_wall_clock(leg.arrival_date_time),
            "fromStation": leg.origin.name,
            "toStation": leg.destination.name,
        });
        map.add_stop_leg(&leg.origin.id, &leg.origin.location, properties.clone());
        map.add_stop_leg(&leg.destination.id, &leg.destination.location, properties);
    }

    map.into_json().map(Some)
}
