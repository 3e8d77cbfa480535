// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OpenTravelData reference datasets: airports, aircraft types, airlines.
//!
//! The `^`-separated CSV files are downloaded on first use and kept in
//! memory for the lifetime of the process. A failed download leaves the
//! dataset unloaded so the next lookup tries again.

use crate::models::{Airport, Location};
use crate::services::geocoding::{fetch_text, LookupError};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;

const AIRPORT_DATASET: &str = "optd_por_public.csv";
const AIRCRAFT_DATASET: &str = "optd_aircraft.csv";
const AIRLINE_DATASET: &str = "optd_airline_best_known_so_far.csv";

/// The airport dataset is tens of megabytes.
const DATASET_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);

// Column positions in optd_por_public.csv
const POR_IATA: usize = 0;
const POR_NAME: usize = 6;
const POR_LATITUDE: usize = 8;
const POR_LONGITUDE: usize = 9;
const POR_TIMEZONE: usize = 31;
const POR_JANUARY_OFFSET: usize = 32;
const POR_JULY_OFFSET: usize = 33;
const POR_CITY_NAMES: usize = 37;

// Airline type column value for cargo carriers
const CARGO_AIRLINE: &str = "C";

/// Airport with the time zone data needed to convert schedule times.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportRecord {
    pub airport: Airport,
    pub timezone: String,
    /// UTC offset on January 1st, in minutes
    pub january_offset: Option<i32>,
    /// UTC offset on July 1st, in minutes
    pub july_offset: Option<i32>,
}

impl AirportRecord {
    /// UTC offset in effect on `date`, approximated by the July offset
    /// from April to October and the January offset otherwise.
    pub fn utc_offset_on(&self, date: NaiveDate) -> Option<Duration> {
        let minutes = if (4..=10).contains(&date.month()) {
            self.july_offset
        } else {
            self.january_offset
        }?;
        Some(Duration::minutes(i64::from(minutes)))
    }
}

type Table<T> = HashMap<String, T>;

#[derive(Clone)]
pub struct OpenTravelDataClient {
    http: reqwest::Client,
    base_url: String,
    airports: Arc<OnceCell<Table<AirportRecord>>>,
    aircraft: Arc<OnceCell<Table<String>>>,
    airlines: Arc<OnceCell<Table<String>>>,
}

impl OpenTravelDataClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            airports: Arc::default(),
            aircraft: Arc::default(),
            airlines: Arc::default(),
        }
    }

    pub async fn airport(&self, iata: &str) -> Result<Option<AirportRecord>, LookupError> {
        let airports = self
            .airports
            .get_or_try_init(|| self.load(AIRPORT_DATASET, parse_airports))
            .await?;
        Ok(airports.get(iata).cloned())
    }

    /// Display name of an IATA aircraft type, e.g. `"Airbus A320"`.
    pub async fn aircraft_name(&self, code: &str) -> Result<Option<String>, LookupError> {
        let aircraft = self
            .aircraft
            .get_or_try_init(|| self.load(AIRCRAFT_DATASET, parse_aircraft))
            .await?;
        Ok(aircraft.get(code).cloned())
    }

    /// Name of the passenger airline with the given two-letter code.
    pub async fn airline_name(&self, iata: &str) -> Result<Option<String>, LookupError> {
        let airlines = self
            .airlines
            .get_or_try_init(|| self.load(AIRLINE_DATASET, parse_airlines))
            .await?;
        Ok(airlines.get(iata).cloned())
    }

    async fn load<T>(
        &self,
        dataset: &'static str,
        parse: fn(&str) -> Result<Table<T>, LookupError>,
    ) -> Result<Table<T>, LookupError> {
        let url = format!("{}/{}", self.base_url, dataset);
        let body = fetch_text(self.http.get(&url).timeout(DATASET_TIMEOUT)).await?;
        let table = parse(&body)?;
        tracing::info!(dataset, entries = table.len(), "OpenTravelData dataset loaded");
        Ok(table)
    }
}

fn records(body: &str) -> impl Iterator<Item = Result<csv::StringRecord, LookupError>> + '_ {
    csv::ReaderBuilder::new()
        .delimiter(b'^')
        .flexible(true)
        .quoting(false)
        .from_reader(body.as_bytes())
        .into_records()
        .map(|record| record.map_err(|e| LookupError::Decode(e.to_string())))
}

/// Offset column in hours (e.g. `5.5`) to whole minutes.
fn offset_minutes(raw: &str) -> Option<i32> {
    let hours: f64 = raw.trim().parse().ok()?;
    Some((hours * 60.0).round() as i32)
}

/// Airports keyed by IATA code. The first row for a code wins.
fn parse_airports(body: &str) -> Result<Table<AirportRecord>, LookupError> {
    let mut airports = HashMap::new();
    for record in records(body) {
        let record = record?;
        if record.len() <= POR_CITY_NAMES {
            continue;
        }
        let iata = &record[POR_IATA];
        if iata.is_empty() || airports.contains_key(iata) {
            continue;
        }
        let (Ok(latitude), Ok(longitude)) = (
            record[POR_LATITUDE].parse::<f64>(),
            record[POR_LONGITUDE].parse::<f64>(),
        ) else {
            continue;
        };

        let municipality = record[POR_CITY_NAMES]
            .split('|')
            .next()
            .unwrap_or_default()
            .to_string();
        airports.insert(
            iata.to_string(),
            AirportRecord {
                airport: Airport {
                    iata: iata.to_string(),
                    name: record[POR_NAME].to_string(),
                    municipality,
                    location: Location::new(latitude, longitude),
                },
                timezone: record[POR_TIMEZONE].to_string(),
                january_offset: offset_minutes(&record[POR_JANUARY_OFFSET]),
                july_offset: offset_minutes(&record[POR_JULY_OFFSET]),
            },
        );
    }
    Ok(airports)
}

fn parse_aircraft(body: &str) -> Result<Table<String>, LookupError> {
    let mut aircraft = HashMap::new();
    for record in records(body) {
        let record = record?;
        if record.len() < 3 || record[0].is_empty() {
            continue;
        }
        let name = format!("{} {}", &record[1], &record[2]).trim().to_string();
        aircraft.entry(record[0].to_string()).or_insert(name);
    }
    Ok(aircraft)
}

fn parse_airlines(body: &str) -> Result<Table<String>, LookupError> {
    let mut airlines = HashMap::new();
    for record in records(body) {
        let record = record?;
        if record.len() < 12 || record[5].is_empty() || &record[11] == CARGO_AIRLINE {
            continue;
        }
        airlines
            .entry(record[5].to_string())
            .or_insert_with(|| record[7].to_string());
    }
    Ok(airlines)
}
