// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the DB transport REST API (db-vendo-client based).

use crate::models::{Location, TrainStation};
use crate::services::geocoding::{fetch_json, LookupError};
use crate::services::trains::TrainQuery;
use geojson::FeatureCollection;
use serde::Deserialize;

/// Journeys requested per page.
const JOURNEYS_PER_PAGE: u32 = 10;

#[derive(Clone)]
pub struct DbVendoClient {
    http: reqwest::Client,
    base_url: String,
}

/// Station or stop as returned by `/locations` and inside journeys.
#[derive(Debug, Clone, Deserialize)]
pub struct StationOrStop {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub location: Option<StopLocation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl StationOrStop {
    /// Stops without coordinates end up at (0, 0).
    pub fn into_station(self) -> TrainStation {
        let location = self
            .location
            .map_or(Location::new(0.0, 0.0), |l| Location::new(l.latitude, l.longitude));
        TrainStation {
            id: self.id,
            name: self.name,
            location,
        }
    }
}

/// One page of `/journeys` results.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneysPage {
    #[serde(default)]
    pub journeys: Vec<Journey>,
    /// Cursor for the next page of later departures
    pub later_ref: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub legs: Vec<JourneyLeg>,
}

/// A ride or a walk; walks have no line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyLeg {
    pub trip_id: Option<String>,
    pub origin: StationOrStop,
    pub destination: StationOrStop,
    pub planned_departure: Option<String>,
    pub planned_arrival: Option<String>,
    pub line: Option<Line>,
    pub polyline: Option<FeatureCollection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub name: String,
    pub operator: Option<Operator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Operator {
    pub name: String,
}

#[derive(Deserialize)]
struct RefreshedJourney {
    journey: Journey,
}

impl DbVendoClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Best matching station for a free-text query. Points of interest are
    /// excluded; results without coordinates are skipped.
    pub async fn lookup_station(&self, query: &str) -> Result<TrainStation, LookupError> {
        let url = format!("{}/locations", self.base_url);
        let request = self
            .http
            .get(&url)
            .query(&[("query", query), ("poi", "false")]);

        let results: Vec<StationOrStop> = fetch_json(request).await?;
        results
            .into_iter()
            .find(|stop| stop.location.is_some())
            .map(StationOrStop::into_station)
            .ok_or_else(|| LookupError::NoResults(query.to_string()))
    }

    /// Journeys between two stations with one transfer less than the
    /// number of trains. Without `later_than` the search starts at the
    /// departure date; otherwise it continues after that page cursor.
    pub async fn journeys(
        &self,
        query: &TrainQuery,
        later_than: Option<&str>,
    ) -> Result<JourneysPage, LookupError> {
        let url = format!("{}/journeys", self.base_url);
        let transfers = query.train_numbers.len().saturating_sub(1);
        let mut params = vec![
            ("from", query.from_station_id.clone()),
            ("to", query.to_station_id.clone()),
            ("transfers", transfers.to_string()),
            ("results", JOURNEYS_PER_PAGE.to_string()),
        ];
        match later_than {
            Some(cursor) => params.push(("laterThan", cursor.to_string())),
            None => params.push(("departure", query.departure_date.to_string())),
        }
        if let Some(via) = &query.via_station_id {
            params.push(("via", via.clone()));
        }

        fetch_json(self.http.get(&url).query(&params)).await
    }

    /// Route geometry of a journey, one point collection per leg that has one.
    pub async fn journey_polylines(
        &self,
        refresh_token: &str,
    ) -> Result<Vec<FeatureCollection>, LookupError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| LookupError::Request(format!("invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Request(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .push("journeys")
            .push(refresh_token);

        let request = self.http.get(url).query(&[("polylines", "true")]);
        let refreshed: RefreshedJourney = fetch_json(request).await?;
        Ok(refreshed
            .journey
            .legs
            .into_iter()
            .filter_map(|leg| leg.polyline)
            .collect())
    }
}
