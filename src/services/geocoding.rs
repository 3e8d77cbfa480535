// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geocoding lookups used by the location, station and route inputs.
//!
//! Free-text locations and directions come from OpenRouteService, train
//! stations from the DB transport REST API. Each lookup is a single
//! request; failures are reported to the caller without retry.

use crate::config::Config;
use crate::models::{GeocodeLocation, Location, TrainStation};
use crate::services::dbvendo::DbVendoClient;
use crate::services::openrouteservice::OpenRouteServiceClient;
use geojson::{Feature, FeatureCollection, Geometry};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Errors from upstream lookup APIs.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("No results for '{0}'")]
    NoResults(String),

    #[error("{0} not configured")]
    NotConfigured(&'static str),
}

/// Send a request and fail on a non-success status.
async fn send_checked(request: reqwest::RequestBuilder) -> Result<reqwest::Response, LookupError> {
    let response = request
        .send()
        .await
        .map_err(|e| LookupError::Request(e.without_url().to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), body = %body, "Lookup API error");
        return Err(LookupError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Send a request and decode a successful JSON response.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, LookupError> {
    send_checked(request)
        .await?
        .json()
        .await
        .map_err(|e| LookupError::Decode(e.without_url().to_string()))
}

/// Send a request and return the successful response body as text.
pub(crate) async fn fetch_text(request: reqwest::RequestBuilder) -> Result<String, LookupError> {
    send_checked(request)
        .await?
        .text()
        .await
        .map_err(|e| LookupError::Decode(e.without_url().to_string()))
}

/// Shared HTTP client for all upstream APIs.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, LookupError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .user_agent(concat!("kompass/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LookupError::Request(e.to_string()))
}

/// How a route is travelled; selects the routing profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub enum TransportationType {
    Flight,
    Train,
    Bus,
    Car,
    Ferry,
    Boat,
    Bike,
    Hike,
    Other,
}

impl TransportationType {
    /// OpenRouteService routing profile.
    pub fn routing_profile(self) -> &'static str {
        match self {
            TransportationType::Bike => "cycling-regular",
            TransportationType::Hike => "foot-hiking",
            TransportationType::Flight
            | TransportationType::Train
            | TransportationType::Bus
            | TransportationType::Car
            | TransportationType::Ferry
            | TransportationType::Boat
            | TransportationType::Other => "driving-car",
        }
    }
}

/// Facade over the lookup APIs.
#[derive(Clone)]
pub struct GeocodingService {
    ors: OpenRouteServiceClient,
    dbvendo: DbVendoClient,
}

impl GeocodingService {
    pub fn new(ors: OpenRouteServiceClient, dbvendo: DbVendoClient) -> Self {
        Self { ors, dbvendo }
    }

    /// Build the service with a shared HTTP client from configuration.
    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        let http = build_http_client(config)?;
        Ok(Self::new(
            OpenRouteServiceClient::new(http.clone(), &config.ors_url, &config.ors_api_key),
            DbVendoClient::new(http, &config.dbvendo_url),
        ))
    }

    pub async fn lookup_location(&self, query: &str) -> Result<GeocodeLocation, LookupError> {
        let location = self.ors.lookup_location(query).await?;
        tracing::debug!(query, label = %location.label, "Location resolved");
        Ok(location)
    }

    pub async fn lookup_train_station(&self, query: &str) -> Result<TrainStation, LookupError> {
        let station = self.dbvendo.lookup_station(query).await?;
        tracing::debug!(query, station_id = %station.id, "Train station resolved");
        Ok(station)
    }

    /// Route between two points, with both endpoints appended as point
    /// features and the transportation type as a foreign member.
    pub async fn lookup_directions(
        &self,
        start: &Location,
        end: &Location,
        transportation_type: TransportationType,
    ) -> Result<FeatureCollection, LookupError> {
        let mut collection = self
            .ors
            .lookup_directions(start, end, transportation_type.routing_profile())
            .await?;

        collection
            .foreign_members
            .get_or_insert_with(Default::default)
            .insert(
                "transportationType".to_string(),
                serde_json::to_value(transportation_type)
                    .map_err(|e| LookupError::Decode(e.to_string()))?,
            );
        for endpoint in [start, end] {
            let point = geojson::Value::from(&endpoint.to_point());
            collection.features.push(Feature::from(Geometry::new(point)));
        }

        Ok(collection)
    }
}
