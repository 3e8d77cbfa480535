// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OpenRouteService API client (geocoding search and directions).

use crate::models::{GeocodeLocation, Location};
use crate::services::geocoding::{fetch_json, LookupError};
use geojson::FeatureCollection;

/// OpenRouteService API client.
#[derive(Clone)]
pub struct OpenRouteServiceClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenRouteServiceClient {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Resolve free text to the single best matching place.
    pub async fn lookup_location(&self, query: &str) -> Result<GeocodeLocation, LookupError> {
        let url = format!("{}/geocode/search", self.base_url);
        let request = self.http.get(&url).query(&[
            ("api_key", self.api_key.as_str()),
            ("size", "1"),
            ("text", query),
        ]);

        let collection: FeatureCollection = fetch_json(request).await?;
        let feature = collection
            .features
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NoResults(query.to_string()))?;

        let label = feature
            .property("label")
            .and_then(|v| v.as_str())
            .unwrap_or(query)
            .to_string();

        match feature.geometry.map(|g| g.value) {
            Some(geojson::Value::Point(coords)) if coords.len() >= 2 => Ok(GeocodeLocation {
                label,
                latitude: coords[1],
                longitude: coords[0],
            }),
            _ => Err(LookupError::Decode(
                "geocoding result is not a point".to_string(),
            )),
        }
    }

    /// Route between two points for the given routing profile.
    pub async fn lookup_directions(
        &self,
        start: &Location,
        end: &Location,
        profile: &str,
    ) -> Result<FeatureCollection, LookupError> {
        let url = format!("{}/v2/directions/{}", self.base_url, profile);
        let request = self.http.get(&url).query(&[
            ("api_key", self.api_key.clone()),
            ("start", format!("{},{}", start.longitude, start.latitude)),
            ("end", format!("{},{}", end.longitude, end.latitude)),
        ]);

        fetch_json(request).await
    }
}
