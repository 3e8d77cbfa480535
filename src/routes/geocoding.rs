// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geocoding lookup routes.

use crate::error::{AppError, Result};
use crate::models::{GeocodeLocation, Location, TrainStation};
use crate::services::TransportationType;
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::post,
    Json, Router,
};
use geojson::FeatureCollection;
use serde::Deserialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const MAX_QUERY_LENGTH: usize = 200;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/geocoding/location", post(lookup_location))
        .route("/api/v1/geocoding/station", post(lookup_station))
        .route("/api/v1/geocoding/directions", post(lookup_directions))
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub query: Option<String>,
}

impl LookupQuery {
    /// Trimmed search text, rejecting empty or oversized input.
    fn text(&self) -> Result<&str> {
        let text = self.query.as_deref().map(str::trim).unwrap_or("");
        if text.is_empty() {
            return Err(AppError::BadRequest("query must not be empty".to_string()));
        }
        if text.chars().count() > MAX_QUERY_LENGTH {
            return Err(AppError::BadRequest(format!(
                "query longer than {} characters",
                MAX_QUERY_LENGTH
            )));
        }
        Ok(text)
    }
}

async fn lookup_location(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<LookupQuery>, QueryRejection>,
) -> Result<Json<GeocodeLocation>> {
    let Query(params) = params?;
    let query = params.text()?;
    Ok(Json(state.geocoding.lookup_location(query).await?))
}

async fn lookup_station(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<LookupQuery>, QueryRejection>,
) -> Result<Json<TrainStation>> {
    let Query(params) = params?;
    let query = params.text()?;
    Ok(Json(state.geocoding.lookup_train_station(query).await?))
}

// ─── Directions ──────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct DirectionsRequest {
    #[validate(nested)]
    pub start: Location,
    #[validate(nested)]
    pub end: Location,
    pub transportation_type: TransportationType,
}

async fn lookup_directions(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<DirectionsRequest>, JsonRejection>,
) -> Result<Json<FeatureCollection>> {
    let Json(request) = payload?;
    request.validate()?;

    let collection = state
        .geocoding
        .lookup_directions(&request.start, &request.end, request.transportation_type)
        .await?;
    Ok(Json(collection))
}
