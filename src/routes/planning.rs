// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stateless planning computations over trip snapshots.

use crate::error::{AppError, Result};
use crate::models::Trip;
use crate::money::{format_amount, parse_monetary_value, DEFAULT_DECIMALS};
use crate::services::{disabled_date_ranges, group_by_days, DateRange, DayBucket};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/itinerary", post(itinerary))
        .route(
            "/api/v1/accommodation/disabled-ranges",
            post(accommodation_disabled_ranges),
        )
        .route("/api/v1/amounts/normalize", get(normalize_amount))
}

// ─── Itinerary ───────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ItineraryResponse<'a> {
    days: Vec<DayBucket<'a>>,
    total_price: i64,
}

async fn itinerary(payload: std::result::Result<Json<Trip>, JsonRejection>) -> Result<Response> {
    let Json(trip) = payload?;
    trip.validate_all()?;

    let response = ItineraryResponse {
        days: group_by_days(&trip),
        total_price: trip.total_price(),
    };
    Ok(Json(response).into_response())
}

// ─── Accommodation ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct DisabledRangesRequest {
    pub trip: Trip,
    /// Booking being edited
    #[serde(default)]
    pub exclude_accommodation_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct DisabledRangesResponse {
    pub ranges: Vec<DateRange>,
}

async fn accommodation_disabled_ranges(
    payload: std::result::Result<Json<DisabledRangesRequest>, JsonRejection>,
) -> Result<Json<DisabledRangesResponse>> {
    let Json(request) = payload?;
    request.trip.validate_all()?;
    if let Some(id) = request.exclude_accommodation_id.as_deref() {
        if request.trip.find_accommodation(id).is_none() {
            return Err(AppError::NotFound(format!("accommodation {} not in trip", id)));
        }
    }

    let ranges = disabled_date_ranges(&request.trip, request.exclude_accommodation_id.as_deref());
    tracing::debug!(
        trip = %request.trip.tid,
        ranges = ranges.len(),
        "Computed disabled accommodation ranges"
    );
    Ok(Json(DisabledRangesResponse { ranges }))
}

// ─── Amounts ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NormalizeQuery {
    pub value: Option<String>,
    pub decimals: Option<u32>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct NormalizedAmount {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub amount: i64,
    pub formatted: String,
}

async fn normalize_amount(
    params: std::result::Result<Query<NormalizeQuery>, QueryRejection>,
) -> Result<Json<NormalizedAmount>> {
    let Query(params) = params?;
    let value = params
        .value
        .ok_or_else(|| AppError::BadRequest("value is required".to_string()))?;
    let decimals = params.decimals.unwrap_or(DEFAULT_DECIMALS);

    let amount = parse_monetary_value(&value, decimals)?;
    Ok(Json(NormalizedAmount {
        amount,
        formatted: format_amount(amount, decimals),
    }))
}
