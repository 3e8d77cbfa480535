// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flight and train lookup routes.

use crate::error::Result;
use crate::models::{Flight, Train};
use crate::services::{FlightQuery, TrainQuery};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/flights", post(find_flight))
        .route("/api/v1/trains", post(find_train))
}

async fn find_flight(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<FlightQuery>, JsonRejection>,
) -> Result<Json<Flight>> {
    let Json(query) = payload?;
    query.validate()?;

    Ok(Json(state.flights.find_flight(&query).await?))
}

async fn find_train(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<TrainQuery>, JsonRejection>,
) -> Result<Json<Train>> {
    let Json(query) = payload?;
    query.validate()?;

    Ok(Json(state.trains.find_journey(&query).await?))
}
