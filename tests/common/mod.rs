// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use kompass::config::Config;
use kompass::routes::create_router;
use kompass::services::{FlightService, GeocodingService, TrainService};
use kompass::AppState;
use serde_json::Value;
use std::sync::Arc;

/// Trip snapshot shared by the API tests and the benchmark.
#[allow(dead_code)]
pub fn lisbon_trip() -> Value {
    let raw = std::fs::read_to_string("tests/fixtures/trip_lisbon.json")
        .expect("Failed to read trip fixture");
    serde_json::from_str(&raw).expect("Failed to parse trip fixture")
}

/// Create a test app whose lookups go to `upstream_url`.
#[allow(dead_code)]
pub fn create_test_app_with_upstream(upstream_url: &str) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        ors_url: upstream_url.to_string(),
        dbvendo_url: upstream_url.to_string(),
        amadeus_url: upstream_url.to_string(),
        optd_url: upstream_url.to_string(),
        ..Config::test_default()
    };
    create_test_app_with_config(config)
}

/// Create a test app with unreachable upstream APIs.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default())
}

/// Create a test app from an explicit configuration.
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let geocoding = GeocodingService::from_config(&config).expect("Failed to build HTTP client");
    let flights = FlightService::from_config(&config).expect("Failed to build HTTP client");
    let trains = TrainService::from_config(&config).expect("Failed to build HTTP client");

    let state = Arc::new(AppState {
        config,
        geocoding,
        flights,
        trains,
    });
    (create_router(state.clone()), state)
}

#[allow(dead_code)]
pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
