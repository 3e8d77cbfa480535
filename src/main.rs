// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Kompass API Server
//!
//! Serves geocoding, flight and train lookups and itinerary computations
//! for the trip planning frontend.

use kompass::{
    config::Config,
    services::{FlightService, GeocodingService, TrainService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Kompass API");

    let geocoding =
        GeocodingService::from_config(&config).expect("Failed to initialize HTTP client");
    tracing::info!(
        ors_url = %config.ors_url,
        dbvendo_url = %config.dbvendo_url,
        "Geocoding service initialized"
    );

    let flights = FlightService::from_config(&config).expect("Failed to initialize HTTP client");
    let trains = TrainService::from_config(&config).expect("Failed to initialize HTTP client");
    if config.amadeus_api_key.is_none() || config.amadeus_api_secret.is_none() {
        tracing::warn!("Amadeus credentials not set; flight lookups will fail");
    }
    tracing::info!(
        amadeus_url = %config.amadeus_url,
        optd_url = %config.optd_url,
        "Transportation services initialized"
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        geocoding,
        flights,
        trains,
    });

    let app = kompass::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kompass=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
