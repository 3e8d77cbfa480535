// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Kompass: collaborative trip planning
//!
//! This crate provides the trip domain model, the itinerary and booking
//! computations, and the backend API for geocoding, flight and train
//! lookups.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod money;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{FlightService, GeocodingService, TrainService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub geocoding: GeocodingService,
    pub flights: FlightService,
    pub trains: TrainService,
}
