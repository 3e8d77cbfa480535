// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod amadeus;
pub mod availability;
pub mod dbvendo;
pub mod flights;
pub mod geocoding;
pub mod itinerary;
pub mod journey_map;
pub mod openrouteservice;
pub mod opentraveldata;
pub mod trains;

pub use amadeus::AmadeusClient;
pub use availability::{disabled_date_ranges, merge_ranges, DateRange};
pub use dbvendo::DbVendoClient;
pub use flights::{AmbiguousFlightChoice, FlightQuery, FlightService};
pub use geocoding::{GeocodingService, LookupError, TransportationType};
pub use itinerary::{group_by_days, DayBucket, DaySeparator, TransportationEntry};
pub use openrouteservice::OpenRouteServiceClient;
pub use opentraveldata::OpenTravelDataClient;
pub use trains::{TrainQuery, TrainService};
