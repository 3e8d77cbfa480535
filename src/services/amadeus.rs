// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Amadeus flight schedule API client.
//!
//! Uses the client-credentials flow; the access token is cached until
//! shortly before it expires.

use crate::services::geocoding::{fetch_json, LookupError};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Refresh the token this long before Amadeus expires it.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Deserialize)]
struct ScheduleResponse {
    #[serde(default)]
    data: Vec<DatedFlight>,
}

/// One scheduled operation of a flight number.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatedFlight {
    pub scheduled_departure_date: NaiveDate,
    pub flight_designator: FlightDesignator,
    #[serde(default)]
    pub flight_points: Vec<FlightPoint>,
    #[serde(default)]
    pub legs: Vec<ScheduledLeg>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDesignator {
    pub carrier_code: String,
    pub flight_number: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPoint {
    pub iata_code: String,
    #[serde(default)]
    pub departure: Option<PointTimings>,
    #[serde(default)]
    pub arrival: Option<PointTimings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointTimings {
    #[serde(default)]
    pub timings: Vec<Timing>,
}

/// Scheduled time, e.g. qualifier `STD` with value `2026-01-30T09:35+04:00`.
#[derive(Debug, Clone, Deserialize)]
pub struct Timing {
    pub qualifier: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledLeg {
    pub board_point_iata_code: String,
    pub off_point_iata_code: String,
    #[serde(default)]
    pub aircraft_equipment: Option<AircraftEquipment>,
    /// ISO 8601 duration, e.g. `PT13H50M`
    pub scheduled_leg_duration: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftEquipment {
    pub aircraft_type: String,
}

impl DatedFlight {
    pub fn flight_point(&self, iata: &str) -> Option<&FlightPoint> {
        self.flight_points.iter().find(|p| p.iata_code == iata)
    }
}

#[derive(Clone)]
pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl AmadeusClient {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        credentials: Option<(String, String)>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            token: Arc::default(),
        }
    }

    /// Scheduled operations of one flight number on one date.
    pub async fn schedule(
        &self,
        date: NaiveDate,
        carrier_code: &str,
        flight_number: &str,
    ) -> Result<Vec<DatedFlight>, LookupError> {
        let token = self.access_token().await?;
        let url = format!("{}/v2/schedule/flights", self.base_url);
        let date = date.to_string();
        let request = self.http.get(&url).bearer_auth(token).query(&[
            ("carrierCode", carrier_code),
            ("flightNumber", flight_number),
            ("scheduledDepartureDate", date.as_str()),
        ]);

        let response: ScheduleResponse = fetch_json(request).await?;
        tracing::debug!(
            carrier_code,
            flight_number,
            date = %date,
            operations = response.data.len(),
            "Flight schedule retrieved"
        );
        Ok(response.data)
    }

    /// Cached access token, refreshed when close to expiry. The lock is
    /// held across the refresh so at most one token request is in flight.
    async fn access_token(&self) -> Result<String, LookupError> {
        let mut cached = self.token.lock().await;
        let now = Utc::now();
        if let Some(token) = cached.as_ref() {
            if now + Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let (api_key, api_secret) = self
            .credentials
            .as_ref()
            .ok_or(LookupError::NotConfigured("Amadeus API credentials"))?;
        let url = format!("{}/v1/security/oauth2/token", self.base_url);
        let request = self.http.post(&url).form(&[
            ("grant_type", "client_credentials"),
            ("client_id", api_key.as_str()),
            ("client_secret", api_secret.as_str()),
        ]);

        let response: TokenResponse = fetch_json(request).await?;
        tracing::info!(expires_in = response.expires_in, "Amadeus access token refreshed");

        let token = CachedToken {
            access_token: response.access_token,
            expires_at: now + Duration::seconds(response.expires_in),
        };
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }
}
