// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

pub const DEFAULT_ORS_URL: &str = "https://api.openrouteservice.org";
pub const DEFAULT_AMADEUS_URL: &str = "https://api.amadeus.com";
pub const DEFAULT_OPTD_URL: &str = "https://raw.githubusercontent.com/opentraveldata/opentraveldata/refs/heads/master/opentraveldata";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// OpenRouteService base URL
    pub ors_url: String,
    /// OpenRouteService API key
    pub ors_api_key: String,
    /// Base URL of the DB transport REST API
    pub dbvendo_url: String,
    /// Amadeus API base URL
    pub amadeus_url: String,
    /// Amadeus client credentials; flight lookups fail without them
    pub amadeus_api_key: Option<String>,
    pub amadeus_api_secret: Option<String>,
    /// Directory URL of the OpenTravelData CSV datasets
    pub optd_url: String,
    /// Timeout for outbound lookup requests
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: parse_or("PORT", DEFAULT_PORT)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            ors_url: env::var("ORS_URL").unwrap_or_else(|_| DEFAULT_ORS_URL.to_string()),
            ors_api_key: required("ORS_APIKEY")?,
            dbvendo_url: required("DBVENDO_URL")?,
            amadeus_url: env::var("AMADEUS_URL")
                .unwrap_or_else(|_| DEFAULT_AMADEUS_URL.to_string()),
            amadeus_api_key: optional("AMADEUS_APIKEY"),
            amadeus_api_secret: optional("AMADEUS_APISECRET"),
            optd_url: env::var("OPTD_URL").unwrap_or_else(|_| DEFAULT_OPTD_URL.to_string()),
            http_timeout_secs: parse_or("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
        })
    }

    /// Config for tests. Upstream URLs point nowhere; tests that need
    /// lookups override them with a mock server address.
    pub fn test_default() -> Self {
        Self {
            port: DEFAULT_PORT,
            frontend_url: "http://localhost:5173".to_string(),
            ors_url: "http://127.0.0.1:9".to_string(),
            ors_api_key: "test-key".to_string(),
            dbvendo_url: "http://127.0.0.1:9".to_string(),
            amadeus_url: "http://127.0.0.1:9".to_string(),
            amadeus_api_key: Some("test-key".to_string()),
            amadeus_api_secret: Some("test-secret".to_string()),
            optd_url: "http://127.0.0.1:9".to_string(),
            http_timeout_secs: 2,
        }
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}
