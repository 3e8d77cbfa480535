// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::models::CollaborationError;
use crate::money::MoneyError;
use crate::services::flights::AmbiguousFlightChoice;
use crate::services::geocoding::LookupError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Flight {flight_number} operates several legs; choose an origin airport")]
    AmbiguousFlight {
        flight_number: String,
        choices: Vec<AmbiguousFlightChoice>,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    /// Candidate legs per flight number for ambiguous flight lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    choices: Option<BTreeMap<String, Vec<AmbiguousFlightChoice>>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", Some(msg.clone())),
            AppError::Geocoding(msg) => {
                tracing::warn!(error = %msg, "Upstream lookup failed");
                (StatusCode::BAD_GATEWAY, "geocoding_error", Some(msg.clone()))
            }
            AppError::AmbiguousFlight { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ambiguous_flight",
                Some(self.to_string()),
            ),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let choices = match self {
            AppError::AmbiguousFlight {
                flight_number,
                choices,
            } => Some(BTreeMap::from([(flight_number, choices)])),
            _ => None,
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
            choices,
        };

        (status, Json(body)).into_response()
    }
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NoResults(_) => AppError::NotFound(err.to_string()),
            LookupError::NotConfigured(_) => AppError::Internal(anyhow::Error::new(err)),
            LookupError::Request(_) | LookupError::Status { .. } | LookupError::Decode(_) => {
                AppError::Geocoding(err.to_string())
            }
        }
    }
}

impl From<MoneyError> for AppError {
    fn from(err: MoneyError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<CollaborationError> for AppError {
    fn from(err: CollaborationError) -> Self {
        match err {
            CollaborationError::RequestNotFound(_) => AppError::NotFound(err.to_string()),
            CollaborationError::AlreadyMember(_)
            | CollaborationError::AlreadyRequested(_)
            | CollaborationError::AlreadyResolved(_) => AppError::Conflict(err.to_string()),
        }
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
