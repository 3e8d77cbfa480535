// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Join request and access routes over shared trip snapshots.
//!
//! The sync framework stores the shared trip; these handlers apply one
//! state transition to the posted snapshot and return the result.

use crate::error::Result;
use crate::models::{Access, GrantedRole, Role, SharedTrip, TripResource, User};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/collaboration/access", post(access))
        .route("/api/v1/collaboration/join-requests", post(request_join))
        .route(
            "/api/v1/collaboration/join-requests/{request_id}/approve",
            post(approve_join_request),
        )
        .route(
            "/api/v1/collaboration/join-requests/{request_id}/reject",
            post(reject_join_request),
        )
}

type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;

// ─── Access ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
    pub shared_trip: SharedTrip,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct ResourceAccess {
    pub resource: TripResource,
    pub access: Access,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct AccessResponse {
    pub role: Option<Role>,
    pub access: Vec<ResourceAccess>,
}

/// Role and per-resource access of a user. Non-members get no access.
async fn access(payload: JsonBody<AccessRequest>) -> Result<Json<AccessResponse>> {
    let Json(request) = payload?;
    let role = request.shared_trip.role_of(&request.user_id);

    let access = TripResource::ALL
        .into_iter()
        .map(|resource| ResourceAccess {
            resource,
            access: role.map_or(Access::None, |r| r.access(resource)),
        })
        .collect();

    Ok(Json(AccessResponse { role, access }))
}

// ─── Join Requests ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequestBody {
    pub shared_trip: SharedTrip,
    pub user: User,
}

async fn request_join(payload: JsonBody<JoinRequestBody>) -> Result<Json<SharedTrip>> {
    let Json(JoinRequestBody {
        mut shared_trip,
        user,
    }) = payload?;
    shared_trip.request_join(user, chrono::Utc::now())?;
    Ok(Json(shared_trip))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveBody {
    pub shared_trip: SharedTrip,
    pub role: GrantedRole,
}

async fn approve_join_request(
    Path(request_id): Path<String>,
    payload: JsonBody<ApproveBody>,
) -> Result<Json<SharedTrip>> {
    let Json(ApproveBody {
        mut shared_trip,
        role,
    }) = payload?;
    shared_trip.approve_join_request(&request_id, role)?;
    Ok(Json(shared_trip))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectBody {
    pub shared_trip: SharedTrip,
}

async fn reject_join_request(
    Path(request_id): Path<String>,
    payload: JsonBody<RejectBody>,
) -> Result<Json<SharedTrip>> {
    let Json(RejectBody { mut shared_trip }) = payload?;
    shared_trip.reject_join_request(&request_id)?;
    Ok(Json(shared_trip))
}
