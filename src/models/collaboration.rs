// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Collaboration on a shared trip: roles, access and join requests.
//!
//! Group membership itself is enforced by the sync framework. This module
//! models who holds which role and how join requests move between states.

use crate::models::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Role of a user within a shared trip, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub enum Role {
    Admin,
    Member,
    Guest,
    /// Server-side accounts that keep transportation data up to date
    Worker,
}

/// Roles an admin can grant when approving a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub enum GrantedRole {
    Admin,
    Member,
    Guest,
}

impl From<GrantedRole> for Role {
    fn from(role: GrantedRole) -> Self {
        match role {
            GrantedRole::Admin => Role::Admin,
            GrantedRole::Member => Role::Member,
            GrantedRole::Guest => Role::Guest,
        }
    }
}

/// Parts of a trip that are shared with different groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub enum TripResource {
    Details,
    Activities,
    Accommodation,
    Transportation,
    Notes,
    Files,
    JoinRequests,
}

impl TripResource {
    pub const ALL: [TripResource; 7] = [
        TripResource::Details,
        TripResource::Activities,
        TripResource::Accommodation,
        TripResource::Transportation,
        TripResource::Notes,
        TripResource::Files,
        TripResource::JoinRequests,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub enum Access {
    None,
    Read,
    Write,
}

impl Role {
    /// Access this role has to a part of the trip.
    pub fn access(self, resource: TripResource) -> Access {
        use TripResource::*;
        match (self, resource) {
            (Role::Admin, _) => Access::Write,
            (Role::Member, JoinRequests) => Access::None,
            (Role::Member, _) => Access::Write,
            (Role::Guest, Files | JoinRequests) => Access::None,
            (Role::Guest, _) => Access::Read,
            (Role::Worker, Transportation) => Access::Write,
            (Role::Worker, _) => Access::None,
        }
    }

    pub fn can_read(self, resource: TripResource) -> bool {
        self.access(resource) >= Access::Read
    }

    pub fn can_write(self, resource: TripResource) -> bool {
        self.access(resource) == Access::Write
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub enum JoinRequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A user's request to be let into a shared trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct JoinRequest {
    pub id: String,
    pub account: User,
    pub status: JoinRequestStatus,
    pub requested_at: DateTime<Utc>,
}

/// Collaboration wrapper around a trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct SharedTrip {
    pub stid: String,
    pub trip_id: String,
    #[serde(default)]
    pub admins: Vec<User>,
    #[serde(default)]
    pub members: Vec<User>,
    #[serde(default)]
    pub guests: Vec<User>,
    #[serde(default)]
    pub workers: Vec<User>,
    #[serde(default)]
    pub join_requests: Vec<JoinRequest>,
}

/// Errors from join request handling.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CollaborationError {
    #[error("User {0} already has access to this trip")]
    AlreadyMember(String),

    #[error("User {0} already has a pending join request")]
    AlreadyRequested(String),

    #[error("Join request {0} not found")]
    RequestNotFound(String),

    #[error("Join request {0} was already resolved")]
    AlreadyResolved(String),
}

impl SharedTrip {
    pub fn new(stid: impl Into<String>, trip_id: impl Into<String>, owner: User) -> Self {
        Self {
            stid: stid.into(),
            trip_id: trip_id.into(),
            admins: vec![owner],
            ..Self::default()
        }
    }

    fn group(&self, role: Role) -> &[User] {
        match role {
            Role::Admin => &self.admins,
            Role::Member => &self.members,
            Role::Guest => &self.guests,
            Role::Worker => &self.workers,
        }
    }

    fn group_mut(&mut self, role: Role) -> &mut Vec<User> {
        match role {
            Role::Admin => &mut self.admins,
            Role::Member => &mut self.members,
            Role::Guest => &mut self.guests,
            Role::Worker => &mut self.workers,
        }
    }

    /// Strongest role the user holds, if any.
    pub fn role_of(&self, user_id: &str) -> Option<Role> {
        [Role::Admin, Role::Member, Role::Guest, Role::Worker]
            .into_iter()
            .find(|role| self.group(*role).iter().any(|u| u.id == user_id))
    }

    /// Requests still awaiting a decision, oldest first.
    pub fn pending_requests(&self) -> Vec<&JoinRequest> {
        let mut pending: Vec<&JoinRequest> = self
            .join_requests
            .iter()
            .filter(|r| r.status == JoinRequestStatus::Pending)
            .collect();
        pending.sort_by_key(|r| r.requested_at);
        pending
    }

    /// File a pending join request for `user`.
    ///
    /// Requests are keyed by account id, so a user who was rejected
    /// earlier replaces the old request.
    pub fn request_join(
        &mut self,
        user: User,
        now: DateTime<Utc>,
    ) -> Result<&JoinRequest, CollaborationError> {
        if self.role_of(&user.id).is_some() {
            return Err(CollaborationError::AlreadyMember(user.id));
        }

        let existing = self.join_requests.iter().position(|r| r.account.id == user.id);
        if let Some(idx) = existing {
            if self.join_requests[idx].status == JoinRequestStatus::Pending {
                return Err(CollaborationError::AlreadyRequested(user.id));
            }
            self.join_requests.remove(idx);
        }

        tracing::info!(stid = %self.stid, user_id = %user.id, "Join request filed");
        self.join_requests.push(JoinRequest {
            id: user.id.clone(),
            account: user,
            status: JoinRequestStatus::Pending,
            requested_at: now,
        });
        let last = self.join_requests.len() - 1;
        Ok(&self.join_requests[last])
    }

    fn pending_request_mut(
        &mut self,
        request_id: &str,
    ) -> Result<&mut JoinRequest, CollaborationError> {
        let request = self
            .join_requests
            .iter_mut()
            .find(|r| r.id == request_id)
            .ok_or_else(|| CollaborationError::RequestNotFound(request_id.to_string()))?;
        if request.status != JoinRequestStatus::Pending {
            return Err(CollaborationError::AlreadyResolved(request_id.to_string()));
        }
        Ok(request)
    }

    /// Approve a pending request and add the user to the group for `role`.
    pub fn approve_join_request(
        &mut self,
        request_id: &str,
        role: GrantedRole,
    ) -> Result<(), CollaborationError> {
        let account = self.pending_request_mut(request_id)?.account.clone();
        if self.role_of(&account.id).is_some() {
            return Err(CollaborationError::AlreadyMember(account.id));
        }
        self.pending_request_mut(request_id)?.status = JoinRequestStatus::Approved;

        tracing::info!(
            stid = %self.stid,
            user_id = %account.id,
            role = ?role,
            "Join request approved"
        );
        self.group_mut(role.into()).push(account);
        Ok(())
    }

    /// Reject a pending request.
    pub fn reject_join_request(&mut self, request_id: &str) -> Result<(), CollaborationError> {
        let request = self.pending_request_mut(request_id)?;
        request.status = JoinRequestStatus::Rejected;
        tracing::info!(stid = %self.stid, request_id, "Join request rejected");
        Ok(())
    }
}
