// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod accommodation;
pub mod activity;
pub mod attachment;
pub mod collaboration;
pub mod location;
pub mod transportation;
pub mod trip;
pub mod user;

pub use accommodation::Accommodation;
pub use activity::Activity;
pub use attachment::FileAttachment;
pub use collaboration::{
    Access, CollaborationError, GrantedRole, JoinRequest, JoinRequestStatus, Role, SharedTrip,
    TripResource,
};
pub use location::{GeocodeLocation, Location};
pub use transportation::{
    Airport, Flight, FlightLeg, GenericTransportation, Pnr, Train, TrainLeg, TrainStation,
    Transportation,
};
pub use trip::Trip;
pub use user::User;
