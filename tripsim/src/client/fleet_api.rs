use geo::Point;
use serde::Serialize;

use super::CallFailure;
use crate::model::resource::{BikeId, RemoteTripId, UserId};
use crate::model::Route;

/// destination of a bike move, either a single position or a full route.
#[derive(Debug, Clone, Copy)]
pub enum MoveTarget<'a> {
    Position(Point<f64>),
    Route(&'a Route),
}

/// JSON payload shape of a [`MoveTarget`], `[lon, lat]` or `[[lon, lat], ...]`
#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum MoveTargetPayload {
    Position([f64; 2]),
    Route(Vec<[f64; 2]>),
}

impl From<MoveTarget<'_>> for MoveTargetPayload {
    fn from(value: MoveTarget<'_>) -> Self {
        match value {
            MoveTarget::Position(p) => MoveTargetPayload::Position([p.x(), p.y()]),
            MoveTarget::Route(route) => MoveTargetPayload::Route(route.coordinates()),
        }
    }
}

/// the remote calls a simulation run makes against the trip ledger and the
/// bike mover. start calls are not idempotent and must not be retried by
/// callers; end calls are safe to repeat.
#[allow(async_fn_in_trait)]
pub trait FleetApi {
    /// opens a trip in the ledger, returning the ledger's id for it
    async fn start_trip(
        &self,
        user_id: &UserId,
        bike_id: &BikeId,
    ) -> Result<RemoteTripId, CallFailure>;

    /// relocates a bike to a position or along a route
    async fn move_bike(&self, bike_id: &BikeId, target: MoveTarget<'_>)
    -> Result<(), CallFailure>;

    /// closes a previously started trip
    async fn end_trip(
        &self,
        trip_id: &RemoteTripId,
        user_id: &UserId,
        bike_id: &BikeId,
    ) -> Result<(), CallFailure>;
}
