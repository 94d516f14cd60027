use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::resource::{BikeId, RemoteTripId, UserId};
use super::Route;

/// lifecycle states of a simulated trip.
///
/// ```text
/// Paired -> Started -> Moved -> EndPending -> Ended
///                                   |
///                                   +-------> Abandoned
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TripState {
    Paired,
    Started,
    Moved,
    EndPending,
    Ended,
    Abandoned,
}

impl TripState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TripState::Ended | TripState::Abandoned)
    }
}

impl Display for TripState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TripState::Paired => "paired",
            TripState::Started => "started",
            TripState::Moved => "moved",
            TripState::EndPending => "end_pending",
            TripState::Ended => "ended",
            TripState::Abandoned => "abandoned",
        };
        write!(f, "{s}")
    }
}

/// a (user, bike, route) pairing driven through the trip lifecycle. fields are
/// filled in as the trip advances: `remote_trip_id` once the ledger accepts the
/// start call, `estimated_duration_seconds` once the bike has been moved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Trip {
    pub user_id: UserId,
    pub bike_id: BikeId,
    pub route: Route,
    pub remote_trip_id: Option<RemoteTripId>,
    pub estimated_duration_seconds: Option<f64>,
    pub state: TripState,
}

impl Trip {
    pub fn paired(user_id: UserId, bike_id: BikeId, route: Route) -> Trip {
        Trip {
            user_id,
            bike_id,
            route,
            remote_trip_id: None,
            estimated_duration_seconds: None,
            state: TripState::Paired,
        }
    }

    pub fn started(self, remote_trip_id: RemoteTripId) -> Trip {
        Trip {
            remote_trip_id: Some(remote_trip_id),
            state: TripState::Started,
            ..self
        }
    }

    pub fn moved(self, estimated_duration_seconds: f64) -> Trip {
        Trip {
            estimated_duration_seconds: Some(estimated_duration_seconds),
            state: TripState::Moved,
            ..self
        }
    }

    pub fn with_state(self, state: TripState) -> Trip {
        Trip { state, ..self }
    }
}

impl Display for Trip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.remote_trip_id {
            Some(trip_id) => write!(
                f,
                "trip {trip_id} (user {}, bike {})",
                self.user_id, self.bike_id
            ),
            None => write!(f, "user {} on bike {}", self.user_id, self.bike_id),
        }
    }
}
