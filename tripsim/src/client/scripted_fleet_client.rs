use std::collections::HashMap;
use std::sync::Mutex;

use tokio::time::Instant;

use super::{CallFailure, FleetApi, MoveTarget};
use crate::model::resource::{BikeId, RemoteTripId, ResourceId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Operation {
    Start,
    Move,
    End,
}

/// in-memory [`FleetApi`] with scripted failures keyed by operation and bike id.
/// every call is recorded along with the (virtual) time it was made.
pub(crate) struct ScriptedFleetClient {
    next_trip_id: Mutex<i64>,
    failures: Mutex<HashMap<(Operation, BikeId), u32>>,
    calls: Mutex<Vec<(Operation, BikeId, Instant)>>,
}

impl ScriptedFleetClient {
    pub fn new() -> ScriptedFleetClient {
        ScriptedFleetClient {
            next_trip_id: Mutex::new(100),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(vec![]),
        }
    }

    /// the next `times` calls of `op` for this bike fail
    pub fn fail(self, op: Operation, bike_id: i64, times: u32) -> ScriptedFleetClient {
        self.failures
            .lock()
            .expect("test client lock poisoned")
            .insert((op, ResourceId::from(bike_id)), times);
        self
    }

    pub fn always_fail(self, op: Operation, bike_id: i64) -> ScriptedFleetClient {
        self.fail(op, bike_id, u32::MAX)
    }

    /// bikes passed to `op`, in call order
    pub fn calls(&self, op: Operation) -> Vec<BikeId> {
        self.calls_at(op).into_iter().map(|(b, _)| b).collect()
    }

    pub fn calls_at(&self, op: Operation) -> Vec<(BikeId, Instant)> {
        self.calls
            .lock()
            .expect("test client lock poisoned")
            .iter()
            .filter(|(o, _, _)| *o == op)
            .map(|(_, b, t)| (b.clone(), *t))
            .collect()
    }

    fn record(&self, op: Operation, bike_id: &BikeId) -> Result<(), CallFailure> {
        self.calls
            .lock()
            .expect("test client lock poisoned")
            .push((op, bike_id.clone(), Instant::now()));
        let mut failures = self.failures.lock().expect("test client lock poisoned");
        match failures.get_mut(&(op, bike_id.clone())) {
            Some(remaining) if *remaining > 0 => {
                if *remaining != u32::MAX {
                    *remaining -= 1;
                }
                Err(CallFailure::Application {
                    url: format!("scripted://{op:?}/{bike_id}"),
                    status: 503,
                    body: String::from("scripted failure"),
                })
            }
            _ => Ok(()),
        }
    }
}

impl FleetApi for ScriptedFleetClient {
    async fn start_trip(
        &self,
        _user_id: &UserId,
        bike_id: &BikeId,
    ) -> Result<RemoteTripId, CallFailure> {
        self.record(Operation::Start, bike_id)?;
        let mut next = self.next_trip_id.lock().expect("test client lock poisoned");
        *next += 1;
        Ok(ResourceId::from(*next))
    }

    async fn move_bike(
        &self,
        bike_id: &BikeId,
        _target: MoveTarget<'_>,
    ) -> Result<(), CallFailure> {
        self.record(Operation::Move, bike_id)
    }

    async fn end_trip(
        &self,
        _trip_id: &RemoteTripId,
        _user_id: &UserId,
        bike_id: &BikeId,
    ) -> Result<(), CallFailure> {
        self.record(Operation::End, bike_id)
    }
}
