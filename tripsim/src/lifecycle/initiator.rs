use std::num::NonZeroUsize;

use futures::stream::{self, StreamExt};

use super::{BatchOutcome, BatchReport, LifecyclePhase};
use crate::client::{CallFailure, FleetApi, MoveTarget};
use crate::model::duration::DurationEstimator;
use crate::model::resource::RemoteTripId;
use crate::model::Trip;
use crate::SimulationError;

/// issues the start, move and end calls for trips.
///
/// start and move run as batches whose failed trips are dropped, never retried:
/// a repeated start call would open a duplicate trip in the ledger. at most
/// `concurrency` calls are in flight at once (1 means strictly one after the
/// other), and results are always consumed in input order.
pub struct TripInitiator<'a, C> {
    client: &'a C,
    estimator: DurationEstimator,
    concurrency: NonZeroUsize,
}

impl<'a, C: FleetApi> TripInitiator<'a, C> {
    pub fn new(client: &'a C, estimator: DurationEstimator, concurrency: NonZeroUsize) -> Self {
        Self {
            client,
            estimator,
            concurrency,
        }
    }

    /// opens a ledger trip for each pairing. trips that start are returned in
    /// state `Started` with their remote trip id.
    ///
    /// # Result
    /// the started trips, or [`SimulationError::RunFailure`] if none started
    pub async fn start_all(&self, pairings: Vec<Trip>) -> Result<BatchOutcome, SimulationError> {
        log::info!("starting {} trips", pairings.len());
        let results = stream::iter(pairings)
            .map(|trip| async move {
                log::debug!("attempting to start trip for {trip}");
                let result = self.client.start_trip(&trip.user_id, &trip.bike_id).await;
                (trip, result)
            })
            .buffered(self.concurrency.get())
            .collect::<Vec<_>>()
            .await;

        let mut report = BatchReport::default();
        let mut started = Vec::with_capacity(results.len());
        for (trip, result) in results {
            match result {
                Ok(remote_trip_id) => {
                    report.succeeded += 1;
                    let trip = trip.started(remote_trip_id);
                    log::debug!("started {trip}");
                    started.push(trip);
                }
                Err(e) => {
                    report.failed += 1;
                    log_call_failure(LifecyclePhase::Start, &trip, &e);
                }
            }
        }
        conclude(LifecyclePhase::Start, started, report)
    }

    /// moves each started trip's bike along its route. trips whose bike moved are
    /// returned in state `Moved` with an estimated duration.
    ///
    /// # Result
    /// the moved trips, or [`SimulationError::RunFailure`] if no bike moved
    pub async fn move_all(&self, started: Vec<Trip>) -> Result<BatchOutcome, SimulationError> {
        log::info!("moving {} bikes", started.len());
        let results = stream::iter(started)
            .map(|trip| async move {
                log::debug!("attempting to move bike {} for {trip}", trip.bike_id);
                let result = self
                    .client
                    .move_bike(&trip.bike_id, MoveTarget::Route(&trip.route))
                    .await;
                (trip, result)
            })
            .buffered(self.concurrency.get())
            .collect::<Vec<_>>()
            .await;

        let mut report = BatchReport::default();
        let mut moved = Vec::with_capacity(results.len());
        for (trip, result) in results {
            match result {
                Ok(()) => {
                    report.succeeded += 1;
                    let duration = self.estimator.estimate(&trip.route);
                    let trip = trip.moved(duration);
                    log::debug!("moved bike for {trip}, estimated duration {duration:.1}s");
                    moved.push(trip);
                }
                Err(e) => {
                    report.failed += 1;
                    log_call_failure(LifecyclePhase::Move, &trip, &e);
                }
            }
        }
        conclude(LifecyclePhase::Move, moved, report)
    }

    /// closes a single trip in the ledger. safe to call again after a failure.
    pub async fn end_trip(&self, trip_id: &RemoteTripId, trip: &Trip) -> Result<(), CallFailure> {
        log::debug!("attempting to end {trip}");
        self.client
            .end_trip(trip_id, &trip.user_id, &trip.bike_id)
            .await
    }
}

pub(crate) fn log_call_failure(phase: LifecyclePhase, trip: &Trip, failure: &CallFailure) {
    if failure.is_transport() {
        log::warn!("{phase} call for {trip} could not be delivered: {failure}");
    } else {
        log::warn!("{phase} call for {trip} was rejected: {failure}");
    }
}

fn conclude(
    phase: LifecyclePhase,
    trips: Vec<Trip>,
    report: BatchReport,
) -> Result<BatchOutcome, SimulationError> {
    log::info!("{phase} phase finished: {report}");
    if report.succeeded == 0 {
        return Err(SimulationError::RunFailure { phase, report });
    }
    Ok(BatchOutcome { trips, report })
}
