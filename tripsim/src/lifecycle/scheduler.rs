use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use super::initiator::{log_call_failure, TripInitiator};
use super::{BatchReport, EndRetryPolicy, LifecyclePhase};
use crate::client::FleetApi;
use crate::model::resource::RemoteTripId;
use crate::model::{Trip, TripState};
use crate::SimulationError;

/// timing and retry settings of the end-of-trip polling loop
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SchedulerParameters {
    /// added to each trip's estimated duration before it may be ended
    pub margin_of_error: Duration,
    /// pause between two ticks
    pub sleep_period: Duration,
    /// number of ticks before the loop gives up on the remaining trips
    pub max_attempts: u32,
    pub retry_policy: EndRetryPolicy,
}

impl SchedulerParameters {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.sleep_period.is_zero() {
            return Err(SimulationError::InvalidConfiguration(String::from(
                "scheduler sleep period must be positive",
            )));
        }
        if self.max_attempts == 0 {
            return Err(SimulationError::InvalidConfiguration(String::from(
                "scheduler max attempts must be positive",
            )));
        }
        self.retry_policy.validate()
    }
}

/// final state of every trip handed to the scheduler
#[derive(Debug, Clone)]
pub struct SchedulerOutcome {
    /// trips in state `Ended`, in the order they were ended
    pub ended: Vec<Trip>,
    /// trips in state `Abandoned`, in ascending duration order
    pub abandoned: Vec<Trip>,
    /// ticks spent, never more than `max_attempts`
    pub ticks: u32,
    /// counts over every end call made
    pub report: BatchReport,
    pub elapsed: Duration,
}

/// a trip waiting to be ended along with its place in the end order and its
/// failed end calls so far
struct PendingEnd {
    order: usize,
    trip: Trip,
    trip_id: RemoteTripId,
    due_seconds: f64,
    failed_attempts: u32,
}

/// ends moved trips once their estimated duration (plus a margin) has passed.
///
/// each tick ends every trip that is due, shortest trips first. trips whose end
/// call fails are put on the attempt ledger and tried again on every following
/// tick. each tick spends one attempt of the budget, whether or not anything
/// was due; when the budget is spent every trip not yet ended is abandoned.
pub struct EndOfTripScheduler<'a, C> {
    initiator: &'a TripInitiator<'a, C>,
    parameters: SchedulerParameters,
}

impl<'a, C: FleetApi> EndOfTripScheduler<'a, C> {
    pub fn new(initiator: &'a TripInitiator<'a, C>, parameters: SchedulerParameters) -> Self {
        Self {
            initiator,
            parameters,
        }
    }

    /// runs the polling loop to completion.
    ///
    /// # Arguments
    /// * trips - trips in state `Moved`
    ///
    /// # Result
    /// the final state of every trip, or [`SimulationError::RunFailure`] if no
    /// trip could be ended
    pub async fn run(&self, trips: Vec<Trip>) -> Result<SchedulerOutcome, SimulationError> {
        let outcome = self.drive(trips).await?;
        if outcome.ended.is_empty() {
            return Err(SimulationError::RunFailure {
                phase: LifecyclePhase::End,
                report: outcome.report,
            });
        }
        if !outcome.abandoned.is_empty() {
            log::warn!(
                "abandoned {} trips that could not be ended within {} attempts",
                outcome.abandoned.len(),
                self.parameters.max_attempts
            );
        }
        log::info!(
            "ended {} trips after {:.0} seconds and {} attempts",
            outcome.ended.len(),
            outcome.elapsed.as_secs_f64(),
            outcome.ticks
        );
        Ok(outcome)
    }

    async fn drive(&self, trips: Vec<Trip>) -> Result<SchedulerOutcome, SimulationError> {
        self.parameters.validate()?;
        let margin = self.parameters.margin_of_error.as_secs_f64();
        let mut waiting = prepare(trips, margin)?;
        let mut attempt_ledger: Vec<PendingEnd> = vec![];
        let mut ended = vec![];
        let mut abandoned = vec![];
        let mut report = BatchReport::default();
        let mut remaining_attempts = self.parameters.max_attempts;
        let mut ticks = 0;

        let loop_start = Instant::now();
        while remaining_attempts > 0 && !(waiting.is_empty() && attempt_ledger.is_empty()) {
            let elapsed = loop_start.elapsed().as_secs_f64();
            ticks += 1;

            // waiting is sorted by due time, so the due trips form a prefix
            let n_due = waiting
                .iter()
                .take_while(|p| p.due_seconds <= elapsed)
                .count();
            let mut candidates = attempt_ledger
                .drain(..)
                .chain(waiting.drain(..n_due))
                .collect::<Vec<_>>();
            candidates.sort_by_key(|p| p.order);

            if candidates.is_empty() {
                log::info!("no trips ready to end at {elapsed:.0} seconds");
            } else {
                log::info!(
                    "attempting to end {} trips at {elapsed:.0} seconds",
                    candidates.len()
                );
                let mut tick_report = BatchReport::default();
                for mut pending in candidates {
                    pending.trip.state = TripState::EndPending;
                    match self
                        .initiator
                        .end_trip(&pending.trip_id, &pending.trip)
                        .await
                    {
                        Ok(()) => {
                            tick_report.succeeded += 1;
                            log::debug!("ended {}", pending.trip);
                            ended.push(pending.trip.with_state(TripState::Ended));
                        }
                        Err(e) => {
                            tick_report.failed += 1;
                            pending.failed_attempts += 1;
                            log_call_failure(LifecyclePhase::End, &pending.trip, &e);
                            if self
                                .parameters
                                .retry_policy
                                .is_exhausted(pending.failed_attempts)
                            {
                                log::warn!(
                                    "abandoning {} after {} failed end calls",
                                    pending.trip,
                                    pending.failed_attempts
                                );
                                abandoned.push(pending);
                            } else {
                                attempt_ledger.push(pending);
                            }
                        }
                    }
                }
                log::info!("end calls at {elapsed:.0} seconds: {tick_report}");
                report += tick_report;
            }

            remaining_attempts -= 1;
            let n_remaining = waiting.len() + attempt_ledger.len();
            if n_remaining == 0 {
                log::info!("all trips have been ended or abandoned");
            } else if remaining_attempts > 0 {
                log::info!(
                    "{n_remaining} trips remaining, waiting {} seconds for the next attempt",
                    self.parameters.sleep_period.as_secs_f64()
                );
                tokio::time::sleep(self.parameters.sleep_period).await;
            }
        }

        abandoned.extend(attempt_ledger);
        abandoned.extend(waiting);
        abandoned.sort_by_key(|p| p.order);
        let abandoned = abandoned
            .into_iter()
            .map(|p| p.trip.with_state(TripState::Abandoned))
            .collect();

        Ok(SchedulerOutcome {
            ended,
            abandoned,
            ticks,
            report,
            elapsed: loop_start.elapsed(),
        })
    }
}

/// orders moved trips by ascending estimated duration and computes when each
/// becomes due.
fn prepare(trips: Vec<Trip>, margin: f64) -> Result<Vec<PendingEnd>, SimulationError> {
    let mut pending = trips
        .into_iter()
        .map(|trip| {
            let (Some(trip_id), Some(duration)) =
                (trip.remote_trip_id.clone(), trip.estimated_duration_seconds)
            else {
                return Err(SimulationError::InvalidTripState(format!(
                    "{trip} is {} and cannot be scheduled for ending",
                    trip.state
                )));
            };
            if trip.state != TripState::Moved {
                return Err(SimulationError::InvalidTripState(format!(
                    "{trip} is {}, expected {}",
                    trip.state,
                    TripState::Moved
                )));
            }
            Ok(PendingEnd {
                order: 0,
                trip,
                trip_id,
                due_seconds: duration + margin,
                failed_attempts: 0,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    pending.sort_by(|a, b| a.due_seconds.total_cmp(&b.due_seconds));
    for (order, p) in pending.iter_mut().enumerate() {
        p.order = order;
    }
    Ok(pending)
}
