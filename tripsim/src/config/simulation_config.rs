use std::num::NonZeroUsize;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::lifecycle::{EndRetryPolicy, SchedulerParameters};
use crate::model::duration::{DistanceMetric, DurationEstimator};
use crate::SimulationError;

/// tuning of a simulation run
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub nominal_speed_kmh: f64,
    pub distance_metric: DistanceMetric,
    /// ceiling on the number of trips paired per run
    pub trips_limit: usize,
    pub margin_of_error_seconds: f64,
    pub sleep_period_seconds: f64,
    pub max_attempts: u32,
    /// start/move calls allowed in flight at once
    pub dispatch_concurrency: NonZeroUsize,
    pub end_retry_policy: EndRetryPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            nominal_speed_kmh: 1000.0,
            distance_metric: DistanceMetric::Planar,
            trips_limit: 10,
            margin_of_error_seconds: 10.0,
            sleep_period_seconds: 20.0,
            max_attempts: 12,
            dispatch_concurrency: NonZeroUsize::MIN,
            end_retry_policy: EndRetryPolicy::GlobalBudget,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.trips_limit == 0 {
            return Err(SimulationError::InvalidConfiguration(String::from(
                "trips_limit must be positive",
            )));
        }
        self.duration_estimator()?;
        self.scheduler_parameters()?.validate()
    }

    pub fn duration_estimator(&self) -> Result<DurationEstimator, SimulationError> {
        DurationEstimator::new(self.nominal_speed_kmh, self.distance_metric)
    }

    pub fn scheduler_parameters(&self) -> Result<SchedulerParameters, SimulationError> {
        Ok(SchedulerParameters {
            margin_of_error: seconds("margin_of_error_seconds", self.margin_of_error_seconds)?,
            sleep_period: seconds("sleep_period_seconds", self.sleep_period_seconds)?,
            max_attempts: self.max_attempts,
            retry_policy: self.end_retry_policy,
        })
    }
}

fn seconds(name: &str, value: f64) -> Result<Duration, SimulationError> {
    Duration::try_from_secs_f64(value).map_err(|e| {
        SimulationError::InvalidConfiguration(format!(
            "{name} must be a non-negative number of seconds, found {value}: {e}"
        ))
    })
}
