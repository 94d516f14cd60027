use serde::{Deserialize, Serialize};
use uom::si::f64::{Time, Velocity};
use uom::si::time::second;
use uom::si::velocity::kilometer_per_hour;

use super::DistanceMetric;
use crate::model::Route;
use crate::SimulationError;

/// estimates trip durations from the displacement between a route's first and
/// last point at a fixed nominal speed. intermediate points are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DurationEstimator {
    speed: Velocity,
    metric: DistanceMetric,
}

impl DurationEstimator {
    pub fn new(speed_kmh: f64, metric: DistanceMetric) -> Result<Self, SimulationError> {
        if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "nominal speed must be a positive number of km/h, found {speed_kmh}"
            )));
        }
        Ok(Self {
            speed: Velocity::new::<kilometer_per_hour>(speed_kmh),
            metric,
        })
    }

    /// expected travel time in seconds, always >= 0
    pub fn estimate(&self, route: &Route) -> f64 {
        let distance = self.metric.distance(route.start(), route.end());
        let duration: Time = distance / self.speed;
        duration.get::<second>()
    }
}

/// one-shot estimate with the planar metric.
pub fn estimate(route: &Route, speed_kmh: f64) -> Result<f64, SimulationError> {
    let estimator = DurationEstimator::new(speed_kmh, DistanceMetric::Planar)?;
    Ok(estimator.estimate(route))
}
