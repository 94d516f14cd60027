mod distance_metric;
mod duration_estimator;

pub use distance_metric::DistanceMetric;
pub use duration_estimator::{estimate, DurationEstimator};
