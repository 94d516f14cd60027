use clap::ValueEnum;
use geo::{Distance, Euclidean, Haversine, Point};
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;
use uom::si::length::meter;

/// how the displacement between two route endpoints is measured.
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// straight-line distance in coordinate units, read as meters
    #[default]
    Planar,
    /// great-circle distance over (lon, lat) coordinates
    Haversine,
}

impl DistanceMetric {
    pub fn distance(&self, src: Point<f64>, dst: Point<f64>) -> Length {
        let meters = match self {
            DistanceMetric::Planar => Euclidean.distance(src, dst),
            DistanceMetric::Haversine => Haversine.distance(src, dst),
        };
        Length::new::<meter>(meters)
    }
}

#[cfg(test)]
mod tests {
    use super::DistanceMetric;
    use geo::point;
    use uom::si::length::{kilometer, meter};

    #[test]
    fn test_planar_distance() {
        let d = DistanceMetric::Planar.distance(point!(x: 0.0, y: 0.0), point!(x: 3.0, y: 4.0));
        assert_eq!(d.get::<meter>(), 5.0);
    }

    #[test]
    fn test_haversine_distance() {
        // one degree of latitude is roughly 111.2 km
        let d = DistanceMetric::Haversine
            .distance(point!(x: 13.0, y: 55.0), point!(x: 13.0, y: 56.0))
            .get::<kilometer>();
        assert!((d - 111.195).abs() < 0.1, "unexpected distance {d}");
    }
}
