use geo::{LineString, Point};
use serde::{Deserialize, Serialize};

use super::geometry::parse_xy_wkt;
use crate::SimulationError;

/// an ordered path of (longitude, latitude) points with at least two points.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "LineString<f64>", into = "LineString<f64>")]
pub struct Route(LineString<f64>);

impl Route {
    pub const MIN_POINTS: usize = 2;

    /// parses a WKT LINESTRING such as `LINESTRING(13.0 55.5,13.1 55.6)`.
    pub fn try_from_wkt(wkt: &str) -> Result<Route, SimulationError> {
        let linestring = LineString::<f64>::try_from(parse_xy_wkt(wkt)?).map_err(|e| {
            SimulationError::MalformedGeometry(format!(
                "unable to parse WKT LINESTRING '{wkt}': {e}"
            ))
        })?;
        Route::try_from(linestring)
    }

    pub fn start(&self) -> Point<f64> {
        self.0.points().next().unwrap_or_default()
    }

    pub fn end(&self) -> Point<f64> {
        self.0.points().next_back().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.0.is_empty()
    }

    /// route points as `[lon, lat]` pairs, the shape the bike mover expects
    pub fn coordinates(&self) -> Vec<[f64; 2]> {
        self.0.coords().map(|c| [c.x, c.y]).collect()
    }
}

impl TryFrom<LineString<f64>> for Route {
    type Error = SimulationError;

    fn try_from(value: LineString<f64>) -> Result<Self, Self::Error> {
        if value.0.len() < Route::MIN_POINTS {
            return Err(SimulationError::MalformedGeometry(format!(
                "route must have at least {} points, found {}",
                Route::MIN_POINTS,
                value.0.len()
            )));
        }
        if let Some(c) = value.coords().find(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(SimulationError::MalformedGeometry(format!(
                "route contains a non-finite coordinate ({}, {})",
                c.x, c.y
            )));
        }
        Ok(Route(value))
    }
}

impl From<Route> for LineString<f64> {
    fn from(value: Route) -> Self {
        value.0
    }
}
