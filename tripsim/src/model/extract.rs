//! pure transformations from raw fleet resource records into the typed values
//! used to pair and drive trips.
use geo::Point;

use super::geometry::parse_xy_wkt;
use super::resource::{BikeRecord, ResourceId, ResourceRecord, TripRecord, UserRecord};
use super::Route;
use crate::SimulationError;

/// identifiers of each record, in record order.
pub fn ids<A>(records: &[ResourceRecord<A>]) -> Vec<ResourceId> {
    records.iter().map(|r| r.id.clone()).collect()
}

/// last known (longitude, latitude) of each bike, in record order.
pub fn positions(bikes: &[BikeRecord]) -> Result<Vec<(f64, f64)>, SimulationError> {
    bikes
        .iter()
        .map(|bike| {
            parse_position(&bike.attributes.last_position).map_err(|e| match e {
                SimulationError::MalformedGeometry(msg) => {
                    SimulationError::MalformedGeometry(format!("bike {}: {msg}", bike.id))
                }
                other => other,
            })
        })
        .collect()
}

/// routes taken by historical trips, in record order.
pub fn routes(trips: &[TripRecord]) -> Result<Vec<Route>, SimulationError> {
    trips
        .iter()
        .map(|trip| {
            Route::try_from_wkt(&trip.attributes.path_taken).map_err(|e| match e {
                SimulationError::MalformedGeometry(msg) => {
                    SimulationError::MalformedGeometry(format!("trip {}: {msg}", trip.id))
                }
                other => other,
            })
        })
        .collect()
}

/// keeps only bikes flagged as available.
pub fn available(bikes: Vec<BikeRecord>) -> Vec<BikeRecord> {
    bikes.into_iter().filter(|b| b.attributes.available).collect()
}

/// keeps only users who are eligible to ride. a user is eligible unless flagged
/// otherwise or carrying a negative balance.
pub fn eligible(users: Vec<UserRecord>) -> Vec<UserRecord> {
    users
        .into_iter()
        .filter(|u| {
            let flagged = u.attributes.is_eligable.unwrap_or(true);
            let solvent = u.attributes.balance.is_none_or(|b| b >= 0.0);
            flagged && solvent
        })
        .collect()
}

/// parses a WKT POINT such as `POINT(13.06782 55.577859)` into (lon, lat).
pub fn parse_position(wkt: &str) -> Result<(f64, f64), SimulationError> {
    let point = Point::<f64>::try_from(parse_xy_wkt(wkt)?).map_err(|e| {
        SimulationError::MalformedGeometry(format!("unable to parse WKT POINT '{wkt}': {e}"))
    })?;
    let (x, y) = point.x_y();
    if !x.is_finite() || !y.is_finite() {
        return Err(SimulationError::MalformedGeometry(format!(
            "position '{wkt}' has a non-finite coordinate"
        )));
    }
    Ok((x, y))
}
