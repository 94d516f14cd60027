use itertools::Itertools;

use super::resource::{BikeId, UserId};
use super::{Route, Trip};
use crate::SimulationError;

/// zips users, bikes and routes by position into at most `trips_limit` trips.
///
/// repeated user or bike ids are dropped (first occurrence wins) before zipping
/// so that no two trips share a user or a bike. the result depends only on the
/// order of the inputs.
///
/// # Arguments
/// * user_ids - eligible users, in the order they should be assigned
/// * bike_ids - available bikes, in the order they should be assigned
/// * routes - candidate routes, in the order they should be assigned
/// * trips_limit - ceiling on the number of trips produced
///
/// # Result
/// the paired trips, or [`SimulationError::InsufficientResources`] if any input is empty
pub fn pair(
    user_ids: &[UserId],
    bike_ids: &[BikeId],
    routes: &[Route],
    trips_limit: usize,
) -> Result<Vec<Trip>, SimulationError> {
    let users = user_ids.iter().unique().collect_vec();
    let bikes = bike_ids.iter().unique().collect_vec();
    let n = users.len().min(bikes.len()).min(routes.len());
    log::debug!(
        "pairing {} users, {} bikes and {} routes into at most {n} trips (limit {trips_limit})",
        users.len(),
        bikes.len(),
        routes.len()
    );
    if n == 0 {
        return Err(SimulationError::InsufficientResources(format!(
            "found {} unique users, {} unique bikes and {} routes",
            users.len(),
            bikes.len(),
            routes.len()
        )));
    }

    let trips = users
        .into_iter()
        .zip(bikes)
        .zip(routes)
        .take(n.min(trips_limit))
        .map(|((user_id, bike_id), route)| {
            Trip::paired(user_id.clone(), bike_id.clone(), route.clone())
        })
        .collect_vec();
    Ok(trips)
}
