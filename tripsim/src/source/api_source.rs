use futures::future;

use super::FleetSnapshot;
use crate::client::{CallFailure, HttpFleetClient};
use crate::SimulationError;

/// fetches bikes, users and historical trips from the backend, at most `limit`
/// of each.
pub async fn fetch_snapshot(
    client: &HttpFleetClient,
    limit: usize,
) -> Result<FleetSnapshot, SimulationError> {
    log::info!("fetching fleet resources from the backend (limit {limit})");
    let (bikes, users, trips) = future::try_join3(
        client.fetch_bikes(limit),
        client.fetch_users(limit),
        client.fetch_trips(limit),
    )
    .await
    .map_err(data_source_error)?;
    Ok(FleetSnapshot {
        bikes,
        users,
        trips,
    })
}

fn data_source_error(failure: CallFailure) -> SimulationError {
    SimulationError::DataSourceError(failure.to_string())
}
