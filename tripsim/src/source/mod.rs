mod api_source;
mod csv_source;
mod fleet_snapshot;

pub use api_source::fetch_snapshot;
pub use csv_source::{read_snapshot, BIKES_FILE, TRIPS_FILE, USERS_FILE};
pub use fleet_snapshot::FleetSnapshot;

use crate::client::HttpFleetClient;
use crate::config::ResourceSourceConfig;
use crate::SimulationError;

/// loads the fleet resources from whichever source is configured.
pub async fn load_snapshot(
    config: &ResourceSourceConfig,
    client: &HttpFleetClient,
) -> Result<FleetSnapshot, SimulationError> {
    let snapshot = match config {
        ResourceSourceConfig::Api { limit } => fetch_snapshot(client, *limit).await?,
        ResourceSourceConfig::Csv { directory } => read_snapshot(directory)?,
    };
    log::info!("loaded {}", snapshot.summary());
    Ok(snapshot)
}
