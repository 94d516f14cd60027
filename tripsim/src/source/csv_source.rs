use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::FleetSnapshot;
use crate::model::resource::{
    BikeAttributes, BikeRecord, ResourceId, ResourceRecord, TripAttributes, TripRecord,
    UserAttributes, UserRecord,
};
use crate::SimulationError;

pub const BIKES_FILE: &str = "bikes.csv";
pub const USERS_FILE: &str = "users.csv";
pub const TRIPS_FILE: &str = "trips.csv";

/// a single row from bikes.csv
#[derive(Debug, Deserialize)]
struct BikeRow {
    id: String,
    last_position: String,
    available: Option<bool>,
}

/// a single row from users.csv
#[derive(Debug, Deserialize)]
struct UserRow {
    id: String,
    balance: Option<f64>,
    is_eligable: Option<bool>,
}

/// a single row from trips.csv
#[derive(Debug, Deserialize)]
struct TripRow {
    id: String,
    path_taken: String,
}

/// reads the mocked-data files `bikes.csv`, `users.csv` and `trips.csv` found
/// in `directory`. a missing `available` value means the bike is available.
pub fn read_snapshot(directory: &Path) -> Result<FleetSnapshot, SimulationError> {
    log::info!("reading fleet resources from {directory:?}");
    let bikes = read_rows::<BikeRow>(&directory.join(BIKES_FILE))?
        .into_iter()
        .map(|row| {
            let attributes = BikeAttributes {
                last_position: row.last_position,
                available: row.available.unwrap_or(true),
            };
            record(BIKES_FILE, &row.id, attributes)
        })
        .collect::<Result<Vec<BikeRecord>, _>>()?;
    let users = read_rows::<UserRow>(&directory.join(USERS_FILE))?
        .into_iter()
        .map(|row| {
            let attributes = UserAttributes {
                balance: row.balance,
                is_eligable: row.is_eligable,
            };
            record(USERS_FILE, &row.id, attributes)
        })
        .collect::<Result<Vec<UserRecord>, _>>()?;
    let trips = read_rows::<TripRow>(&directory.join(TRIPS_FILE))?
        .into_iter()
        .map(|row| {
            let attributes = TripAttributes {
                path_taken: row.path_taken,
            };
            record(TRIPS_FILE, &row.id, attributes)
        })
        .collect::<Result<Vec<TripRecord>, _>>()?;
    Ok(FleetSnapshot {
        bikes,
        users,
        trips,
    })
}

fn read_rows<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>, SimulationError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| SimulationError::DataSourceError(format!("failure opening {path:?}: {e}")))?;
    reader
        .deserialize()
        .enumerate()
        .map(|(idx, row)| {
            row.map_err(|e| {
                SimulationError::DataSourceError(format!(
                    "failure reading row {idx} of {path:?}: {e}"
                ))
            })
        })
        .collect()
}

fn record<A>(file: &str, id: &str, attributes: A) -> Result<ResourceRecord<A>, SimulationError> {
    let id = id
        .parse::<ResourceId>()
        .map_err(|e| SimulationError::DataSourceError(format!("{file}: {e}")))?;
    Ok(ResourceRecord::new(id, attributes))
}

#[cfg(test)]
mod tests {
    use super::read_snapshot;
    use crate::model::resource::ResourceId;
    use crate::SimulationError;
    use std::path::PathBuf;

    fn test_directory() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("src")
            .join("resources")
            .join("test")
    }

    #[test]
    fn test_read_snapshot() {
        let snapshot = read_snapshot(&test_directory()).expect("test invariant failed");
        assert_eq!(snapshot.bikes.len(), 4);
        assert_eq!(snapshot.users.len(), 4);
        assert_eq!(snapshot.trips.len(), 3);

        let first = &snapshot.bikes[0];
        assert_eq!(first.id, ResourceId::from(1));
        assert_eq!(first.attributes.last_position, "POINT(13.06782 55.577859)");
        assert!(first.attributes.available);
        // blank availability defaults to available
        assert!(snapshot.bikes[3].attributes.available);
        assert!(!snapshot.bikes[2].attributes.available);

        assert_eq!(snapshot.users[1].attributes.balance, Some(-5.0));
        assert_eq!(snapshot.users[3].attributes.balance, None);
        assert_eq!(snapshot.users[2].attributes.is_eligable, Some(false));
        assert!(
            snapshot.trips[0]
                .attributes
                .path_taken
                .starts_with("LINESTRING")
        );
    }

    #[test]
    fn test_missing_directory() {
        let result = read_snapshot(&test_directory().join("missing"));
        assert!(matches!(result, Err(SimulationError::DataSourceError(_))));
    }
}
