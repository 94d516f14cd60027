use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::SimulationError;

pub const DEFAULT_FETCH_LIMIT: usize = 9999;

/// where fleet resources (bikes, users, historical trips) are read from
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceSourceConfig {
    /// the backend's collection endpoints
    Api {
        #[serde(default = "default_limit")]
        limit: usize,
    },
    /// mocked-data CSV files `bikes.csv`, `users.csv` and `trips.csv`
    Csv { directory: PathBuf },
}

impl Default for ResourceSourceConfig {
    fn default() -> Self {
        ResourceSourceConfig::Api {
            limit: DEFAULT_FETCH_LIMIT,
        }
    }
}

impl ResourceSourceConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        match self {
            ResourceSourceConfig::Api { limit: 0 } => Err(SimulationError::InvalidConfiguration(
                String::from("api source limit must be positive"),
            )),
            ResourceSourceConfig::Csv { directory } if !directory.is_dir() => {
                Err(SimulationError::InvalidConfiguration(format!(
                    "csv source directory {directory:?} does not exist"
                )))
            }
            _ => Ok(()),
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_FETCH_LIMIT
}
