use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use super::{ResourceSourceConfig, ServiceConfig, SimulationConfig};
use crate::SimulationError;

/// environment variables overriding settings look like `TRIPSIM_SIMULATION__TRIPS_LIMIT`
pub const ENV_PREFIX: &str = "TRIPSIM";
pub const ENV_SEPARATOR: &str = "__";

/// all settings of the trip simulator. each section falls back to its
/// defaults when omitted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TripsimSettings {
    pub simulation: SimulationConfig,
    pub services: ServiceConfig,
    pub source: ResourceSourceConfig,
}

impl TripsimSettings {
    /// layers defaults, an optional toml/json file and `TRIPSIM_*` environment
    /// variables, in that order of precedence.
    pub fn load(config_file: Option<&Path>) -> Result<TripsimSettings, SimulationError> {
        let mut builder = Config::builder();
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                SimulationError::InvalidConfiguration(format!("failure reading settings: {e}"))
            })?;
        let settings: TripsimSettings = config.try_deserialize().map_err(|e| {
            SimulationError::InvalidConfiguration(format!("failure deserializing settings: {e}"))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        self.simulation.validate()?;
        self.services.validate()?;
        self.source.validate()
    }

    pub fn to_toml(&self) -> Result<String, SimulationError> {
        toml::to_string_pretty(self).map_err(|e| {
            SimulationError::InvalidConfiguration(format!("failure rendering settings: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::TripsimSettings;
    use crate::config::ResourceSourceConfig;
    use crate::lifecycle::EndRetryPolicy;
    use crate::model::duration::DistanceMetric;
    use std::path::PathBuf;

    fn test_resource(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("src")
            .join("resources")
            .join("test")
            .join(name)
    }

    #[test]
    fn test_load_file() {
        let path = test_resource("tripsim.toml");
        let settings = TripsimSettings::load(Some(&path)).expect("test invariant failed");
        assert_eq!(settings.simulation.trips_limit, 3);
        assert_eq!(settings.simulation.nominal_speed_kmh, 15.0);
        assert_eq!(settings.simulation.distance_metric, DistanceMetric::Haversine);
        assert_eq!(settings.simulation.sleep_period_seconds, 5.0);
        assert_eq!(
            settings.simulation.end_retry_policy,
            EndRetryPolicy::PerTrip {
                max_end_attempts: 3
            }
        );
        // omitted keys keep their defaults
        assert_eq!(settings.simulation.max_attempts, 12);
        assert_eq!(settings.services.backend_url, "http://localhost:8000/");
        assert_eq!(settings.services.token.as_deref(), Some("secret"));
        assert!(matches!(settings.source, ResourceSourceConfig::Csv { .. }));
    }

    #[test]
    fn test_missing_file() {
        let path = test_resource("does_not_exist.toml");
        assert!(TripsimSettings::load(Some(&path)).is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = TripsimSettings::default();
        let rendered = settings.to_toml().expect("test invariant failed");
        let parsed: TripsimSettings = toml::from_str(&rendered).expect("test invariant failed");
        assert_eq!(parsed, settings);
    }
}
