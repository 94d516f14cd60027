mod service_config;
mod simulation_config;
mod source_config;
mod tripsim_settings;

pub use service_config::ServiceConfig;
pub use simulation_config::SimulationConfig;
pub use source_config::{ResourceSourceConfig, DEFAULT_FETCH_LIMIT};
pub use tripsim_settings::{TripsimSettings, ENV_PREFIX, ENV_SEPARATOR};
