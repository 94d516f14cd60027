use crate::lifecycle::{BatchReport, LifecyclePhase};

#[derive(thiserror::Error, Debug)]
pub enum SimulationError {
    #[error("Failed to parse geometry: {0}")]
    MalformedGeometry(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Not enough resources to pair a single trip: {0}")]
    InsufficientResources(String),
    #[error("No trips succeeded during the {phase} phase ({report})")]
    RunFailure {
        phase: LifecyclePhase,
        report: BatchReport,
    },
    #[error("Trip is not in a state this operation accepts: {0}")]
    InvalidTripState(String),
    #[error("Failed to load fleet resources: {0}")]
    DataSourceError(String),
    #[error("Error creating a runtime to handle async code: {0}")]
    RuntimeError(String),
}
