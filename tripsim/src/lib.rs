pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod source;

pub use error::SimulationError;
