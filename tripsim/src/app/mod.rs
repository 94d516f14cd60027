mod simulation;
mod simulation_summary;
mod tripsim_cli;

pub use simulation::{plan_trips, run_pairing, run_simulation, simulate};
pub use simulation_summary::SimulationSummary;
pub use tripsim_cli::{RunOverrides, TripsimCliArguments, TripsimOperation};
