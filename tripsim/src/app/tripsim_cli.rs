use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::TripsimSettings;
use crate::SimulationError;

/// command line tool simulating scooter trips against the fleet services
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TripsimCliArguments {
    /// toml or json settings file. omitted settings use their defaults and
    /// may be overridden by TRIPSIM_* environment variables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// select the operation to run
    #[command(subcommand)]
    pub op: TripsimOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum TripsimOperation {
    /// pairs users, bikes and routes, then starts, moves and ends each trip
    Run {
        #[command(flatten)]
        overrides: RunOverrides,
    },
    /// prints the trips a run would pair, without calling any lifecycle endpoint
    Pair {
        /// ceiling on the number of trips paired
        #[arg(long)]
        trips_limit: Option<usize>,
    },
    /// prints the effective settings as toml
    ShowConfig,
}

/// command line values that take precedence over file and environment settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, Args)]
pub struct RunOverrides {
    /// ceiling on the number of trips paired
    #[arg(long)]
    pub trips_limit: Option<usize>,
    /// polling ticks allowed to end all trips
    #[arg(long)]
    pub max_attempts: Option<u32>,
    /// wait between polling ticks, in human-readable time values 20s, 1m...
    #[arg(long, value_parser = parse_duration)]
    pub sleep_period: Option<Duration>,
    /// slack added to each trip's estimated duration, e.g. 10s
    #[arg(long, value_parser = parse_duration)]
    pub margin_of_error: Option<Duration>,
}

impl RunOverrides {
    pub fn apply(&self, settings: &mut TripsimSettings) {
        if let Some(trips_limit) = self.trips_limit {
            settings.simulation.trips_limit = trips_limit;
        }
        if let Some(max_attempts) = self.max_attempts {
            settings.simulation.max_attempts = max_attempts;
        }
        if let Some(sleep_period) = self.sleep_period {
            settings.simulation.sleep_period_seconds = sleep_period.as_secs_f64();
        }
        if let Some(margin) = self.margin_of_error {
            settings.simulation.margin_of_error_seconds = margin.as_secs_f64();
        }
    }
}

impl TripsimCliArguments {
    pub fn run(&self) -> Result<(), SimulationError> {
        let settings = TripsimSettings::load(self.config.as_deref())?;
        self.op.run(settings)
    }
}

impl TripsimOperation {
    pub fn run(&self, mut settings: TripsimSettings) -> Result<(), SimulationError> {
        match self {
            TripsimOperation::Run { overrides } => {
                overrides.apply(&mut settings);
                let summary = super::run_simulation(&settings)?;
                let output = serde_json::to_string_pretty(&summary).map_err(|e| {
                    SimulationError::RuntimeError(format!("failure writing summary: {e}"))
                })?;
                println!("{output}");
                Ok(())
            }
            TripsimOperation::Pair { trips_limit } => {
                if let Some(trips_limit) = trips_limit {
                    settings.simulation.trips_limit = *trips_limit;
                }
                let trips = super::run_pairing(&settings)?;
                for trip in trips.iter() {
                    println!("{trip}: {} route points", trip.route.len());
                }
                Ok(())
            }
            TripsimOperation::ShowConfig => {
                println!("{}", settings.to_toml()?);
                Ok(())
            }
        }
    }
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s).map_err(|e| format!("Invalid duration: {e}"))
}
