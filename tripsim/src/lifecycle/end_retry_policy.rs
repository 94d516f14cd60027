use serde::{Deserialize, Serialize};

use crate::SimulationError;

/// decides when a trip whose end call keeps failing is given up on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EndRetryPolicy {
    /// failed end calls are retried every tick until the scheduler's global
    /// attempt budget runs out
    #[default]
    GlobalBudget,
    /// as GlobalBudget, but a trip is abandoned as soon as it has failed
    /// `max_end_attempts` end calls
    PerTrip { max_end_attempts: u32 },
}

impl EndRetryPolicy {
    pub fn is_exhausted(&self, failed_attempts: u32) -> bool {
        match self {
            EndRetryPolicy::GlobalBudget => false,
            EndRetryPolicy::PerTrip { max_end_attempts } => failed_attempts >= *max_end_attempts,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        match self {
            EndRetryPolicy::PerTrip { max_end_attempts: 0 } => {
                Err(SimulationError::InvalidConfiguration(String::from(
                    "per-trip end retry policy requires max_end_attempts > 0",
                )))
            }
            _ => Ok(()),
        }
    }
}
