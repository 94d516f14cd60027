use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lifecycle::BatchReport;

/// what happened during one simulation run
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub paired: usize,
    pub start: BatchReport,
    #[serde(rename = "move")]
    pub movement: BatchReport,
    pub end: BatchReport,
    pub ended: usize,
    pub abandoned: usize,
    /// polling ticks taken by the end-of-trip scheduler
    pub ticks: u32,
}

impl Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let runtime = (self.finished_at - self.started_at).num_seconds();
        write!(
            f,
            "paired {} trips; start: {}; move: {}; end: {}; {} ended, {} abandoned after {} ticks ({runtime}s)",
            self.paired, self.start, self.movement, self.end, self.ended, self.abandoned, self.ticks
        )
    }
}
