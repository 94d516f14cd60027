use std::fmt::Display;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::model::Trip;

/// the lifecycle phases that issue remote calls
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    Start,
    Move,
    End,
}

impl Display for LifecyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecyclePhase::Start => write!(f, "start"),
            LifecyclePhase::Move => write!(f, "move"),
            LifecyclePhase::End => write!(f, "end"),
        }
    }
}

/// success and failure counts of the remote calls made during a phase
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// percentage of successful calls, or None if no calls were made
    pub fn success_percentage(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.succeeded as f64 / total as f64 * 100.0),
        }
    }
}

impl AddAssign for BatchReport {
    fn add_assign(&mut self, rhs: Self) {
        self.succeeded += rhs.succeeded;
        self.failed += rhs.failed;
    }
}

impl Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.success_percentage() {
            Some(pct) => write!(
                f,
                "{} succeeded, {} failed, {pct:.1}% success",
                self.succeeded, self.failed
            ),
            None => write!(f, "no calls made"),
        }
    }
}

/// trips that made it through a batch phase, with the phase's call counts
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub trips: Vec<Trip>,
    pub report: BatchReport,
}

#[cfg(test)]
mod tests {
    use super::BatchReport;

    #[test]
    fn test_success_percentage() {
        let report = BatchReport {
            succeeded: 3,
            failed: 1,
        };
        assert_eq!(report.success_percentage(), Some(75.0));
        assert_eq!(BatchReport::default().success_percentage(), None);
        assert_eq!(report.to_string(), "3 succeeded, 1 failed, 75.0% success");
    }

    #[test]
    fn test_accumulate() {
        let mut report = BatchReport::default();
        report += BatchReport {
            succeeded: 1,
            failed: 2,
        };
        report += BatchReport {
            succeeded: 4,
            failed: 0,
        };
        assert_eq!(report.total(), 7);
        assert_eq!(report.succeeded, 5);
    }
}
