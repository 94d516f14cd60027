mod batch_report;
mod end_retry_policy;
mod initiator;
mod scheduler;

pub use batch_report::{BatchOutcome, BatchReport, LifecyclePhase};
pub use end_retry_policy::EndRetryPolicy;
pub use initiator::TripInitiator;
pub use scheduler::{EndOfTripScheduler, SchedulerOutcome, SchedulerParameters};
