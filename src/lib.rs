//! Lease Rent Schedule - Rent projection engine for French commercial leases
//!
//! This library provides:
//! - Billing period generation (monthly or quarterly, partial first/last periods)
//! - Index resolution with anniversary revisions and day-weighted period splits
//! - Franchise, incentive and charges escalation handling
//! - Yearly totals, deposit and compound annual growth rate (TCAM)
//! - Batch computation and job outcomes for the extraction pipeline

pub mod batch;
pub mod calendar;
pub mod error;
pub mod indexation;
pub mod job;
pub mod lease;
pub mod schedule;

// Re-export commonly used types
pub use batch::ScheduleRunner;
pub use error::{ScheduleError, ScheduleResult};
pub use indexation::{IndexObservation, IndexResolver};
pub use job::{JobStatus, ScheduleJobOutcome};
pub use lease::{IndexPoint, PaymentFrequency, ScheduleInput};
pub use schedule::{
    compute_lease_rent_schedule, BoundaryCondition, ComputeLeaseRentScheduleResult, RentSchedulePeriod,
    ScheduleConfig, ScheduleEngine, ScheduleSummary, YearlyTotalSummary,
};
