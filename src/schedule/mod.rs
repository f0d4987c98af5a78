//! Rent schedule computation: periods, apportionment, composition, roll-ups

mod apportion;
mod engine;
pub mod export;
mod periods;
mod rows;
mod summary;

pub use apportion::{apportion, bill, day_weighted_average, DayBasis, Segment};
pub use engine::{compute_lease_rent_schedule, ScheduleConfig, ScheduleEngine};
pub use periods::{effective_end_date, generate_periods, BillingPeriod};
pub use rows::{BoundaryCondition, ComputeLeaseRentScheduleResult, RentSchedulePeriod};
pub use summary::{deposit_amount, tcam, yearly_totals, ScheduleSummary, YearlyTotalSummary};
