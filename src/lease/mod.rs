//! Lease terms and their loaders

mod data;
pub mod loader;

pub use data::{IndexPoint, PaymentFrequency, ScheduleInput};
pub use loader::{load_index_points, load_schedule_input, load_schedule_inputs};
