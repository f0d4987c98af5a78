//! Error types for rent schedule computation

use chrono::NaiveDate;
use thiserror::Error;

/// Result alias used throughout the crate
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Configuration and loading errors.
///
/// Degenerate-but-valid inputs (zero-length lease, oversized incentive, ...)
/// are not errors; they surface as [`crate::schedule::BoundaryCondition`]s.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Start date after the (horizon-capped) end date
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// A rent, charge or month count that must not be negative
    #[error("Negative value for {field}: {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    /// An amount that is NaN or infinite
    #[error("Non-finite value for {field}: {value}")]
    NonFiniteAmount { field: &'static str, value: f64 },

    /// Annual charges growth at or below -100%, or not a number
    #[error("Invalid charges growth rate: {0}")]
    InvalidGrowthRate(f64),

    /// Index values are ratios' denominators and must be strictly positive
    #[error("Index value for {context} must be positive and finite, got {value}")]
    NonPositiveIndex { context: String, value: f64 },

    /// Payment frequency outside monthly/quarterly
    #[error("Unknown payment frequency: {0}")]
    UnknownPaymentFrequency(String),

    /// Projection horizon of zero years
    #[error("Invalid projection horizon: {0} years")]
    InvalidHorizon(u32),

    /// Unparseable calendar date in an input file
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScheduleError {
    /// True for errors caused by the schedule input itself (as opposed to I/O)
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidDateRange { .. }
                | ScheduleError::NegativeAmount { .. }
                | ScheduleError::NonFiniteAmount { .. }
                | ScheduleError::InvalidGrowthRate(_)
                | ScheduleError::NonPositiveIndex { .. }
                | ScheduleError::UnknownPaymentFrequency(_)
                | ScheduleError::InvalidHorizon(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScheduleError::NegativeAmount { field: "officeRentHT", value: -1.0 };
        assert_eq!(err.to_string(), "Negative value for officeRentHT: -1");

        let err = ScheduleError::UnknownPaymentFrequency("weekly".into());
        assert_eq!(err.to_string(), "Unknown payment frequency: weekly");
    }

    #[test]
    fn test_configuration_classification() {
        assert!(ScheduleError::InvalidHorizon(0).is_configuration_error());
        assert!(ScheduleError::InvalidGrowthRate(-2.0).is_configuration_error());
        let io = ScheduleError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        assert!(!io.is_configuration_error());
    }
}
