//! Schedule job outcome as reported to the extraction pipeline.
//!
//! A failed schedule never discards the extraction it was computed from:
//! the extraction payload is returned as received alongside the failure reason.

use crate::error::ScheduleError;
use crate::lease::ScheduleInput;
use crate::schedule::{ComputeLeaseRentScheduleResult, ScheduleEngine};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// Prefix of the user-facing failure message
pub const SCHEDULE_FAILURE_LABEL: &str = "échéancier non calculé";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Computed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleJobOutcome {
    pub status: JobStatus,
    /// Extraction data, untouched
    pub extraction: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ComputeLeaseRentScheduleResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScheduleJobOutcome {
    /// Parse the loosely-typed schedule input and compute it
    pub fn run(engine: &ScheduleEngine, extraction: Value, schedule_input: Value) -> Self {
        let computed = serde_json::from_value::<ScheduleInput>(schedule_input)
            .map_err(ScheduleError::from)
            .and_then(|input| engine.compute(&input));

        match computed {
            Ok(schedule) => Self::computed(extraction, schedule),
            Err(e) => {
                warn!("Schedule computation failed: {}", e);
                Self::failed(extraction, e)
            }
        }
    }

    pub fn computed(extraction: Value, schedule: ComputeLeaseRentScheduleResult) -> Self {
        Self {
            status: JobStatus::Computed,
            extraction,
            schedule: Some(schedule),
            error: None,
        }
    }

    pub fn failed(extraction: Value, reason: impl Display) -> Self {
        Self {
            status: JobStatus::Failed,
            extraction,
            schedule: None,
            error: Some(format!("{}: {}", SCHEDULE_FAILURE_LABEL, reason)),
        }
    }

    pub fn is_computed(&self) -> bool {
        self.status == JobStatus::Computed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extraction() -> Value {
        json!({"tenant": "SARL Exemple", "surface": 420, "indexation": "ILAT"})
    }

    #[test]
    fn test_computed_outcome() {
        let input = json!({
            "startDate": "2024-04-05",
            "endDate": "2033-04-04",
            "paymentFrequency": "trimestriel",
            "baseIndexValue": 100.0,
            "officeRentHT": 912.5
        });
        let outcome = ScheduleJobOutcome::run(&ScheduleEngine::default(), extraction(), input);

        assert!(outcome.is_computed());
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.extraction, extraction());
        assert_eq!(outcome.schedule.unwrap().schedule[0].net_rent_ht, 870.0);
    }

    #[test]
    fn test_failed_outcome_keeps_extraction() {
        let input = json!({
            "startDate": "2024-04-05",
            "endDate": "2023-04-04",
            "paymentFrequency": "quarterly",
            "baseIndexValue": 100.0
        });
        let outcome = ScheduleJobOutcome::run(&ScheduleEngine::default(), extraction(), input);

        assert_eq!(outcome.status, JobStatus::Failed);
        assert_eq!(outcome.extraction, extraction());
        assert!(outcome.schedule.is_none());
        let error = outcome.error.unwrap();
        assert!(error.starts_with("échéancier non calculé: "));
        assert!(error.contains("Invalid date range"));
    }

    #[test]
    fn test_malformed_input_is_failure() {
        let outcome = ScheduleJobOutcome::run(
            &ScheduleEngine::default(),
            extraction(),
            json!({"startDate": "2024-04-05", "paymentFrequency": "weekly"}),
        );
        assert!(!outcome.is_computed());

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert!(json.get("schedule").is_none());
    }
}
