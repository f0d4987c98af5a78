//! AWS Lambda handler for schedule jobs
//!
//! Invoked by the extraction pipeline once lease terms are extracted. Accepts
//! the extraction payload and the schedule input as JSON and returns the job
//! outcome; a failed schedule is reported with the extraction preserved.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use lease_rent_schedule::{ScheduleConfig, ScheduleEngine, ScheduleJobOutcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Input of one schedule job
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Identifier of the extraction record, echoed back
    #[serde(default)]
    pub extraction_id: Option<String>,

    /// Extraction data, returned untouched
    #[serde(default)]
    pub extraction: Value,

    /// Schedule input as produced by the extraction layer
    #[serde(default)]
    pub schedule_input: Value,

    /// Engine configuration overrides
    #[serde(default)]
    pub config: Option<ScheduleConfig>,
}

/// Output of one schedule job
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_id: Option<String>,
    #[serde(flatten)]
    pub outcome: ScheduleJobOutcome,
    pub execution_time_ms: u64,
}

async fn function_handler(event: LambdaEvent<ScheduleRequest>) -> Result<ScheduleResponse, Error> {
    let start = Instant::now();
    let (request, _context) = event.into_parts();

    let engine = ScheduleEngine::new(request.config.unwrap_or_default());
    let outcome = ScheduleJobOutcome::run(&engine, request.extraction, request.schedule_input);

    log::info!(
        "Schedule job {} finished: {:?}",
        request.extraction_id.as_deref().unwrap_or("-"),
        outcome.status
    );

    Ok(ScheduleResponse {
        extraction_id: request.extraction_id,
        outcome,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(function_handler)).await
}
