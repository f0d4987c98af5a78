//! Batch runner for computing many schedules with one configuration

use crate::error::ScheduleResult;
use crate::lease::ScheduleInput;
use crate::schedule::{ComputeLeaseRentScheduleResult, ScheduleConfig, ScheduleEngine};
use log::info;
use rayon::prelude::*;
use std::time::Instant;

/// Runs schedule computations for one or many leases
///
/// # Example
/// ```ignore
/// let runner = ScheduleRunner::from_config_file("schedule.json")?;
/// let results = runner.run_batch_parallel(&leases);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleRunner {
    engine: ScheduleEngine,
}

impl ScheduleRunner {
    /// Runner with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScheduleConfig) -> Self {
        Self {
            engine: ScheduleEngine::new(config),
        }
    }

    pub fn from_config_file(path: &std::path::Path) -> ScheduleResult<Self> {
        Ok(Self::with_config(ScheduleConfig::from_json_file(path)?))
    }

    pub fn config(&self) -> &ScheduleConfig {
        self.engine.config()
    }

    /// Compute a single schedule
    pub fn run(&self, input: &ScheduleInput) -> ScheduleResult<ComputeLeaseRentScheduleResult> {
        self.engine.compute(input)
    }

    /// Compute schedules one after the other; one result per input, in order
    pub fn run_batch(&self, inputs: &[ScheduleInput]) -> Vec<ScheduleResult<ComputeLeaseRentScheduleResult>> {
        inputs.iter().map(|input| self.engine.compute(input)).collect()
    }

    /// Compute schedules across threads; one result per input, in order
    pub fn run_batch_parallel(&self, inputs: &[ScheduleInput]) -> Vec<ScheduleResult<ComputeLeaseRentScheduleResult>> {
        let start = Instant::now();
        let results: Vec<_> = inputs.par_iter().map(|input| self.engine.compute(input)).collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(
            "Computed {} schedules ({} failed) in {:?}",
            results.len(),
            failed,
            start.elapsed()
        );
        results
    }

    /// Compute the same lease over several projection horizons
    pub fn run_horizons(
        &self,
        input: &ScheduleInput,
        horizons: &[u32],
    ) -> Vec<ScheduleResult<ComputeLeaseRentScheduleResult>> {
        horizons
            .iter()
            .map(|&years| {
                let capped = ScheduleInput {
                    horizon_years: Some(years),
                    ..input.clone()
                };
                self.engine.compute(&capped)
            })
            .collect()
    }
}
