//! Escalation of charges, taxes and other costs.
//!
//! Charges do not follow the rent index. They grow at a flat annual rate,
//! compounded once per full lease year elapsed since the start date.

use crate::calendar::{add_years, full_years_between};
use crate::error::ScheduleResult;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy)]
pub struct ChargesEscalator {
    start_date: NaiveDate,
    annual_rate: f64,
}

impl ChargesEscalator {
    pub fn new(start_date: NaiveDate, annual_rate: Option<f64>) -> Self {
        Self {
            start_date,
            annual_rate: annual_rate.unwrap_or(0.0),
        }
    }

    /// Whether charges change over the lease at all
    pub fn is_active(&self) -> bool {
        self.annual_rate != 0.0
    }

    pub fn annual_rate(&self) -> f64 {
        self.annual_rate
    }

    /// Growth factor applying on `date`
    pub fn factor_at(&self, date: NaiveDate) -> f64 {
        if !self.is_active() {
            return 1.0;
        }
        let years = full_years_between(self.start_date, date);
        (1.0 + self.annual_rate).powi(years as i32)
    }

    /// Lease anniversaries `d` with `start < d <= end` (none when inactive)
    pub fn anniversaries_within(&self, start: NaiveDate, end: NaiveDate) -> ScheduleResult<Vec<NaiveDate>> {
        let mut dates = Vec::new();
        if !self.is_active() {
            return Ok(dates);
        }

        let mut year = full_years_between(self.start_date, start) + 1;
        loop {
            let anniversary = add_years(self.start_date, year)?;
            if anniversary > end {
                break;
            }
            if anniversary > start {
                dates.push(anniversary);
            }
            year += 1;
        }
        Ok(dates)
    }
}
