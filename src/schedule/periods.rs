//! Billing period generation
//!
//! Periods follow calendar months or calendar quarters. The first period
//! starts on the lease start date and the last one ends on the effective
//! end date, so both may be shorter than their nominal calendar period.

use crate::calendar::{add_months, add_years, day_before, days_inclusive, period_anchor};
use crate::error::{ScheduleError, ScheduleResult};
use crate::lease::{PaymentFrequency, ScheduleInput};
use chrono::NaiveDate;

/// One billing period with the calendar period it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingPeriod {
    /// First billed day
    pub start: NaiveDate,
    /// Last billed day (inclusive)
    pub end: NaiveDate,
    /// First day of the calendar month/quarter
    pub nominal_start: NaiveDate,
    /// Last day of the calendar month/quarter
    pub nominal_end: NaiveDate,
}

impl BillingPeriod {
    /// Covers its whole calendar period
    pub fn is_full(&self) -> bool {
        self.start == self.nominal_start && self.end == self.nominal_end
    }

    pub fn days(&self) -> i64 {
        days_inclusive(self.start, self.end)
    }
}

/// Last day projected: the lease end, capped at `horizon_years` from the start.
///
/// A start date after the capped end is a configuration error.
pub fn effective_end_date(input: &ScheduleInput, default_horizon_years: u32) -> ScheduleResult<NaiveDate> {
    let horizon = input.horizon_years.unwrap_or(default_horizon_years);
    if horizon == 0 {
        return Err(ScheduleError::InvalidHorizon(horizon));
    }

    let horizon_end = day_before(add_years(input.start_date, horizon)?)?;
    let end = input.end_date.min(horizon_end);

    if input.start_date > end {
        return Err(ScheduleError::InvalidDateRange {
            start: input.start_date,
            end,
        });
    }

    Ok(end)
}

/// Contiguous periods covering `[start, end]` exactly once
pub fn generate_periods(
    start: NaiveDate,
    end: NaiveDate,
    frequency: PaymentFrequency,
) -> ScheduleResult<Vec<BillingPeriod>> {
    if start > end {
        return Err(ScheduleError::InvalidDateRange { start, end });
    }

    let mut periods = Vec::new();
    let mut nominal_start = period_anchor(start, frequency);

    loop {
        let next_start = add_months(nominal_start, frequency.months_per_period())?;
        let nominal_end = day_before(next_start)?;

        periods.push(BillingPeriod {
            start: nominal_start.max(start),
            end: nominal_end.min(end),
            nominal_start,
            nominal_end,
        });

        if nominal_end >= end {
            break;
        }
        nominal_start = next_start;
    }

    Ok(periods)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_contiguous(periods: &[BillingPeriod], start: NaiveDate, end: NaiveDate) {
        assert_eq!(periods.first().unwrap().start, start);
        assert_eq!(periods.last().unwrap().end, end);
        for pair in periods.windows(2) {
            assert!(pair[0].start <= pair[0].end);
            assert_eq!(day_before(pair[1].start).unwrap(), pair[0].end, "gap or overlap after {:?}", pair[0]);
        }
        let covered: i64 = periods.iter().map(|p| p.days()).sum();
        assert_eq!(covered, days_inclusive(start, end));
    }

    #[test]
    fn test_quarterly_partial_first_and_last() {
        let start = date(2024, 4, 5);
        let end = date(2027, 4, 4);
        let periods = generate_periods(start, end, PaymentFrequency::Quarterly).unwrap();

        // Q2 2024 .. Q2 2027
        assert_eq!(periods.len(), 13);
        assert_eq!(periods[0].start, date(2024, 4, 5));
        assert_eq!(periods[0].end, date(2024, 6, 30));
        assert_eq!(periods[0].days(), 87);
        assert!(!periods[0].is_full());
        assert!(periods[1].is_full());
        assert_eq!(periods[12].start, date(2027, 4, 1));
        assert_eq!(periods[12].end, date(2027, 4, 4));

        assert_contiguous(&periods, start, end);
    }

    #[test]
    fn test_monthly_periods() {
        let start = date(2024, 1, 15);
        let end = date(2024, 3, 10);
        let periods = generate_periods(start, end, PaymentFrequency::Monthly).unwrap();

        assert_eq!(periods.len(), 3);
        assert_eq!(periods[1].start, date(2024, 2, 1));
        assert_eq!(periods[1].end, date(2024, 2, 29));
        assert!(periods[1].is_full());
        assert_contiguous(&periods, start, end);
    }

    #[test]
    fn test_single_day_lease() {
        let day = date(2024, 5, 1);
        let periods = generate_periods(day, day, PaymentFrequency::Quarterly).unwrap();
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].start, day);
        assert_eq!(periods[0].end, day);
    }

    #[test]
    fn test_inverted_range_is_error() {
        let result = generate_periods(date(2024, 5, 2), date(2024, 5, 1), PaymentFrequency::Monthly);
        assert!(matches!(result, Err(ScheduleError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_effective_end_date_horizon_cap() {
        let mut input = ScheduleInput::new(date(2024, 4, 5), date(2033, 4, 4), PaymentFrequency::Quarterly, 100.0);
        assert_eq!(effective_end_date(&input, 3).unwrap(), date(2027, 4, 4));

        input.horizon_years = Some(9);
        assert_eq!(effective_end_date(&input, 3).unwrap(), date(2033, 4, 4));

        input.horizon_years = Some(20);
        assert_eq!(effective_end_date(&input, 3).unwrap(), date(2033, 4, 4));
    }

    #[test]
    fn test_effective_end_date_errors() {
        let mut input = ScheduleInput::new(date(2024, 4, 5), date(2024, 1, 1), PaymentFrequency::Monthly, 100.0);
        assert!(matches!(
            effective_end_date(&input, 3),
            Err(ScheduleError::InvalidDateRange { .. })
        ));

        input.end_date = date(2030, 1, 1);
        input.horizon_years = Some(0);
        assert!(matches!(effective_end_date(&input, 3), Err(ScheduleError::InvalidHorizon(0))));
    }
}
