//! Calendar date helpers shared by the period generator and the escalators

use crate::error::{ScheduleError, ScheduleResult};
use crate::lease::PaymentFrequency;
use chrono::{Datelike, Days, Months, NaiveDate};

/// Add calendar months, rolling back to the last valid day (Jan 31 + 1 month = Feb 28/29)
pub fn add_months(date: NaiveDate, months: u32) -> ScheduleResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| ScheduleError::InvalidDate {
            value: date.to_string(),
            reason: format!("adding {} months overflows the calendar", months),
        })
}

/// Add whole years; a Feb 29 anniversary falls on Feb 28 in common years
pub fn add_years(date: NaiveDate, years: u32) -> ScheduleResult<NaiveDate> {
    add_months(date, years.saturating_mul(12))
}

/// The calendar day before `date`
pub fn day_before(date: NaiveDate) -> ScheduleResult<NaiveDate> {
    date.checked_sub_days(Days::new(1))
        .ok_or_else(|| ScheduleError::InvalidDate {
            value: date.to_string(),
            reason: "no earlier calendar day".to_string(),
        })
}

/// Number of calendar days in `[start, end]`, both ends included (0 if end < start)
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        0
    } else {
        (end - start).num_days() + 1
    }
}

/// Calendar quarter (1-4) of a date
pub fn quarter_of(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

/// First day of the calendar month or quarter containing `date`
pub fn period_anchor(date: NaiveDate, frequency: PaymentFrequency) -> NaiveDate {
    let month = match frequency {
        PaymentFrequency::Monthly => date.month(),
        PaymentFrequency::Quarterly => (quarter_of(date) - 1) * 3 + 1,
    };
    // Day 1 of an existing month always exists
    NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
}

/// Number of whole years elapsed from `origin` to `date` (anniversary-based)
pub fn full_years_between(origin: NaiveDate, date: NaiveDate) -> u32 {
    if date <= origin {
        return 0;
    }
    let mut years = (date.year() - origin.year()).max(0) as u32;
    while years > 0 {
        match add_years(origin, years) {
            Ok(anniversary) if anniversary <= date => break,
            _ => years -= 1,
        }
    }
    years
}
