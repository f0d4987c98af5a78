//! Day-weighted apportionment of a billing period
//!
//! A period is cut into segments wherever something that changes the amount
//! due (an index revision, the end of the franchise, a charges anniversary)
//! takes effect after its first day. A full calendar period with a single
//! segment is billed at the period rate; anything else is billed per day.

use super::periods::BillingPeriod;
use crate::calendar::{day_before, days_inclusive};
use crate::error::ScheduleResult;
use crate::lease::PaymentFrequency;
use chrono::NaiveDate;

/// Sub-interval of a billing period over which nothing changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Segment {
    pub fn days(&self) -> i64 {
        days_inclusive(self.start, self.end)
    }
}

/// Day-count basis turning a per-period rate into a daily rate
#[derive(Debug, Clone, Copy)]
pub struct DayBasis {
    pub frequency: PaymentFrequency,
    /// Days in a nominal year (365 by default)
    pub days_per_year: f64,
}

impl DayBasis {
    pub fn new(frequency: PaymentFrequency, days_per_year: f64) -> Self {
        Self { frequency, days_per_year }
    }

    /// 912.50 per quarter on 365 days is 10.00 per day
    pub fn daily_rate(&self, period_rate: f64) -> f64 {
        if self.days_per_year <= 0.0 {
            return 0.0;
        }
        period_rate * self.frequency.periods_per_year() as f64 / self.days_per_year
    }
}

/// Split `period` at each breakpoint `d` with `period.start < d <= period.end`
pub fn apportion(period: &BillingPeriod, breakpoints: &[NaiveDate]) -> ScheduleResult<Vec<Segment>> {
    let mut cuts: Vec<NaiveDate> = breakpoints
        .iter()
        .copied()
        .filter(|d| *d > period.start && *d <= period.end)
        .collect();
    cuts.sort();
    cuts.dedup();

    let mut segments = Vec::with_capacity(cuts.len() + 1);
    let mut segment_start = period.start;
    for cut in cuts {
        segments.push(Segment {
            start: segment_start,
            end: day_before(cut)?,
        });
        segment_start = cut;
    }
    segments.push(Segment {
        start: segment_start,
        end: period.end,
    });

    Ok(segments)
}

/// Amount due for `period_rate` over the segments of `period`.
///
/// `weight` gives each segment's multiplier (index factor, growth factor,
/// zero for waived days).
pub fn bill<F>(period: &BillingPeriod, segments: &[Segment], period_rate: f64, basis: &DayBasis, weight: F) -> f64
where
    F: Fn(&Segment) -> f64,
{
    if period_rate == 0.0 {
        return 0.0;
    }

    match segments {
        [only] if period.is_full() => period_rate * weight(only),
        _ => {
            let daily = basis.daily_rate(period_rate);
            segments
                .iter()
                .map(|s| daily * s.days() as f64 * weight(s))
                .sum()
        }
    }
}

/// Day-weighted mean of a per-segment value (reporting only)
pub fn day_weighted_average<F>(segments: &[Segment], value: F) -> f64
where
    F: Fn(&Segment) -> f64,
{
    let total_days: i64 = segments.iter().map(|s| s.days()).sum();
    if total_days <= 0 {
        return segments.first().map(&value).unwrap_or(0.0);
    }
    segments
        .iter()
        .map(|s| s.days() as f64 * value(s))
        .sum::<f64>()
        / total_days as f64
}
