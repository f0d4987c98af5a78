//! CSV output of schedules and yearly totals

use super::rows::RentSchedulePeriod;
use super::summary::YearlyTotalSummary;
use crate::error::ScheduleResult;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Flat CSV row; `Option` columns are left empty when absent
#[derive(Debug, Serialize)]
struct PeriodCsvRow {
    #[serde(rename = "PeriodStart")]
    period_start: NaiveDate,
    #[serde(rename = "PeriodEnd")]
    period_end: NaiveDate,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Quarter")]
    quarter: Option<u32>,
    #[serde(rename = "Month")]
    month: Option<u32>,
    #[serde(rename = "Days")]
    days: i64,
    #[serde(rename = "IndexValue")]
    index_value: f64,
    #[serde(rename = "IndexFactor")]
    index_factor: f64,
    #[serde(rename = "OfficeRentHT")]
    office_rent_ht: f64,
    #[serde(rename = "ParkingRentHT")]
    parking_rent_ht: f64,
    #[serde(rename = "ChargesHT")]
    charges_ht: f64,
    #[serde(rename = "TaxesHT")]
    taxes_ht: f64,
    #[serde(rename = "OtherCostsHT")]
    other_costs_ht: f64,
    #[serde(rename = "FranchiseHT")]
    franchise_ht: f64,
    #[serde(rename = "IncentiveHT")]
    incentive_ht: f64,
    #[serde(rename = "NetRentHT")]
    net_rent_ht: f64,
}

impl From<&RentSchedulePeriod> for PeriodCsvRow {
    fn from(p: &RentSchedulePeriod) -> Self {
        Self {
            period_start: p.period_start,
            period_end: p.period_end,
            year: p.year,
            quarter: p.quarter,
            month: p.month,
            days: p.days,
            index_value: p.index_value,
            index_factor: p.index_factor,
            office_rent_ht: p.office_rent_ht,
            parking_rent_ht: p.parking_rent_ht,
            charges_ht: p.charges_ht,
            taxes_ht: p.taxes_ht,
            other_costs_ht: p.other_costs_ht,
            franchise_ht: p.franchise_ht,
            incentive_ht: p.incentive_ht,
            net_rent_ht: p.net_rent_ht,
        }
    }
}

#[derive(Debug, Serialize)]
struct YearlyCsvRow<'a> {
    #[serde(rename = "LeaseId")]
    lease_id: &'a str,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "BaseRentHT")]
    base_rent_ht: f64,
    #[serde(rename = "ChargesHT")]
    charges_ht: f64,
    #[serde(rename = "NetRentHT")]
    net_rent_ht: f64,
}

/// Write one CSV row per period
pub fn write_schedule_csv<W: Write>(writer: W, schedule: &[RentSchedulePeriod]) -> ScheduleResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for period in schedule {
        csv_writer.serialize(PeriodCsvRow::from(period))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_schedule_csv_file<P: AsRef<Path>>(path: P, schedule: &[RentSchedulePeriod]) -> ScheduleResult<()> {
    write_schedule_csv(File::create(path)?, schedule)
}

/// Write yearly totals of several leases, keyed by lease identifier
pub fn write_yearly_totals_csv<'a, W, I>(writer: W, leases: I) -> ScheduleResult<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a [YearlyTotalSummary])>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (lease_id, totals) in leases {
        for total in totals {
            csv_writer.serialize(YearlyCsvRow {
                lease_id,
                year: total.year,
                base_rent_ht: total.base_rent_ht,
                charges_ht: total.charges_ht,
                net_rent_ht: total.net_rent_ht,
            })?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lease::{PaymentFrequency, ScheduleInput};
    use crate::schedule::compute_lease_rent_schedule;

    fn result() -> crate::schedule::ComputeLeaseRentScheduleResult {
        let start = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 4, 4).unwrap();
        let mut input = ScheduleInput::new(start, end, PaymentFrequency::Quarterly, 100.0);
        input.office_rent_ht = Some(912.5);
        compute_lease_rent_schedule(&input).unwrap()
    }

    #[test]
    fn test_schedule_csv() {
        let result = result();
        let mut buffer = Vec::new();
        write_schedule_csv(&mut buffer, &result.schedule).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), result.schedule.len() + 1);
        assert!(lines[0].starts_with("PeriodStart,PeriodEnd,Year,Quarter,Month,Days"));
        assert!(lines[1].starts_with("2024-04-05,2024-06-30,2024,2,,87,"));
        assert!(lines[1].ends_with(",870.0"));
    }

    #[test]
    fn test_yearly_totals_csv() {
        let result = result();
        let mut buffer = Vec::new();
        write_yearly_totals_csv(&mut buffer, [("lease-1", result.summary.yearly_totals.as_slice())]).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("LeaseId,Year,BaseRentHT,ChargesHT,NetRentHT\n"));
        assert!(text.contains("lease-1,2024,2695.0,0.0,2695.0"));
    }
}
