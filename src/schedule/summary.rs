//! Schedule roll-ups: yearly totals, lease totals, deposit and TCAM

use super::rows::{round_cents, RentSchedulePeriod};
use crate::indexation::{ChargesEscalator, IndexResolver};
use crate::lease::ScheduleInput;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Totals of the periods starting in one calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyTotalSummary {
    pub year: i32,
    #[serde(rename = "baseRentHT")]
    pub base_rent_ht: f64,
    #[serde(rename = "chargesHT")]
    pub charges_ht: f64,
    #[serde(rename = "netRentHT")]
    pub net_rent_ht: f64,
}

impl YearlyTotalSummary {
    fn empty(year: i32) -> Self {
        Self {
            year,
            base_rent_ht: 0.0,
            charges_ht: 0.0,
            net_rent_ht: 0.0,
        }
    }
}

/// Lease-level statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    pub yearly_totals: Vec<YearlyTotalSummary>,
    #[serde(rename = "totalBaseRentHT")]
    pub total_base_rent_ht: f64,
    #[serde(rename = "totalChargesHT")]
    pub total_charges_ht: f64,
    #[serde(rename = "totalNetRentHT", alias = "totalNetRentHt")]
    pub total_net_rent_ht: f64,
    #[serde(rename = "depositHT")]
    pub deposit_ht: f64,
    /// Compound annual growth rate of net rent (0.02 = 2%)
    pub tcam: f64,
}

impl ScheduleSummary {
    /// Roll up a finished schedule
    pub fn from_schedule(
        schedule: &[RentSchedulePeriod],
        input: &ScheduleInput,
        days_per_year: f64,
        round: bool,
    ) -> Self {
        let mut yearly_totals = yearly_totals(schedule);
        if round {
            yearly_totals = yearly_totals
                .into_iter()
                .map(|t| YearlyTotalSummary {
                    base_rent_ht: round_cents(t.base_rent_ht),
                    charges_ht: round_cents(t.charges_ht),
                    net_rent_ht: round_cents(t.net_rent_ht),
                    ..t
                })
                .collect();
        }

        let (total_base_rent_ht, total_charges_ht, total_net_rent_ht) = yearly_totals
            .iter()
            .fold((0.0, 0.0, 0.0), |(base, charges, net), t| {
                (base + t.base_rent_ht, charges + t.charges_ht, net + t.net_rent_ht)
            });

        let deposit_ht = deposit_amount(schedule, input);
        let maybe_round = |x: f64| if round { round_cents(x) } else { x };

        Self {
            yearly_totals,
            total_base_rent_ht: maybe_round(total_base_rent_ht),
            total_charges_ht: maybe_round(total_charges_ht),
            total_net_rent_ht: maybe_round(total_net_rent_ht),
            deposit_ht: maybe_round(deposit_ht),
            tcam: tcam(schedule, days_per_year),
        }
    }
}

/// Group periods by the calendar year of their start date
pub fn yearly_totals(schedule: &[RentSchedulePeriod]) -> Vec<YearlyTotalSummary> {
    schedule
        .iter()
        .fold(BTreeMap::new(), |mut years: BTreeMap<i32, YearlyTotalSummary>, p| {
            let total = years
                .entry(p.year)
                .or_insert_with(|| YearlyTotalSummary::empty(p.year));
            total.base_rent_ht += p.base_rent_ht;
            total.charges_ht += p.total_charges_ht();
            total.net_rent_ht += p.net_rent_ht;
            years
        })
        .into_values()
        .collect()
}

/// Security deposit: `depositMonths` of the initial monthly rent, charges and taxes.
///
/// Priced from the contractual rates on the first day of the first full
/// period, so neither franchise nor incentive affects it. A lease with no full
/// period is priced on its start date.
pub fn deposit_amount(schedule: &[RentSchedulePeriod], input: &ScheduleInput) -> f64 {
    let months = input.deposit();
    if months == 0.0 {
        return 0.0;
    }

    let anchor = schedule
        .iter()
        .find(|p| is_full_period(p))
        .map_or(input.start_date, |p| p.period_start);
    let index_factor = IndexResolver::from_input(input).resolve(anchor).index_factor;
    let growth = ChargesEscalator::new(input.start_date, input.charges_growth_rate).factor_at(anchor);
    let period_total = input.base_rent() * index_factor + (input.charges() + input.taxes()) * growth;

    let months_per_period = input.payment_frequency.months_per_period() as f64;
    months * period_total / months_per_period
}

/// Compound annual growth of net rent between the first and last full periods.
///
/// Partial stubs at either end are skipped. Zero whenever the ratio is
/// undefined (fewer than two full periods, zero or negative base) and when
/// the lease opens on a period with no net rent.
pub fn tcam(schedule: &[RentSchedulePeriod], days_per_year: f64) -> f64 {
    if schedule.first().map_or(true, |p| p.net_rent_ht <= 0.0) {
        return 0.0;
    }

    let mut full = schedule.iter().filter(|p| is_full_period(p));
    let (first, last) = match (full.next(), full.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0.0,
    };

    if first.net_rent_ht <= 0.0 || last.net_rent_ht <= 0.0 || days_per_year <= 0.0 {
        return 0.0;
    }

    let years = (last.period_start - first.period_start).num_days() as f64 / days_per_year;
    if years <= 0.0 {
        return 0.0;
    }

    let rate = (last.net_rent_ht / first.net_rent_ht).powf(1.0 / years) - 1.0;
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}

fn is_full_period(period: &RentSchedulePeriod) -> bool {
    !period.is_partial && period.days > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lease::{IndexPoint, PaymentFrequency};
    use approx::assert_relative_eq;
    use chrono::{Datelike, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(start: NaiveDate, base: f64, charges: f64) -> RentSchedulePeriod {
        RentSchedulePeriod {
            period_start: start,
            period_end: start,
            year: start.year(),
            quarter: None,
            month: Some(start.month()),
            period_type: PaymentFrequency::Monthly,
            days: 30,
            is_partial: false,
            is_split: false,
            index_value: 100.0,
            index_factor: 1.0,
            office_rent_ht: base,
            parking_rent_ht: 0.0,
            base_rent_ht: 0.0,
            charges_ht: charges,
            taxes_ht: 0.0,
            other_costs_ht: 0.0,
            franchise_ht: 0.0,
            incentive_ht: 0.0,
            net_rent_ht: 0.0,
        }
        .with_totals()
    }

    #[test]
    fn test_yearly_totals_group_by_start_year() {
        let schedule = vec![
            row(date(2024, 11, 1), 1000.0, 100.0),
            row(date(2024, 12, 1), 1000.0, 100.0),
            row(date(2025, 1, 1), 1100.0, 100.0),
        ];
        let totals = yearly_totals(&schedule);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].year, 2024);
        assert_eq!(totals[0].base_rent_ht, 2000.0);
        assert_eq!(totals[0].charges_ht, 200.0);
        assert_eq!(totals[0].net_rent_ht, 2200.0);
        assert_eq!(totals[1].net_rent_ht, 1200.0);
    }

    #[test]
    fn test_tcam_zero_base() {
        let schedule = vec![row(date(2024, 1, 1), 0.0, 0.0), row(date(2026, 1, 1), 1000.0, 0.0)];
        let rate = tcam(&schedule, 365.0);
        assert_eq!(rate, 0.0);
        assert!(rate.is_finite());
    }

    #[test]
    fn test_tcam_growth() {
        let schedule = vec![row(date(2024, 1, 1), 1000.0, 0.0), row(date(2025, 1, 1), 1100.0, 0.0)];
        // 366 days in 2024 on a 365-day year
        let expected = 1.1_f64.powf(365.0 / 366.0) - 1.0;
        assert_relative_eq!(tcam(&schedule, 365.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_tcam_single_period() {
        let schedule = vec![row(date(2024, 1, 1), 1000.0, 0.0)];
        assert_eq!(tcam(&schedule, 365.0), 0.0);
        assert_eq!(tcam(&[], 365.0), 0.0);
    }

    #[test]
    fn test_tcam_skips_partial_stubs() {
        let mut head = row(date(2024, 1, 15), 50.0, 0.0);
        head.is_partial = true;
        let mut tail = row(date(2025, 2, 1), 5.0, 0.0);
        tail.is_partial = true;
        let schedule = vec![head, row(date(2024, 2, 1), 1000.0, 0.0), row(date(2025, 1, 1), 1100.0, 0.0), tail];

        let expected = 1.1_f64.powf(365.0 / 335.0) - 1.0;
        assert_relative_eq!(tcam(&schedule, 365.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_deposit_uses_first_full_period() {
        let mut input = ScheduleInput::new(date(2024, 1, 15), date(2026, 12, 31), PaymentFrequency::Monthly, 100.0);
        input.deposit_months = Some(3.0);
        input.office_rent_ht = Some(1000.0);
        input.charges_ht = Some(100.0);
        input.known_index_points = vec![IndexPoint::new(date(2024, 2, 1), 110.0)];

        // Row amounts are ignored; the February rates set the deposit
        let mut partial = row(date(2024, 1, 15), 500.0, 50.0);
        partial.is_partial = true;
        let schedule = vec![partial, row(date(2024, 2, 1), 10.0, 1.0), row(date(2025, 2, 1), 2000.0, 100.0)];

        assert_relative_eq!(deposit_amount(&schedule, &input), 3600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_deposit_fallback_to_rates() {
        let mut input = ScheduleInput::new(date(2024, 1, 15), date(2024, 1, 20), PaymentFrequency::Quarterly, 100.0);
        input.deposit_months = Some(3.0);
        input.office_rent_ht = Some(3000.0);
        input.taxes_ht = Some(300.0);

        let mut partial = row(date(2024, 1, 15), 100.0, 0.0);
        partial.is_partial = true;

        assert_relative_eq!(deposit_amount(&[partial], &input), 3300.0);
    }

    #[test]
    fn test_summary_totals_match_years() {
        let input = ScheduleInput::new(date(2024, 11, 1), date(2025, 1, 31), PaymentFrequency::Monthly, 100.0);
        let schedule = vec![
            row(date(2024, 11, 1), 1000.0, 10.0),
            row(date(2024, 12, 1), 1000.0, 10.0),
            row(date(2025, 1, 1), 1000.0, 10.0),
        ];
        let summary = ScheduleSummary::from_schedule(&schedule, &input, 365.0, true);

        let yearly_net: f64 = summary.yearly_totals.iter().map(|t| t.net_rent_ht).sum();
        assert_relative_eq!(summary.total_net_rent_ht, yearly_net);
        assert_relative_eq!(summary.total_net_rent_ht, 3030.0);
        assert_relative_eq!(summary.total_charges_ht, 30.0);
        assert_eq!(summary.deposit_ht, 0.0);
        assert_eq!(summary.tcam, 0.0);
    }
}
