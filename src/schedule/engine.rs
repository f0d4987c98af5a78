//! Rent schedule engine: composes indexed rent, escalated charges and
//! accommodations period by period

use super::apportion::{apportion, bill, day_weighted_average, DayBasis, Segment};
use super::periods::{effective_end_date, generate_periods, BillingPeriod};
use super::rows::{BoundaryCondition, ComputeLeaseRentScheduleResult, RentSchedulePeriod};
use super::summary::ScheduleSummary;
use crate::calendar::{add_months, quarter_of};
use crate::error::ScheduleResult;
use crate::indexation::{ChargesEscalator, IndexResolver};
use crate::lease::{PaymentFrequency, ScheduleInput};
use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Configuration for a schedule computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleConfig {
    /// Projection length when the input carries no horizon
    pub default_horizon_years: u32,

    /// Year length turning a period rate into a daily rate
    pub days_per_year: f64,

    /// Round monetary fields to cents
    pub round_to_cents: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            default_horizon_years: 3,
            days_per_year: 365.0,
            round_to_cents: true,
        }
    }
}

impl ScheduleConfig {
    /// Load a configuration from JSON; missing keys keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ScheduleResult<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Per-lease context shared by every period
struct LeaseContext<'a> {
    input: &'a ScheduleInput,
    resolver: IndexResolver,
    escalator: ChargesEscalator,
    /// First day no longer covered by the franchise
    franchise_end: Option<NaiveDate>,
    basis: DayBasis,
}

impl LeaseContext<'_> {
    fn index_factor(&self, segment: &Segment) -> f64 {
        self.resolver.resolve(segment.start).index_factor
    }

    fn is_franchised(&self, segment: &Segment) -> bool {
        self.franchise_end.is_some_and(|end| segment.start < end)
    }
}

/// Rent schedule engine
#[derive(Debug, Clone, Default)]
pub struct ScheduleEngine {
    config: ScheduleConfig,
}

impl ScheduleEngine {
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Compute the schedule of one lease.
    ///
    /// Pure function of `input`: the same input always yields the same result.
    pub fn compute(&self, input: &ScheduleInput) -> ScheduleResult<ComputeLeaseRentScheduleResult> {
        input.validate()?;
        let end = effective_end_date(input, self.config.default_horizon_years)?;

        let franchise_end = match input.franchise() {
            0 => None,
            months => Some(add_months(input.start_date, months)?),
        };
        let ctx = LeaseContext {
            input,
            resolver: IndexResolver::from_input(input),
            escalator: ChargesEscalator::new(input.start_date, input.charges_growth_rate),
            franchise_end,
            basis: DayBasis::new(input.payment_frequency, self.config.days_per_year),
        };

        let mut conditions = Vec::new();
        if ctx.resolver.is_flat() {
            conditions.push(BoundaryCondition::FlatIndexation);
        }

        let composed = if input.start_date == input.end_date {
            conditions.push(BoundaryCondition::ZeroLengthLease);
            vec![self.empty_period(&ctx)]
        } else {
            generate_periods(input.start_date, end, input.payment_frequency)?
                .iter()
                .map(|period| self.compose_period(&ctx, period))
                .collect::<ScheduleResult<Vec<_>>>()?
        };
        let schedule = self.apply_incentive(input, composed, &mut conditions);

        if let Some(first) = schedule.first() {
            if first.franchise_ht > 0.0 && first.base_rent_ht == 0.0 {
                conditions.push(BoundaryCondition::FirstPeriodFullyFranchised);
            }
        }

        let summary = ScheduleSummary::from_schedule(
            &schedule,
            input,
            self.config.days_per_year,
            self.config.round_to_cents,
        );

        debug!(
            "Computed {} {} periods from {} to {}: net {:.2}, TCAM {:.4}",
            schedule.len(),
            input.payment_frequency,
            input.start_date,
            end,
            summary.total_net_rent_ht,
            summary.tcam
        );

        Ok(ComputeLeaseRentScheduleResult {
            schedule,
            summary,
            boundary_conditions: conditions,
        })
    }

    /// Amounts due for one billing period, before the incentive
    fn compose_period(&self, ctx: &LeaseContext<'_>, period: &BillingPeriod) -> ScheduleResult<RentSchedulePeriod> {
        let input = ctx.input;

        // Rent: split at index revisions and at the end of the franchise
        let revisions = ctx.resolver.revisions_within(period.start, period.end);
        let mut rent_breaks = revisions.clone();
        rent_breaks.extend(ctx.franchise_end);
        let rent_segments = apportion(period, &rent_breaks)?;

        let gross_office = bill(period, &rent_segments, input.office_rent(), &ctx.basis, |s| ctx.index_factor(s));
        let gross_parking = bill(period, &rent_segments, input.parking_rent(), &ctx.basis, |s| ctx.index_factor(s));
        let billed_factor = |s: &Segment| if ctx.is_franchised(s) { 0.0 } else { ctx.index_factor(s) };
        let office = bill(period, &rent_segments, input.office_rent(), &ctx.basis, billed_factor);
        let parking = bill(period, &rent_segments, input.parking_rent(), &ctx.basis, billed_factor);

        // Charges: split at lease anniversaries only
        let charge_breaks = ctx.escalator.anniversaries_within(period.start, period.end)?;
        let charge_segments = apportion(period, &charge_breaks)?;
        let growth = |s: &Segment| ctx.escalator.factor_at(s.start);
        let charges = bill(period, &charge_segments, input.charges(), &ctx.basis, growth);
        let taxes = bill(period, &charge_segments, input.taxes(), &ctx.basis, growth);
        let other_costs = bill(period, &charge_segments, input.other_costs(), &ctx.basis, growth);

        let index_value = day_weighted_average(&rent_segments, |s| ctx.resolver.resolve(s.start).index_value);
        if !revisions.is_empty() {
            debug!(
                "Period {}..{} split at {:?}, blended index {:.4}",
                period.start, period.end, revisions, index_value
            );
        }

        let row = RentSchedulePeriod {
            period_start: period.start,
            period_end: period.end,
            year: period.start.year(),
            quarter: match input.payment_frequency {
                PaymentFrequency::Quarterly => Some(quarter_of(period.start)),
                PaymentFrequency::Monthly => None,
            },
            month: match input.payment_frequency {
                PaymentFrequency::Monthly => Some(period.start.month()),
                PaymentFrequency::Quarterly => None,
            },
            period_type: input.payment_frequency,
            days: period.days(),
            is_partial: !period.is_full(),
            is_split: !revisions.is_empty(),
            index_value,
            index_factor: index_value / ctx.resolver.base_value(),
            office_rent_ht: office,
            parking_rent_ht: parking,
            base_rent_ht: 0.0,
            charges_ht: charges,
            taxes_ht: taxes,
            other_costs_ht: other_costs,
            franchise_ht: (gross_office - office) + (gross_parking - parking),
            incentive_ht: 0.0,
            net_rent_ht: 0.0,
        }
        .with_totals();

        Ok(self.finish(row))
    }

    /// Deduct the incentive from the first period, never below zero
    fn apply_incentive(
        &self,
        input: &ScheduleInput,
        schedule: Vec<RentSchedulePeriod>,
        conditions: &mut Vec<BoundaryCondition>,
    ) -> Vec<RentSchedulePeriod> {
        let requested = input.incentive();
        if requested == 0.0 {
            return schedule;
        }

        schedule
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                if i > 0 {
                    return row;
                }
                let available = row.net_rent_ht;
                let applied = requested.min(available);
                if requested > available {
                    warn!(
                        "Incentive {:.2} exceeds first period rent {:.2}; clamped",
                        requested, available
                    );
                    conditions.push(BoundaryCondition::IncentiveClamped { requested, applied });
                }
                self.finish(RentSchedulePeriod { incentive_ht: applied, ..row }.with_totals())
            })
            .collect()
    }

    /// Single empty period of a lease that starts and ends on the same day
    fn empty_period(&self, ctx: &LeaseContext<'_>) -> RentSchedulePeriod {
        let day = ctx.input.start_date;
        let observation = ctx.resolver.resolve(day);
        let frequency = ctx.input.payment_frequency;

        RentSchedulePeriod {
            period_start: day,
            period_end: day,
            year: day.year(),
            quarter: (frequency == PaymentFrequency::Quarterly).then(|| quarter_of(day)),
            month: (frequency == PaymentFrequency::Monthly).then(|| day.month()),
            period_type: frequency,
            days: 0,
            is_partial: true,
            is_split: false,
            index_value: observation.index_value,
            index_factor: observation.index_factor,
            office_rent_ht: 0.0,
            parking_rent_ht: 0.0,
            base_rent_ht: 0.0,
            charges_ht: 0.0,
            taxes_ht: 0.0,
            other_costs_ht: 0.0,
            franchise_ht: 0.0,
            incentive_ht: 0.0,
            net_rent_ht: 0.0,
        }
    }

    fn finish(&self, row: RentSchedulePeriod) -> RentSchedulePeriod {
        if self.config.round_to_cents {
            row.rounded()
        } else {
            row
        }
    }
}

/// Compute a schedule with the default configuration
pub fn compute_lease_rent_schedule(input: &ScheduleInput) -> ScheduleResult<ComputeLeaseRentScheduleResult> {
    ScheduleEngine::default().compute(input)
}
