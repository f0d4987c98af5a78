//! Schedule output structures

use super::summary::ScheduleSummary;
use crate::lease::PaymentFrequency;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Amount due for one billing period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentSchedulePeriod {
    // Timing
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub year: i32,
    /// Calendar quarter of `period_start` (quarterly schedules)
    pub quarter: Option<u32>,
    /// Calendar month of `period_start` (monthly schedules)
    pub month: Option<u32>,
    pub period_type: PaymentFrequency,
    pub days: i64,
    /// Shorter than its calendar month/quarter
    pub is_partial: bool,
    /// An index revision takes effect after the first day
    pub is_split: bool,

    // Indexation (day-weighted on split periods, display only)
    pub index_value: f64,
    pub index_factor: f64,

    // Rent, after franchise
    #[serde(rename = "officeRentHT")]
    pub office_rent_ht: f64,
    #[serde(rename = "parkingRentHT")]
    pub parking_rent_ht: f64,
    #[serde(rename = "baseRentHT")]
    pub base_rent_ht: f64,

    // Charges, escalated by the charges growth rate
    #[serde(rename = "chargesHT")]
    pub charges_ht: f64,
    #[serde(rename = "taxesHT")]
    pub taxes_ht: f64,
    #[serde(rename = "otherCostsHT")]
    pub other_costs_ht: f64,

    // Accommodations
    /// Rent waived by the franchise
    #[serde(rename = "franchiseHT")]
    pub franchise_ht: f64,
    /// Incentive deducted from this period
    #[serde(rename = "incentiveHT")]
    pub incentive_ht: f64,

    #[serde(rename = "netRentHT")]
    pub net_rent_ht: f64,
}

impl RentSchedulePeriod {
    /// Charges, taxes and other costs
    pub fn total_charges_ht(&self) -> f64 {
        self.charges_ht + self.taxes_ht + self.other_costs_ht
    }

    /// Rent before the franchise is applied
    pub fn gross_base_rent_ht(&self) -> f64 {
        self.base_rent_ht + self.franchise_ht
    }

    /// Recompute base and net rent from the components
    pub(crate) fn with_totals(mut self) -> Self {
        self.base_rent_ht = self.office_rent_ht + self.parking_rent_ht;
        self.net_rent_ht = (self.base_rent_ht + self.total_charges_ht() - self.incentive_ht).max(0.0);
        self
    }

    /// Round every monetary field to cents
    pub(crate) fn rounded(mut self) -> Self {
        self.office_rent_ht = round_cents(self.office_rent_ht);
        self.parking_rent_ht = round_cents(self.parking_rent_ht);
        self.charges_ht = round_cents(self.charges_ht);
        self.taxes_ht = round_cents(self.taxes_ht);
        self.other_costs_ht = round_cents(self.other_costs_ht);
        self.franchise_ht = round_cents(self.franchise_ht);
        self.incentive_ht = round_cents(self.incentive_ht);
        let mut rounded = self.with_totals();
        rounded.base_rent_ht = round_cents(rounded.base_rent_ht);
        rounded.net_rent_ht = round_cents(rounded.net_rent_ht);
        rounded
    }
}

pub(crate) fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Degenerate-but-valid situations met while computing a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BoundaryCondition {
    /// Start and end dates coincide; one empty period is returned
    ZeroLengthLease,
    /// No known index revision; the base index applies throughout
    FlatIndexation,
    /// The franchise waives the entire rent of the first period
    FirstPeriodFullyFranchised,
    /// The incentive exceeded the first period's rent and was capped
    #[serde(rename_all = "camelCase")]
    IncentiveClamped { requested: f64, applied: f64 },
}

/// Full result of a schedule computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeLeaseRentScheduleResult {
    pub schedule: Vec<RentSchedulePeriod>,
    pub summary: ScheduleSummary,
    #[serde(default)]
    pub boundary_conditions: Vec<BoundaryCondition>,
}

impl ComputeLeaseRentScheduleResult {
    pub fn first_period(&self) -> Option<&RentSchedulePeriod> {
        self.schedule.first()
    }

    pub fn last_period(&self) -> Option<&RentSchedulePeriod> {
        self.schedule.last()
    }

    pub fn has_condition(&self, condition: &BoundaryCondition) -> bool {
        self.boundary_conditions
            .iter()
            .any(|c| std::mem::discriminant(c) == std::mem::discriminant(condition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period() -> RentSchedulePeriod {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        RentSchedulePeriod {
            period_start: day,
            period_end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            year: 2024,
            quarter: None,
            month: Some(1),
            period_type: PaymentFrequency::Monthly,
            days: 31,
            is_partial: false,
            is_split: false,
            index_value: 100.0,
            index_factor: 1.0,
            office_rent_ht: 1000.004,
            parking_rent_ht: 99.996,
            base_rent_ht: 0.0,
            charges_ht: 50.0,
            taxes_ht: 25.0,
            other_costs_ht: 0.0,
            franchise_ht: 0.0,
            incentive_ht: 0.0,
            net_rent_ht: 0.0,
        }
    }

    #[test]
    fn test_totals_and_rounding() {
        let row = period().rounded();
        assert_eq!(row.office_rent_ht, 1000.0);
        assert_eq!(row.parking_rent_ht, 100.0);
        assert_eq!(row.base_rent_ht, 1100.0);
        assert_eq!(row.net_rent_ht, 1175.0);
    }

    #[test]
    fn test_net_never_negative() {
        let mut row = period();
        row.incentive_ht = 5000.0;
        assert_eq!(row.with_totals().net_rent_ht, 0.0);
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(period().with_totals()).unwrap();
        assert!(json.get("officeRentHT").is_some());
        assert!(json.get("netRentHT").is_some());
        assert_eq!(json["periodType"], "monthly");
        assert_eq!(json["periodStart"], "2024-01-01");
    }

    #[test]
    fn test_boundary_condition_serialization() {
        let json = serde_json::to_value(BoundaryCondition::IncentiveClamped { requested: 10.0, applied: 4.0 }).unwrap();
        assert_eq!(json["kind"], "incentiveClamped");
        assert_eq!(json["requested"], 10.0);
    }
}
