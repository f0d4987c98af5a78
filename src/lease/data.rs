//! Lease key terms as delivered by the extraction pipeline

use crate::error::{ScheduleError, ScheduleResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Billing cadence of the lease
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
}

impl PaymentFrequency {
    /// Number of billing periods in a year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Quarterly => 4,
        }
    }

    /// Number of calendar months covered by one full period
    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = ScheduleError;

    /// Accepts the English labels and the French ones found in extracted leases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "mensuel" | "mensuelle" => Ok(PaymentFrequency::Monthly),
            "quarterly" | "trimestriel" | "trimestrielle" => Ok(PaymentFrequency::Quarterly),
            _ => Err(ScheduleError::UnknownPaymentFrequency(s.to_string())),
        }
    }
}

impl TryFrom<String> for PaymentFrequency {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaymentFrequency> for String {
    fn from(value: PaymentFrequency) -> Self {
        value.as_str().to_string()
    }
}

/// A published index value and the date from which it applies to the lease
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexPoint {
    pub effective_date: NaiveDate,
    pub index_value: f64,
}

impl IndexPoint {
    pub fn new(effective_date: NaiveDate, index_value: f64) -> Self {
        Self { effective_date, index_value }
    }
}

/// Inputs of one rent schedule computation.
///
/// Amounts are tax-excluded (HT) and expressed per full billing period.
/// Optional components default to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInput {
    /// First day of the lease
    pub start_date: NaiveDate,

    /// Last day of the lease (inclusive)
    pub end_date: NaiveDate,

    pub payment_frequency: PaymentFrequency,

    /// Index value in effect at `start_date`
    pub base_index_value: f64,

    /// Known index revisions, in any order
    #[serde(default)]
    pub known_index_points: Vec<IndexPoint>,

    #[serde(rename = "officeRentHT", default)]
    pub office_rent_ht: Option<f64>,

    #[serde(rename = "parkingRentHT", default)]
    pub parking_rent_ht: Option<f64>,

    #[serde(rename = "chargesHT", default)]
    pub charges_ht: Option<f64>,

    #[serde(rename = "taxesHT", default)]
    pub taxes_ht: Option<f64>,

    #[serde(rename = "otherCostsHT", default)]
    pub other_costs_ht: Option<f64>,

    /// Annual growth of charges, taxes and other costs (0.02 = 2%)
    #[serde(default)]
    pub charges_growth_rate: Option<f64>,

    #[serde(default)]
    pub deposit_months: Option<f64>,

    /// Rent-free months at lease start
    #[serde(default)]
    pub franchise_months: Option<u32>,

    /// One-off reduction applied to the first period
    #[serde(default)]
    pub incentive_amount: Option<f64>,

    /// Projection length cap from `start_date`
    #[serde(default)]
    pub horizon_years: Option<u32>,
}

impl ScheduleInput {
    /// Create an input with the required terms and no rent components
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        payment_frequency: PaymentFrequency,
        base_index_value: f64,
    ) -> Self {
        Self {
            start_date,
            end_date,
            payment_frequency,
            base_index_value,
            known_index_points: Vec::new(),
            office_rent_ht: None,
            parking_rent_ht: None,
            charges_ht: None,
            taxes_ht: None,
            other_costs_ht: None,
            charges_growth_rate: None,
            deposit_months: None,
            franchise_months: None,
            incentive_amount: None,
            horizon_years: None,
        }
    }

    pub fn office_rent(&self) -> f64 {
        self.office_rent_ht.unwrap_or(0.0)
    }

    pub fn parking_rent(&self) -> f64 {
        self.parking_rent_ht.unwrap_or(0.0)
    }

    pub fn charges(&self) -> f64 {
        self.charges_ht.unwrap_or(0.0)
    }

    pub fn taxes(&self) -> f64 {
        self.taxes_ht.unwrap_or(0.0)
    }

    pub fn other_costs(&self) -> f64 {
        self.other_costs_ht.unwrap_or(0.0)
    }

    /// Indexed rent per full period (office + parking)
    pub fn base_rent(&self) -> f64 {
        self.office_rent() + self.parking_rent()
    }

    pub fn franchise(&self) -> u32 {
        self.franchise_months.unwrap_or(0)
    }

    pub fn incentive(&self) -> f64 {
        self.incentive_amount.unwrap_or(0.0)
    }

    pub fn deposit(&self) -> f64 {
        self.deposit_months.unwrap_or(0.0)
    }

    /// Reject inputs that cannot describe a lease.
    ///
    /// The date range is checked after horizon capping, in the period generator.
    pub fn validate(&self) -> ScheduleResult<()> {
        let amounts = [
            ("officeRentHT", self.office_rent_ht),
            ("parkingRentHT", self.parking_rent_ht),
            ("chargesHT", self.charges_ht),
            ("taxesHT", self.taxes_ht),
            ("otherCostsHT", self.other_costs_ht),
            ("depositMonths", self.deposit_months),
            ("incentiveAmount", self.incentive_amount),
        ];
        for (field, value) in amounts {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(ScheduleError::NonFiniteAmount { field, value });
                }
                if value < 0.0 {
                    return Err(ScheduleError::NegativeAmount { field, value });
                }
            }
        }

        // At -100% or below the compounded charges would vanish or turn negative
        if let Some(rate) = self.charges_growth_rate {
            if !rate.is_finite() || rate <= -1.0 {
                return Err(ScheduleError::InvalidGrowthRate(rate));
            }
        }

        if !(self.base_index_value > 0.0 && self.base_index_value.is_finite()) {
            return Err(ScheduleError::NonPositiveIndex {
                context: "baseIndexValue".to_string(),
                value: self.base_index_value,
            });
        }

        for point in &self.known_index_points {
            if !(point.index_value > 0.0 && point.index_value.is_finite()) {
                return Err(ScheduleError::NonPositiveIndex {
                    context: format!("index point {}", point.effective_date),
                    value: point.index_value,
                });
            }
        }

        if self.horizon_years == Some(0) {
            return Err(ScheduleError::InvalidHorizon(0));
        }

        Ok(())
    }
}
