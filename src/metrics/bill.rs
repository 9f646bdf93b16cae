//! Bill estimation
//!
//! Converts daily usage hours and appliance count into monthly consumption
//! and a predicted bill at a given rate.

use serde::Serialize;

use super::round_to;

/// Assumed average draw of one appliance, in watts
pub const AVG_APPLIANCE_WATTAGE: f64 = 100.0;
/// Billing month length, in days
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Typical monthly consumption for a 1-2 person household, in kWh
pub const SMALL_HOUSEHOLD_KWH: f64 = 500.0;
/// Typical monthly consumption for a 3-4 person household, in kWh
pub const MEDIUM_HOUSEHOLD_KWH: f64 = 900.0;
/// Typical monthly consumption for a 5+ person household, in kWh
pub const LARGE_HOUSEHOLD_KWH: f64 = 1200.0;

/// Unrounded monthly consumption and bill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillEstimate {
    pub monthly_kwh: f64,
    pub predicted_bill: f64,
}

impl BillEstimate {
    /// Consumption rounded to 2 decimals
    pub fn rounded_kwh(&self) -> f64 {
        round_to(self.monthly_kwh, 2)
    }

    /// Bill rounded to cents
    pub fn rounded_bill(&self) -> f64 {
        round_to(self.predicted_bill, 2)
    }
}

/// Monthly consumption in kWh
pub fn monthly_kwh(usage_hours: f64, appliance_count: u32) -> f64 {
    usage_hours * appliance_count as f64 * AVG_APPLIANCE_WATTAGE * DAYS_PER_MONTH / 1000.0
}

/// Estimate the monthly bill. Inputs are expected to be validated by the caller.
pub fn estimate_bill(usage_hours: f64, appliance_count: u32, rate: f64) -> BillEstimate {
    let monthly_kwh = monthly_kwh(usage_hours, appliance_count);

    BillEstimate {
        monthly_kwh,
        predicted_bill: monthly_kwh * rate,
    }
}

/// Estimated monthly cost by household size at a location's rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HouseholdCosts {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

impl HouseholdCosts {
    /// Costs at the given rate, rounded to cents
    pub fn at_rate(rate: f64) -> Self {
        Self {
            small: round_to(SMALL_HOUSEHOLD_KWH * rate, 2),
            medium: round_to(MEDIUM_HOUSEHOLD_KWH * rate, 2),
            large: round_to(LARGE_HOUSEHOLD_KWH * rate, 2),
        }
    }
}
