//! Savings estimation
//!
//! Derives a savings percentage from the appliance count and applies it to
//! the predicted bill.

use serde::Serialize;

use super::round_to;

/// Savings percentage every household starts from
pub const BASE_SAVINGS_PERCENT: f64 = 15.0;
/// Upper bound of the appliance-driven bonus, in percentage points
pub const MAX_EFFICIENCY_BONUS: f64 = 10.0;
/// Bonus points granted per ten appliances
pub const BONUS_PER_TEN_APPLIANCES: f64 = 5.0;

/// Rounded savings figures for a predicted bill
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsEstimate {
    /// Percentage, rounded to 1 decimal
    pub savings_percentage: f64,
    /// Currency, rounded to 2 decimals
    pub potential_savings: f64,
    /// Currency, rounded to 2 decimals
    pub optimized_bill: f64,
}

/// Bonus percentage points for the number of appliances.
/// More appliances means more room for optimization.
pub fn efficiency_bonus(appliance_count: u32) -> f64 {
    (appliance_count as f64 / 10.0 * BONUS_PER_TEN_APPLIANCES).min(MAX_EFFICIENCY_BONUS)
}

/// Savings percentage for the number of appliances, rounded to 1 decimal
pub fn savings_percentage(appliance_count: u32) -> f64 {
    round_to(BASE_SAVINGS_PERCENT + efficiency_bonus(appliance_count), 1)
}

/// Estimate savings against an already-rounded predicted bill.
///
/// `optimized_bill` is the difference of the two rounded currency values; the
/// final rounding only removes floating point noise from the subtraction.
pub fn estimate_savings(predicted_bill: f64, appliance_count: u32) -> SavingsEstimate {
    let savings_percentage = savings_percentage(appliance_count);
    let potential_savings = round_to(predicted_bill * savings_percentage / 100.0, 2);
    let optimized_bill = round_to(predicted_bill - potential_savings, 2);

    SavingsEstimate {
        savings_percentage,
        potential_savings,
        optimized_bill,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_efficiency_bonus_scales_with_appliances() {
        assert!((efficiency_bonus(1) - 0.5).abs() < 1e-9);
        assert!((efficiency_bonus(3) - 1.5).abs() < 1e-9);
        assert!((efficiency_bonus(10) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_efficiency_bonus_is_capped() {
        assert!((efficiency_bonus(20) - MAX_EFFICIENCY_BONUS).abs() < 1e-9);
        assert!((efficiency_bonus(500) - MAX_EFFICIENCY_BONUS).abs() < 1e-9);
    }

    #[test]
    fn test_savings_percentage_bounds() {
        for count in 1..=200 {
            let pct = savings_percentage(count);
            assert!(pct >= BASE_SAVINGS_PERCENT);
            assert!(pct <= BASE_SAVINGS_PERCENT + MAX_EFFICIENCY_BONUS);
        }
    }

    #[test]
    fn test_estimate_savings_new_york_scenario() {
        let savings = estimate_savings(9.90, 3);
        assert!((savings.savings_percentage - 16.5).abs() < 1e-9);
        // 9.90 * 16.5% = 1.6335 -> 1.63
        assert!((savings.potential_savings - 1.63).abs() < 1e-9);
        assert!((savings.optimized_bill - 8.27).abs() < 1e-9);
    }

    #[test]
    fn test_optimized_bill_is_difference_of_rounded_values() {
        for (bill, count) in [(9.90, 3), (123.45, 7), (0.99, 1), (310.2, 15), (47.13, 4)] {
            let savings = estimate_savings(bill, count);
            let expected = bill - savings.potential_savings;
            assert!((savings.optimized_bill - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_bill() {
        let savings = estimate_savings(0.0, 4);
        assert_eq!(savings.potential_savings, 0.0);
        assert_eq!(savings.optimized_bill, 0.0);
    }
}
