//! Metrics calculation module
//!
//! The deterministic bill pipeline:
//! - Rate lookup against the location catalog
//! - Monthly consumption and bill estimation
//! - Savings estimation
//! - Recommendation generation (see `crate::recommendations`)

pub mod bill;
pub mod rate;
pub mod savings;

use crate::models::{PredictionInput, PredictionResult};
use crate::recommendations::{generate_recommendations, RecommendationInput};

pub use bill::{estimate_bill, BillEstimate, HouseholdCosts};
pub use rate::{lookup_rate, RateLookup, DEFAULT_ENERGY_RATE};
pub use savings::{estimate_savings, SavingsEstimate};

/// Round to a fixed number of decimal places, half away from zero
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Run the bill pipeline for a validated input and a resolved rate.
///
/// The unrounded consumption feeds the bill; the bill is rounded to cents
/// before the savings stage, so the persisted figures are consistent with
/// each other.
pub fn calculate_prediction(input: &PredictionInput, rate: &RateLookup) -> PredictionResult {
    let bill = estimate_bill(input.usage_hours, input.appliance_count, rate.energy_rate);
    let predicted_bill = bill.rounded_bill();
    let savings = estimate_savings(predicted_bill, input.appliance_count);

    let recommendations = generate_recommendations(&RecommendationInput {
        usage_hours: input.usage_hours,
        appliance_count: input.appliance_count,
        monthly_kwh: bill.monthly_kwh,
        renewable_percent: rate.renewable_percent,
    });

    PredictionResult {
        monthly_kwh: bill.rounded_kwh(),
        predicted_bill,
        savings_percentage: savings.savings_percentage,
        potential_savings: savings.potential_savings,
        optimized_bill: savings.optimized_bill,
        recommendations: recommendations.into_messages(),
    }
}
