//! Recommendation engine
//!
//! Evaluates fixed threshold rules in priority order and keeps the first
//! `MAX_RECOMMENDATIONS` tips. Output depends only on the input.

use super::types::{Recommendation, RecommendationInput, RecommendationList, RecommendationType};

/// Maximum number of tips attached to a prediction
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Thresholds for recommendation triggers
mod thresholds {
    /// Daily usage hours above this trigger the usage-reduction tip
    pub const HIGH_USAGE_HOURS: f64 = 8.0;
    /// Appliance counts above this trigger the phantom-load tip
    pub const MANY_APPLIANCES: u32 = 5;
    /// Monthly kWh above this trigger the lighting and thermostat tips
    pub const HIGH_MONTHLY_KWH: f64 = 300.0;
    /// Renewable share below this triggers the renewable-plan tip
    pub const LOW_RENEWABLE_PERCENT: f64 = 30.0;
}

/// Generate recommendations for a prediction
pub fn generate_recommendations(input: &RecommendationInput) -> RecommendationList {
    let mut recommendations = Vec::new();

    // Check usage hours
    if let Some(rec) = check_usage_hours(input) {
        recommendations.push(rec);
    }

    // Check appliance count
    if let Some(rec) = check_appliance_count(input) {
        recommendations.push(rec);
    }

    // Check consumption (two tips)
    recommendations.extend(check_consumption(input));

    recommendations.push(Recommendation::new(RecommendationType::PowerStrip));

    // Check renewable mix
    if let Some(rec) = check_renewable_mix(input) {
        recommendations.push(rec);
    }

    recommendations.push(Recommendation::new(RecommendationType::OffPeak));

    RecommendationList::from_recommendations(recommendations).limit(MAX_RECOMMENDATIONS)
}

fn check_usage_hours(input: &RecommendationInput) -> Option<Recommendation> {
    if input.usage_hours <= thresholds::HIGH_USAGE_HOURS {
        return None;
    }
    Some(Recommendation::new(RecommendationType::UsageReduction))
}

fn check_appliance_count(input: &RecommendationInput) -> Option<Recommendation> {
    if input.appliance_count <= thresholds::MANY_APPLIANCES {
        return None;
    }
    Some(Recommendation::new(RecommendationType::PhantomLoad))
}

fn check_consumption(input: &RecommendationInput) -> Vec<Recommendation> {
    if input.monthly_kwh <= thresholds::HIGH_MONTHLY_KWH {
        return Vec::new();
    }
    vec![
        Recommendation::new(RecommendationType::Lighting),
        Recommendation::new(RecommendationType::Thermostat),
    ]
}

/// Unknown locations carry no renewable data and never trigger this tip
fn check_renewable_mix(input: &RecommendationInput) -> Option<Recommendation> {
    let renewable = input.renewable_percent?;

    if renewable >= thresholds::LOW_RENEWABLE_PERCENT {
        return None;
    }
    Some(Recommendation::new(RecommendationType::RenewablePlan))
}
