//! Recommendation types
//!
//! Data structures for the advisory tips attached to a prediction.

use serde::{Deserialize, Serialize};

/// Kind of energy-saving advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    /// Cut down daily usage hours
    UsageReduction,
    /// Unplug idle devices
    PhantomLoad,
    /// Switch to LED lighting
    Lighting,
    /// Adjust heating/cooling setpoints
    Thermostat,
    /// Group devices on switchable strips
    PowerStrip,
    /// Move to a renewable energy plan
    RenewablePlan,
    /// Shift heavy loads to off-peak hours
    OffPeak,
}

impl RecommendationType {
    /// Advisory text shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Self::UsageReduction => {
                "⏰ Reduce daily appliance usage by 2-3 hours to save up to 25% on your bill"
            }
            Self::PhantomLoad => {
                "🔌 Unplug devices when not in use - phantom power can account for 10% of your bill"
            }
            Self::Lighting => {
                "💡 Switch to LED bulbs - they use 75% less energy than incandescent bulbs"
            }
            Self::Thermostat => "🌡️ Adjust thermostat by 2°F to save 5-10% on heating/cooling costs",
            Self::PowerStrip => "📊 Use power strips to easily turn off multiple devices at once",
            Self::RenewablePlan => "☀️ Consider switching to a renewable energy plan in your area",
            Self::OffPeak => {
                "🔋 Run major appliances during off-peak hours if you have time-of-use pricing"
            }
        }
    }
}

/// A single recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub rec_type: RecommendationType,
    pub message: String,
}

impl Recommendation {
    pub fn new(rec_type: RecommendationType) -> Self {
        Self {
            rec_type,
            message: rec_type.message().to_string(),
        }
    }
}

/// Ordered recommendations for one prediction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationList {
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationList {
    /// Create a list, keeping rule order
    pub fn from_recommendations(recommendations: Vec<Recommendation>) -> Self {
        Self { recommendations }
    }

    /// Limit to the first N recommendations
    pub fn limit(mut self, n: usize) -> Self {
        self.recommendations.truncate(n);
        self
    }

    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    /// Recommendation types, in order
    pub fn types(&self) -> Vec<RecommendationType> {
        self.recommendations.iter().map(|r| r.rec_type).collect()
    }

    /// Advisory strings, in order
    pub fn into_messages(self) -> Vec<String> {
        self.recommendations.into_iter().map(|r| r.message).collect()
    }
}

/// Input data for generating recommendations
#[derive(Debug, Clone)]
pub struct RecommendationInput {
    /// Daily usage hours
    pub usage_hours: f64,
    /// Number of appliances
    pub appliance_count: u32,
    /// Unrounded monthly consumption in kWh
    pub monthly_kwh: f64,
    /// Renewable share at the location, `None` when the location is unknown
    pub renewable_percent: Option<f64>,
}
