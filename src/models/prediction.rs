//! Prediction data types
//!
//! Inputs to the bill estimation pipeline and the records it produces.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Validated inputs for a bill prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInput {
    /// Daily appliance usage in hours (> 0)
    pub usage_hours: f64,
    /// Number of appliances (> 0)
    pub appliance_count: u32,
    /// Free-text location, matched against the rate catalog
    pub location: String,
    pub user_id: Option<String>,
}

/// Output of the calculation pipeline, rounded for display and persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    #[serde(rename = "monthlyKWh")]
    pub monthly_kwh: f64,
    pub predicted_bill: f64,
    pub savings_percentage: f64,
    pub potential_savings: f64,
    pub optimized_bill: f64,
    /// At most five advisory strings, in rule priority order
    pub recommendations: Vec<String>,
}

/// Persisted prediction, immutable once written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub id: String,
    pub user_id: Option<String>,
    pub usage_hours: f64,
    pub appliance_count: u32,
    pub location: String,
    #[serde(flatten)]
    pub result: PredictionResult,
    /// RFC 3339 UTC timestamp
    pub created_at: String,
}

impl PredictionRecord {
    /// Create a record with a fresh id and the current timestamp
    pub fn new(input: &PredictionInput, result: PredictionResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: input.user_id.clone(),
            usage_hours: input.usage_hours,
            appliance_count: input.appliance_count,
            location: input.location.clone(),
            result,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
