//! Request validation
//!
//! The calculation core assumes validated inputs; raw request values are
//! checked here before they reach it.

use thiserror::Error;

use crate::models::PredictionInput;

/// Longest accepted chat message, in characters
pub const MAX_CHAT_MESSAGE_CHARS: usize = 1000;

/// Usage hours are per day
pub const MAX_DAILY_USAGE_HOURS: f64 = 24.0;

/// Invalid request input
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check raw prediction values and build the core input.
///
/// `appliance_count` arrives as a JSON number and must be a positive integer.
pub fn validate_prediction(
    usage_hours: f64,
    appliance_count: f64,
    location: &str,
    user_id: Option<String>,
) -> Result<PredictionInput, ValidationError> {
    if !usage_hours.is_finite() || usage_hours <= 0.0 {
        return Err(ValidationError::new("usageHours", "Usage hours must be positive"));
    }

    if usage_hours > MAX_DAILY_USAGE_HOURS {
        return Err(ValidationError::new(
            "usageHours",
            "Usage hours cannot exceed 24 per day",
        ));
    }

    if !appliance_count.is_finite()
        || appliance_count <= 0.0
        || appliance_count.fract() != 0.0
        || appliance_count > u32::MAX as f64
    {
        return Err(ValidationError::new(
            "applianceCount",
            "Appliance count must be a positive integer",
        ));
    }

    if location.is_empty() {
        return Err(ValidationError::new("location", "Location is required"));
    }

    Ok(PredictionInput {
        usage_hours,
        appliance_count: appliance_count as u32,
        location: location.to_string(),
        user_id: normalize_user_id(user_id),
    })
}

/// Chat messages hold 1 to 1000 characters
pub fn validate_chat_message(message: &str) -> Result<(), ValidationError> {
    let chars = message.chars().count();
    if chars == 0 {
        return Err(ValidationError::new("message", "Message cannot be empty"));
    }
    if chars > MAX_CHAT_MESSAGE_CHARS {
        return Err(ValidationError::new("message", "Message too long"));
    }
    Ok(())
}

pub fn validate_search_query(query: &str) -> Result<(), ValidationError> {
    if query.trim().is_empty() {
        return Err(ValidationError::new("query", "Search query is required"));
    }
    Ok(())
}

/// Required user id for per-user queries
pub fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if user_id.trim().is_empty() {
        return Err(ValidationError::new("userId", "userId is required"));
    }
    Ok(())
}

/// Blank optional user ids are treated as absent
pub fn normalize_user_id(user_id: Option<String>) -> Option<String> {
    user_id.filter(|id| !id.trim().is_empty())
}

/// Explicit savings percentage for achievement checks
pub fn validate_savings_percentage(savings_percentage: f64) -> Result<(), ValidationError> {
    if !savings_percentage.is_finite() || savings_percentage < 0.0 {
        return Err(ValidationError::new(
            "savingsPercentage",
            "Savings percentage must be a non-negative number",
        ));
    }
    Ok(())
}
