//! Command handlers
//!
//! Every operation exposed to the frontend. Handlers validate raw requests,
//! run the calculation core and talk to the injected store.

use serde::{Deserialize, Serialize};

use crate::chat::{self, ChatReply};
use crate::gamification::{award_badges, user_progress};
use crate::metrics::{self, rate, HouseholdCosts};
use crate::models::{
    Badge, BadgeProgress, ChatMessage, ChatRole, EarnedBadge, LocationRate, PredictionRecord,
};
use crate::validation;
use crate::AppState;
use crate::CommandError;

/// Maximum number of location search results
pub const MAX_SEARCH_RESULTS: usize = 10;

// ============================================================================
// Request DTOs
// ============================================================================

/// Raw prediction request. `applianceCount` is validated as an integer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub usage_hours: f64,
    pub appliance_count: f64,
    pub location: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest {
    pub user_id: String,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdRequest {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementRequest {
    pub user_id: String,
    pub savings_percentage: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

// ============================================================================
// Response DTOs for Frontend
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub environment: &'static str,
}

/// Stored prediction plus any badges it unlocked
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    #[serde(flatten)]
    pub prediction: PredictionRecord,
    pub new_badges: Vec<Badge>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementResponse {
    pub new_badges: Vec<Badge>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationSummary {
    pub name: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Rate, renewable mix and household cost estimates for one location
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEnergyData {
    pub location: LocationSummary,
    pub energy_rate: f64,
    pub renewable_percent: f64,
    pub estimated_monthly_costs: HouseholdCosts,
    /// `null` unless both latitude and longitude are known
    pub coordinates: Option<Coordinates>,
}

impl From<&LocationRate> for LocationEnergyData {
    fn from(location: &LocationRate) -> Self {
        Self {
            location: LocationSummary {
                name: location.name.clone(),
                state: location.state.clone(),
                country: location.country.clone(),
            },
            energy_rate: location.energy_rate,
            renewable_percent: location.renewable_percent,
            estimated_monthly_costs: HouseholdCosts::at_rate(location.energy_rate),
            coordinates: location
                .coordinates()
                .map(|(latitude, longitude)| Coordinates { latitude, longitude }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub success: bool,
    pub deleted: usize,
}

// ============================================================================
// Utility Commands
// ============================================================================

pub async fn health(state: &AppState) -> Result<HealthResponse, CommandError> {
    Ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        environment: state.config.environment.as_str(),
    })
}

// ============================================================================
// Prediction Commands
// ============================================================================

/// Estimate a bill, persist it and award any badges it unlocks
pub async fn calculate_prediction(
    state: &AppState,
    request: PredictionRequest,
) -> Result<PredictionResponse, CommandError> {
    let input = validation::validate_prediction(
        request.usage_hours,
        request.appliance_count,
        &request.location,
        request.user_id,
    )
    .inspect_err(|e| tracing::warn!("Rejected prediction request: {}", e))?;

    let catalog = state.store.locations()?;
    let rate = rate::lookup_rate(&catalog, &input.location);
    let result = metrics::calculate_prediction(&input, &rate);

    let record = PredictionRecord::new(&input, result);
    state.store.insert_prediction(&record).map_err(|e| {
        tracing::error!("Failed to store prediction: {}", e);
        e
    })?;

    tracing::debug!(
        "Prediction {} for {:?}: {:.2} kWh, ${:.2}",
        record.id,
        input.location,
        record.result.monthly_kwh,
        record.result.predicted_bill
    );

    let new_badges = match &input.user_id {
        Some(user_id) => award_badges(&*state.store, user_id, record.result.savings_percentage)?,
        None => Vec::new(),
    };

    Ok(PredictionResponse {
        prediction: record,
        new_badges,
    })
}

/// A user's predictions, newest first
pub async fn get_prediction_history(
    state: &AppState,
    request: HistoryRequest,
) -> Result<Vec<PredictionRecord>, CommandError> {
    validation::validate_user_id(&request.user_id)?;
    let limit = request.limit.unwrap_or(state.config.history_limit);

    Ok(state.store.prediction_history(&request.user_id, limit)?)
}

pub async fn get_prediction(state: &AppState, request: IdRequest) -> Result<PredictionRecord, CommandError> {
    state
        .store
        .prediction_by_id(&request.id)?
        .ok_or_else(|| CommandError::not_found("Prediction", &request.id))
}

// ============================================================================
// Location Commands
// ============================================================================

/// Locations whose name or state contains the query
pub async fn search_locations(
    state: &AppState,
    request: SearchRequest,
) -> Result<Vec<LocationRate>, CommandError> {
    validation::validate_search_query(&request.query)?;
    let catalog = state.store.locations()?;

    Ok(rate::search_locations(&catalog, &request.query, MAX_SEARCH_RESULTS))
}

pub async fn get_location(state: &AppState, request: IdRequest) -> Result<LocationRate, CommandError> {
    state
        .store
        .location_by_id(&request.id)?
        .ok_or_else(|| CommandError::not_found("Location", &request.id))
}

/// Exact name lookup; an unknown name is `None`, not an error
pub async fn get_location_by_name(
    state: &AppState,
    request: NameRequest,
) -> Result<Option<LocationRate>, CommandError> {
    let catalog = state.store.locations()?;
    Ok(rate::find_by_name(&catalog, &request.name).cloned())
}

pub async fn get_location_energy_data(
    state: &AppState,
    request: IdRequest,
) -> Result<LocationEnergyData, CommandError> {
    let location = get_location(state, request).await?;
    Ok(LocationEnergyData::from(&location))
}

// ============================================================================
// Gamification Commands
// ============================================================================

/// The badge catalog, ascending by requirement
pub async fn get_badges(state: &AppState) -> Result<Vec<Badge>, CommandError> {
    Ok(state.store.badges()?)
}

pub async fn get_user_badges(state: &AppState, request: UserRequest) -> Result<Vec<EarnedBadge>, CommandError> {
    validation::validate_user_id(&request.user_id)?;
    Ok(state.store.user_badges(&request.user_id)?)
}

pub async fn get_user_progress(state: &AppState, request: UserRequest) -> Result<BadgeProgress, CommandError> {
    validation::validate_user_id(&request.user_id)?;
    Ok(user_progress(&*state.store, &request.user_id)?)
}

/// Award badges for an explicit savings percentage
pub async fn check_achievements(
    state: &AppState,
    request: AchievementRequest,
) -> Result<AchievementResponse, CommandError> {
    validation::validate_user_id(&request.user_id)?;
    validation::validate_savings_percentage(request.savings_percentage)?;

    let new_badges = award_badges(&*state.store, &request.user_id, request.savings_percentage)?;
    Ok(AchievementResponse {
        count: new_badges.len(),
        new_badges,
    })
}

// ============================================================================
// Chat Commands
// ============================================================================

/// Store the user's message, answer it and store the answer
pub async fn send_chat_message(state: &AppState, request: ChatRequest) -> Result<ChatReply, CommandError> {
    validation::validate_chat_message(&request.message)?;
    let user_id = validation::normalize_user_id(request.user_id);

    state
        .store
        .insert_chat_message(&ChatMessage::new(user_id.clone(), ChatRole::User, request.message.clone()))?;

    let reply = {
        let mut rng = state
            .rng
            .lock()
            .map_err(|_| CommandError::Internal("Chat RNG lock poisoned".to_string()))?;
        chat::reply(&request.message, &mut *rng)
    };

    state
        .store
        .insert_chat_message(&ChatMessage::new(user_id, ChatRole::Assistant, reply.message.clone()))?;

    Ok(reply)
}

/// A user's chat history, oldest first
pub async fn get_chat_history(state: &AppState, request: HistoryRequest) -> Result<Vec<ChatMessage>, CommandError> {
    validation::validate_user_id(&request.user_id)?;
    let limit = request.limit.unwrap_or(state.config.chat_history_limit);

    Ok(state.store.chat_history(&request.user_id, limit)?)
}

pub async fn clear_chat_history(state: &AppState, request: UserRequest) -> Result<ClearResponse, CommandError> {
    validation::validate_user_id(&request.user_id)?;
    let deleted = state.store.clear_chat_history(&request.user_id)?;

    tracing::info!("Cleared {} chat message(s) for {}", deleted, request.user_id);
    Ok(ClearResponse { success: true, deleted })
}
