//! JSON IPC envelope
//!
//! Requests look like `{"command": "get_badges", "args": {...}}`; responses
//! are `{"status": "success", "data": ...}` or
//! `{"status": "error", "kind": ..., "message": ...}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::commands::{
    self, AchievementRequest, ChatRequest, HistoryRequest, IdRequest, NameRequest,
    PredictionRequest, SearchRequest, UserRequest,
};
use crate::{AppState, CommandError};

/// A decoded command with its arguments
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "snake_case")]
pub enum Request {
    Health,
    CalculatePrediction(PredictionRequest),
    GetPredictionHistory(HistoryRequest),
    GetPrediction(IdRequest),
    SearchLocations(SearchRequest),
    GetLocation(IdRequest),
    GetLocationByName(NameRequest),
    GetLocationEnergyData(IdRequest),
    GetBadges,
    GetUserBadges(UserRequest),
    GetUserProgress(UserRequest),
    CheckAchievements(AchievementRequest),
    SendChatMessage(ChatRequest),
    GetChatHistory(HistoryRequest),
    ClearChatHistory(UserRequest),
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::CalculatePrediction(_) => "calculate_prediction",
            Self::GetPredictionHistory(_) => "get_prediction_history",
            Self::GetPrediction(_) => "get_prediction",
            Self::SearchLocations(_) => "search_locations",
            Self::GetLocation(_) => "get_location",
            Self::GetLocationByName(_) => "get_location_by_name",
            Self::GetLocationEnergyData(_) => "get_location_energy_data",
            Self::GetBadges => "get_badges",
            Self::GetUserBadges(_) => "get_user_badges",
            Self::GetUserProgress(_) => "get_user_progress",
            Self::CheckAchievements(_) => "check_achievements",
            Self::SendChatMessage(_) => "send_chat_message",
            Self::GetChatHistory(_) => "get_chat_history",
            Self::ClearChatHistory(_) => "clear_chat_history",
        }
    }
}

/// Response envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Success { data: Value },
    Error { kind: &'static str, message: String },
}

impl Response {
    fn from_error(state: &AppState, error: &CommandError) -> Self {
        Self::Error {
            kind: error.kind(),
            message: error.public_message(state.config.environment),
        }
    }
}

fn to_data<T: Serialize>(value: T) -> Result<Value, CommandError> {
    serde_json::to_value(value).map_err(|e| CommandError::Internal(e.to_string()))
}

/// Run one command, returning its JSON payload
pub async fn execute(state: &AppState, request: Request) -> Result<Value, CommandError> {
    match request {
        Request::Health => to_data(commands::health(state).await?),
        Request::CalculatePrediction(req) => to_data(commands::calculate_prediction(state, req).await?),
        Request::GetPredictionHistory(req) => to_data(commands::get_prediction_history(state, req).await?),
        Request::GetPrediction(req) => to_data(commands::get_prediction(state, req).await?),
        Request::SearchLocations(req) => to_data(commands::search_locations(state, req).await?),
        Request::GetLocation(req) => to_data(commands::get_location(state, req).await?),
        Request::GetLocationByName(req) => to_data(commands::get_location_by_name(state, req).await?),
        Request::GetLocationEnergyData(req) => to_data(commands::get_location_energy_data(state, req).await?),
        Request::GetBadges => to_data(commands::get_badges(state).await?),
        Request::GetUserBadges(req) => to_data(commands::get_user_badges(state, req).await?),
        Request::GetUserProgress(req) => to_data(commands::get_user_progress(state, req).await?),
        Request::CheckAchievements(req) => to_data(commands::check_achievements(state, req).await?),
        Request::SendChatMessage(req) => to_data(commands::send_chat_message(state, req).await?),
        Request::GetChatHistory(req) => to_data(commands::get_chat_history(state, req).await?),
        Request::ClearChatHistory(req) => to_data(commands::clear_chat_history(state, req).await?),
    }
}

/// Run one command and wrap the outcome
pub async fn dispatch(state: &AppState, request: Request) -> Response {
    let name = request.name();
    tracing::debug!("Dispatching {}", name);

    match execute(state, request).await {
        Ok(data) => Response::Success { data },
        Err(error) => {
            tracing::warn!("{} failed: {}", name, error);
            Response::from_error(state, &error)
        }
    }
}

/// Decode one request line. Commands without arguments also accept `"args": {}`.
pub fn decode_request(line: &str) -> Result<Request, serde_json::Error> {
    let mut value: Value = serde_json::from_str(line)?;

    if let Some(envelope) = value.as_object_mut() {
        let empty_args = envelope
            .get("args")
            .and_then(Value::as_object)
            .is_some_and(|args| args.is_empty());
        if empty_args {
            envelope.remove("args");
        }
    }

    serde_json::from_value(value)
}

/// Decode a request line, dispatch it and encode the response
pub async fn handle_line(state: &AppState, line: &str) -> String {
    let response = match decode_request(line) {
        Ok(request) => dispatch(state, request).await,
        Err(e) => {
            tracing::warn!("Malformed request: {}", e);
            Response::Error {
                kind: "invalid_request",
                message: e.to_string(),
            }
        }
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        tracing::error!("Failed to encode response: {}", e);
        r#"{"status":"error","kind":"internal","message":"Failed to encode response"}"#.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_unit_command() {
        let request: Request = serde_json::from_str(r#"{"command":"get_badges"}"#).unwrap();
        assert_eq!(request.name(), "get_badges");
    }

    #[test]
    fn test_decode_command_with_args() {
        let request: Request = serde_json::from_str(
            r#"{"command":"calculate_prediction","args":{"usageHours":5.5,"applianceCount":3,"location":"New York"}}"#,
        )
        .unwrap();

        match request {
            Request::CalculatePrediction(req) => {
                assert_eq!(req.appliance_count, 3.0);
                assert!(req.user_id.is_none());
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_unit_command_accepts_empty_args() {
        let request = decode_request(r#"{"command":"get_badges","args":{}}"#).unwrap();
        assert_eq!(request.name(), "get_badges");

        let request = decode_request(r#"{"command":"health","args":null}"#).unwrap();
        assert_eq!(request.name(), "health");
    }

    #[test]
    fn test_empty_args_still_required_for_commands_with_fields() {
        assert!(decode_request(r#"{"command":"get_user_progress","args":{}}"#).is_err());
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(serde_json::from_str::<Request>(r#"{"command":"drop_tables"}"#).is_err());
    }

    #[test]
    fn test_response_envelope() {
        let ok = Response::Success { data: serde_json::json!([1, 2]) };
        assert_eq!(
            serde_json::to_string(&ok).unwrap(),
            r#"{"status":"success","data":[1,2]}"#
        );

        let err = Response::Error {
            kind: "not_found",
            message: "Location not found: x".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"status":"error","kind":"not_found","message":"Location not found: x"}"#
        );
    }
}
