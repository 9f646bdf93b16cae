//! End-to-end command tests over the JSON envelope, backed by in-memory SQLite

use energysaver_lib::config::{AppConfig, Environment};
use energysaver_lib::db::Database;
use energysaver_lib::ipc::handle_line;
use energysaver_lib::AppState;
use serde_json::{json, Value};

fn sqlite_state() -> AppState {
    let db = Database::in_memory().unwrap();
    db.initialize().unwrap();
    AppState::with_seed(Box::new(db), AppConfig::default(), 5)
}

async fn call(state: &AppState, request: Value) -> Value {
    let line = handle_line(state, &request.to_string()).await;
    serde_json::from_str(&line).unwrap()
}

fn approx(value: &Value, expected: f64) -> bool {
    (value.as_f64().unwrap() - expected).abs() < 1e-9
}

#[tokio::test]
async fn test_health() {
    let state = sqlite_state();
    let response = call(&state, json!({"command": "health"})).await;

    assert_eq!(response["status"], "success");
    assert_eq!(response["data"]["status"], "ok");
    assert_eq!(response["data"]["environment"], "development");
}

#[tokio::test]
async fn test_prediction_flow_awards_badges_once() {
    let state = sqlite_state();
    let request = json!({
        "command": "calculate_prediction",
        "args": {"usageHours": 5.5, "applianceCount": 3, "location": "new york", "userId": "u1"}
    });

    let first = call(&state, request.clone()).await;
    assert_eq!(first["status"], "success");
    let data = &first["data"];
    assert!(approx(&data["monthlyKWh"], 49.5));
    assert!(approx(&data["predictedBill"], 9.9));
    assert!(approx(&data["savingsPercentage"], 16.5));
    assert!(approx(&data["potentialSavings"], 1.63));
    assert!(approx(&data["optimizedBill"], 8.27));
    assert_eq!(data["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(data["newBadges"].as_array().unwrap().len(), 3);

    let second = call(&state, request).await;
    assert!(second["data"]["newBadges"].as_array().unwrap().is_empty());

    let history = call(
        &state,
        json!({"command": "get_prediction_history", "args": {"userId": "u1"}}),
    )
    .await;
    let history = history["data"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["id"], second["data"]["id"]);

    let fetched = call(
        &state,
        json!({"command": "get_prediction", "args": {"id": first["data"]["id"]}}),
    )
    .await;
    assert_eq!(fetched["data"]["recommendations"], first["data"]["recommendations"]);
}

#[tokio::test]
async fn test_progress_after_predictions() {
    let state = sqlite_state();
    call(
        &state,
        json!({
            "command": "calculate_prediction",
            "args": {"usageHours": 4, "applianceCount": 30, "location": "Seattle", "userId": "u2"}
        }),
    )
    .await;

    let progress = call(
        &state,
        json!({"command": "get_user_progress", "args": {"userId": "u2"}}),
    )
    .await;
    let data = &progress["data"];
    assert!(approx(&data["currentSavings"], 25.0));
    assert_eq!(data["totalBadges"], 5);
    assert!(data["nextBadge"].is_null());

    let badges = call(
        &state,
        json!({"command": "get_user_badges", "args": {"userId": "u2"}}),
    )
    .await;
    let badges = badges["data"].as_array().unwrap();
    assert_eq!(badges.len(), 5);
    assert_eq!(badges[0]["name"], "Planet Protector");
    assert!(badges[0]["earnedAt"].is_string());
}

#[tokio::test]
async fn test_check_achievements() {
    let state = sqlite_state();
    let response = call(
        &state,
        json!({"command": "check_achievements", "args": {"userId": "u3", "savingsPercentage": 22}}),
    )
    .await;

    assert_eq!(response["data"]["count"], 4);
    let names: Vec<_> = response["data"]["newBadges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["Energy Novice", "Eco Warrior", "Green Champion", "Sustainability Master"]
    );
}

#[tokio::test]
async fn test_location_commands() {
    let state = sqlite_state();

    let search = call(
        &state,
        json!({"command": "search_locations", "args": {"query": "san"}}),
    )
    .await;
    assert_eq!(search["data"].as_array().unwrap().len(), 3);

    let missing = call(
        &state,
        json!({"command": "get_location", "args": {"id": "loc-atlantis"}}),
    )
    .await;
    assert_eq!(missing["status"], "error");
    assert_eq!(missing["kind"], "not_found");

    let by_name = call(
        &state,
        json!({"command": "get_location_by_name", "args": {"name": "Atlantis"}}),
    )
    .await;
    assert_eq!(by_name["status"], "success");
    assert!(by_name["data"].is_null());

    let energy = call(
        &state,
        json!({"command": "get_location_energy_data", "args": {"id": "loc-boston"}}),
    )
    .await;
    let data = &energy["data"];
    assert_eq!(data["location"]["name"], "Boston");
    assert!(approx(&data["estimatedMonthlyCosts"]["small"], 110.0));
    assert!(approx(&data["coordinates"]["latitude"], 42.3601));
}

#[tokio::test]
async fn test_chat_history_commands() {
    let state = sqlite_state();
    let reply = call(
        &state,
        json!({"command": "send_chat_message", "args": {"message": "Any solar advice?", "userId": "u4"}}),
    )
    .await;
    assert_eq!(reply["data"]["suggestions"].as_array().unwrap().len(), 2);

    let history = call(
        &state,
        json!({"command": "get_chat_history", "args": {"userId": "u4"}}),
    )
    .await;
    let history = history["data"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["role"], "user");
    assert_eq!(history[1]["role"], "assistant");
    assert_eq!(history[1]["content"], reply["data"]["message"]);

    let cleared = call(
        &state,
        json!({"command": "clear_chat_history", "args": {"userId": "u4"}}),
    )
    .await;
    assert_eq!(cleared["data"]["deleted"], 2);
}

#[tokio::test]
async fn test_validation_and_malformed_requests() {
    let state = sqlite_state();

    let invalid = call(
        &state,
        json!({"command": "send_chat_message", "args": {"message": ""}}),
    )
    .await;
    assert_eq!(invalid["kind"], "validation");

    let line = handle_line(&state, "not json").await;
    let malformed: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(malformed["status"], "error");
    assert_eq!(malformed["kind"], "invalid_request");
}

#[tokio::test]
async fn test_production_keeps_not_found_message() {
    let db = Database::in_memory().unwrap();
    db.initialize().unwrap();
    let config = AppConfig {
        environment: Environment::Production,
        ..AppConfig::default()
    };
    let state = AppState::with_seed(Box::new(db), config, 1);

    let response = call(
        &state,
        json!({"command": "get_prediction", "args": {"id": "nope"}}),
    )
    .await;
    assert_eq!(response["message"], "Prediction not found: nope");
}

#[tokio::test]
async fn test_unit_commands_accept_empty_args() {
    let state = sqlite_state();

    let badges = call(&state, json!({"command": "get_badges", "args": {}})).await;
    assert_eq!(badges["status"], "success");
    assert_eq!(badges["data"].as_array().unwrap().len(), 5);

    let health = call(&state, json!({"command": "health", "args": {}})).await;
    assert_eq!(health["data"]["status"], "ok");
}

#[tokio::test]
async fn test_oversized_usage_is_rejected_without_side_effects() {
    let state = sqlite_state();
    let response = call(
        &state,
        json!({
            "command": "calculate_prediction",
            "args": {"usageHours": 1e308, "applianceCount": 4000000000u64, "location": "Boston", "userId": "u5"}
        }),
    )
    .await;
    assert_eq!(response["status"], "error");
    assert_eq!(response["kind"], "validation");

    let progress = call(
        &state,
        json!({"command": "get_user_progress", "args": {"userId": "u5"}}),
    )
    .await;
    assert_eq!(progress["data"]["totalBadges"], 0);

    let history = call(
        &state,
        json!({"command": "get_prediction_history", "args": {"userId": "u5"}}),
    )
    .await;
    assert!(history["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_search_query_is_rejected() {
    let state = sqlite_state();
    let response = call(
        &state,
        json!({"command": "search_locations", "args": {"query": "   "}}),
    )
    .await;
    assert_eq!(response["status"], "error");
    assert_eq!(response["kind"], "validation");
}
