//! Integration tests for the HTTP surface: daily check-ins, profile,
//! dashboard.

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use habit_coach_shared::weeks::week_dates;
use serde_json::{json, Value};

fn event_body(date: NaiveDate, steps: i64) -> String {
    json!({
        "date": date.to_string(),
        "sleep_hours": 7.0,
        "veggie_servings": 5,
        "high_fat_meals": 0,
        "water_ml": 1600,
        "exercise_minutes": 30,
        "steps": steps,
        "mood_score": 4,
        "screen_hours": 2.0,
        "alcohol": false,
        "caffeine": true
    })
    .to_string()
}

#[tokio::test]
async fn log_event_accepts_valid_checkin() {
    let app = common::TestApp::new().await;

    let (status, body) = app
        .post("/api/v1/events", &event_body(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(), 9000))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("2025-06-02"));
}

#[tokio::test]
async fn log_event_rejects_out_of_range_mood() {
    let app = common::TestApp::new().await;

    let body = json!({"date": "2025-06-02", "mood_score": 6}).to_string();
    let (status, response) = app.post("/api/v1/events", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response.contains("VALIDATION_ERROR"));
}

#[tokio::test]
async fn streak_endpoint_reports_month_shape() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get("/api/v1/events/streak").await;

    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["current_streak"], 0);
    assert!(parsed["days_in_month"].as_i64().unwrap() >= 28);
}

#[tokio::test]
async fn profile_is_missing_until_saved_then_shows_bmi() {
    let app = common::TestApp::new().await;

    let (status, _) = app.get("/api/v1/profile").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let profile = json!({
        "name": "Alex",
        "gender": "other",
        "age": 34,
        "height_cm": 175,
        "weight_kg": 70.0,
        "occupation": "engineer"
    })
    .to_string();
    let (status, body) = app.put("/api/v1/profile", &profile).await;
    assert_eq!(status, StatusCode::OK);

    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["bmi"], 22.9);
    assert_eq!(parsed["bmi_category"], "Normal/Healthy");

    // Saving again overwrites the singleton, never errors on conflict
    let (status, _) = app.put("/api/v1/profile", &profile).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn profile_rejects_unknown_gender() {
    let app = common::TestApp::new().await;

    let profile = json!({
        "name": "Alex",
        "gender": "robot",
        "age": 34,
        "height_cm": 175,
        "weight_kg": 70.0
    })
    .to_string();
    let (status, _) = app.put("/api/v1/profile", &profile).await;

    // serde rejects the enum value before the handler runs
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn dashboard_aggregates_complete_weeks_on_load() {
    let app = common::TestApp::new().await;
    let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();

    for day in week_dates(monday) {
        let (status, _) = app.post("/api/v1/events", &event_body(day, 8000)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app.get("/api/v1/dashboard").await;
    assert_eq!(status, StatusCode::OK);

    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["newly_processed"][0], "2025-06-02");
    assert_eq!(parsed["summaries"][0]["total_steps"], 56_000);
    assert_eq!(parsed["summaries"][0]["avg_sleep"], 7.0);

    // Second load: nothing new to process, same single summary
    let (_, body) = app.get("/api/v1/dashboard").await;
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["newly_processed"].as_array().unwrap().len(), 0);
    assert_eq!(parsed["summaries"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn dashboard_honors_weeks_limit() {
    let app = common::TestApp::new().await;

    // Two complete consecutive weeks
    for monday in [
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
    ] {
        for day in week_dates(monday) {
            app.post("/api/v1/events", &event_body(day, 8000)).await;
        }
    }

    let (status, body) = app.get("/api/v1/dashboard?weeks=1").await;
    assert_eq!(status, StatusCode::OK);

    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["newly_processed"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["summaries"].as_array().unwrap().len(), 1);
    // Newest week first
    assert_eq!(parsed["summaries"][0]["week_start"], "2025-06-09");
}
