//! Daily check-in API routes

use crate::error::ApiError;
use crate::repositories::{EventRepository, UpsertEvent};
use crate::services::streak::StreakService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use habit_coach_shared::types::{LogEventRequest, LogEventResponse, StreakResponse};
use validator::Validate;

/// Create event routes
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_event))
        .route("/streak", get(get_streak))
}

/// POST /api/v1/events - Upsert the daily check-in for a date
async fn log_event(
    State(state): State<AppState>,
    Json(req): Json<LogEventRequest>,
) -> Result<Json<LogEventResponse>, ApiError> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let input = UpsertEvent {
        date: req.date,
        sleep_hours: req.sleep_hours,
        sleep_start: req.sleep_start,
        sleep_end: req.sleep_end,
        veggie_servings: req.veggie_servings,
        high_fat_meals: req.high_fat_meals,
        water_ml: req.water_ml,
        exercise_minutes: req.exercise_minutes,
        steps: req.steps,
        mood_score: req.mood_score,
        mood_note: req.mood_note,
        screen_hours: req.screen_hours,
        alcohol: req.alcohol,
        caffeine: req.caffeine,
    };

    let record = EventRepository::upsert(state.db(), input)
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(LogEventResponse {
        date: record.date,
        created_at: record.created_at,
    }))
}

/// GET /api/v1/events/streak - Check-in streak statistics
async fn get_streak(State(state): State<AppState>) -> Result<Json<StreakResponse>, ApiError> {
    let stats = StreakService::stats(state.db(), Utc::now().date_naive()).await?;

    Ok(Json(StreakResponse {
        current_streak: stats.current_streak,
        days_in_month: stats.days_in_month,
        days_filled: stats.days_filled,
    }))
}
