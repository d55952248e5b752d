//! Dashboard API route
//!
//! Loading the dashboard first aggregates any complete-but-unprocessed
//! weeks, then returns the most recent weekly summaries with their
//! parsed coaching reports.

use crate::error::ApiError;
use crate::repositories::{WeeklySummaryRecord, WeeklySummaryRepository};
use crate::services::aggregation::AggregationService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use habit_coach_shared::report::WeeklyReport;
use habit_coach_shared::types::{DashboardQuery, DashboardResponse, WeeklySummaryView};

/// Default number of recent weeks shown on the dashboard
const DEFAULT_WEEKS: u32 = 4;

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

/// GET /api/v1/dashboard - Aggregate unprocessed weeks and return recent summaries
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let newly_processed = AggregationService::aggregate_unprocessed_weeks(state.db()).await?;

    let limit = query.weeks.unwrap_or(DEFAULT_WEEKS).clamp(1, 52) as i64;
    let summaries = WeeklySummaryRepository::fetch_recent(state.db(), limit)
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(DashboardResponse {
        newly_processed,
        summaries: summaries.into_iter().map(to_view).collect(),
    }))
}

fn to_view(record: WeeklySummaryRecord) -> WeeklySummaryView {
    // Stored suggestions are the canonical serialization of a validated
    // report; anything unparseable is simply not shown.
    let suggestions = record
        .suggestions
        .as_deref()
        .and_then(|s| serde_json::from_str::<WeeklyReport>(s).ok());

    WeeklySummaryView {
        week_start: record.week_start,
        avg_sleep: record.avg_sleep,
        total_steps: record.total_steps,
        mood_avg: record.mood_avg,
        exercise_total: record.exercise_total,
        veggie_avg: record.veggie_avg,
        water_total: record.water_total,
        alcohol_days: record.alcohol_days,
        suggestions,
        created_at: record.created_at,
    }
}
