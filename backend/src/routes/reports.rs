//! Report generation API route

use crate::error::ApiError;
use crate::services::report::{ReportOutcome, ReportService};
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use habit_coach_shared::types::ReportResponse;

/// Create report routes
pub fn report_routes() -> Router<AppState> {
    Router::new().route("/", post(generate_report))
}

/// POST /api/v1/reports - Run the report generator for the latest week
///
/// Failures after retries are a 200 with `generated: false`; only a
/// broken deployment (missing credential) is an HTTP error.
async fn generate_report(State(state): State<AppState>) -> Result<Json<ReportResponse>, ApiError> {
    let outcome = ReportService::generate(state.db(), state.http(), &state.config().llm).await?;

    let week_start = match &outcome {
        ReportOutcome::Generated { week_start } => Some(*week_start),
        _ => None,
    };

    Ok(Json(ReportResponse {
        generated: outcome.generated(),
        status: outcome.status_message().to_string(),
        week_start,
    }))
}
