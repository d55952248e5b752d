//! Profile API routes
//!
//! The profile is a singleton: GET returns it (404 until first save),
//! PUT overwrites it whole.

use crate::error::ApiError;
use crate::repositories::{ProfileRecord, ProfileRepository, UpsertProfile};
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use habit_coach_shared::health_metrics::{classify_bmi, display_bmi};
use habit_coach_shared::types::{Gender, ProfileResponse, SaveProfileRequest};
use validator::Validate;

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(save_profile))
}

/// GET /api/v1/profile - The saved profile with derived BMI
async fn get_profile(State(state): State<AppState>) -> Result<Json<ProfileResponse>, ApiError> {
    let record = ProfileRepository::get(state.db())
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("No profile saved yet".to_string()))?;

    Ok(Json(to_response(record)?))
}

/// PUT /api/v1/profile - Save (overwrite) the profile
async fn save_profile(
    State(state): State<AppState>,
    Json(req): Json<SaveProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let input = UpsertProfile {
        name: req.name,
        gender: req.gender.as_str().to_string(),
        age: req.age,
        height_cm: req.height_cm,
        weight_kg: req.weight_kg,
        occupation: req.occupation,
    };

    let record = ProfileRepository::upsert(state.db(), input)
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(to_response(record)?))
}

fn to_response(record: ProfileRecord) -> Result<ProfileResponse, ApiError> {
    let gender: Gender = record
        .gender
        .parse()
        .map_err(|e: String| ApiError::Internal(anyhow::anyhow!(e)))?;

    let bmi = display_bmi(record.weight_kg, record.height_cm as f64);
    let bmi_category = bmi.map(|b| classify_bmi(b).description().to_string());

    Ok(ProfileResponse {
        name: record.name,
        gender,
        age: record.age,
        height_cm: record.height_cm,
        weight_kg: record.weight_kg,
        occupation: record.occupation,
        bmi,
        bmi_category,
        updated_at: record.updated_at,
    })
}
