//! API request and response types

use crate::report::WeeklyReport;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Gender as stored on the singleton profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!("unknown gender: {s}")),
        }
    }
}

/// Daily check-in payload — one record per calendar date, upsert
/// semantics (re-submitting a date overwrites the previous record).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogEventRequest {
    pub date: NaiveDate,
    #[validate(range(min = 0.0, max = 24.0))]
    pub sleep_hours: Option<f64>,
    pub sleep_start: Option<NaiveTime>,
    pub sleep_end: Option<NaiveTime>,
    #[validate(range(min = 0, max = 30))]
    pub veggie_servings: Option<i64>,
    #[validate(range(min = 0, max = 30))]
    pub high_fat_meals: Option<i64>,
    #[validate(range(min = 0, max = 20000))]
    pub water_ml: Option<i64>,
    #[validate(range(min = 0, max = 1440))]
    pub exercise_minutes: Option<i64>,
    #[validate(range(min = 0, max = 200_000))]
    pub steps: Option<i64>,
    #[validate(range(min = 1, max = 5))]
    pub mood_score: Option<i64>,
    #[validate(length(max = 2000))]
    pub mood_note: Option<String>,
    #[validate(range(min = 0.0, max = 24.0))]
    pub screen_hours: Option<f64>,
    #[serde(default)]
    pub alcohol: bool,
    #[serde(default)]
    pub caffeine: bool,
}

/// Response after upserting a daily event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEventResponse {
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Check-in streak statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakResponse {
    /// Consecutive logged days ending today
    pub current_streak: i64,
    /// Days in the current calendar month
    pub days_in_month: i64,
    /// Logged days within the current calendar month
    pub days_filled: i64,
}

/// Query parameters for the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// How many recent weekly summaries to return (default 4)
    pub weeks: Option<u32>,
}

/// One weekly summary as shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySummaryView {
    pub week_start: NaiveDate,
    pub avg_sleep: f64,
    pub total_steps: i64,
    pub mood_avg: f64,
    pub exercise_total: i64,
    pub veggie_avg: f64,
    pub water_total: i64,
    pub alcohol_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<WeeklyReport>,
    pub created_at: DateTime<Utc>,
}

/// Dashboard payload: aggregation result plus recent summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Week-starts newly aggregated by this request
    pub newly_processed: Vec<NaiveDate>,
    pub summaries: Vec<WeeklySummaryView>,
}

/// Outcome of a report-generation request.
///
/// Failures here are plain status payloads, not HTTP errors: an
/// exhausted retry budget or a missing summary is reported, not raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub generated: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_start: Option<NaiveDate>,
}

/// Profile save payload (overwrites the singleton row)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub gender: Gender,
    #[validate(range(min = 1, max = 120))]
    pub age: i64,
    #[validate(range(min = 50, max = 260))]
    pub height_cm: i64,
    #[validate(range(min = 10.0, max = 400.0))]
    pub weight_kg: f64,
    #[validate(length(max = 100))]
    pub occupation: Option<String>,
}

/// Profile as displayed, with derived BMI when computable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub name: String,
    pub gender: Gender,
    pub age: i64,
    pub height_cm: i64,
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi_category: Option<String>,
    pub updated_at: DateTime<Utc>,
}
