//! Prompt assembly for the weekly coaching report
//!
//! The prompt has four parts: a fixed system instruction pinning the
//! JSON-only response shape, the user's profile rendered as a short
//! descriptive block (or a placeholder when none is saved), the week's
//! statistics as a markdown table, and fixed reference guideline
//! thresholds.

use crate::repositories::{ProfileRecord, WeeklySummaryRecord};
use habit_coach_shared::health_metrics::display_bmi;

/// System instruction demanding a JSON-only reply in the report shape
pub const SYSTEM_INSTRUCT: &str = r#"You are an energetic personal health coach. Based on the user's profile and this week's statistics, give feedback as a single valid JSON object (starting with { and ending with }, no ```json fences, no other text).

JSON structure:
{
  "summary": "second person, at most 200 characters, highlights and one improvement point, include 1 fitting emoji",
  "action_items": [
    {
      "goal": "short goal label",
      "target": "suggested target value",
      "period_weeks": 4,
      "motivation": "one short encouraging sentence ending with an emoji"
    }
  ]
}

Rules:
- exactly 3 action_items
- period_weeks is an integer between 1 and 8; alternatively give "by_date" as an ISO date (YYYY-MM-DD)
- reply with nothing but the JSON object"#;

/// Reference guideline thresholds included with every prompt
pub const GUIDELINES: &str = "\
- at least 150 minutes of moderate exercise per week
- at least 8,000 steps per day
- at least 5 servings of vegetables and fruit per day
- at least 1,500 ml of water per day
- 7-9 hours of sleep per night
- mood score of at least 4 out of 5";

/// Placeholder used when no profile has been saved
pub const NO_PROFILE_PLACEHOLDER: &str = "(the user has not filled in a profile)";

/// Render the profile as a short descriptive block, with BMI
pub fn personal_context(profile: &ProfileRecord) -> String {
    let bmi = display_bmi(profile.weight_kg, profile.height_cm as f64)
        .map(|b| b.to_string())
        .unwrap_or_else(|| "--".to_string());
    let occupation = profile.occupation.as_deref().unwrap_or("--");
    format!(
        "- Name: {}\n- Gender: {}  Age: {}\n- Height: {} cm  Weight: {} kg  BMI: {}\n- Occupation: {}",
        profile.name, profile.gender, profile.age, profile.height_cm, profile.weight_kg, bmi,
        occupation,
    )
}

/// Render the week's statistics as a markdown table
pub fn stats_table(summary: &WeeklySummaryRecord) -> String {
    format!(
        "| Metric | Value |\n|--------|-------|\n\
         | Average sleep (h) | {:.1} |\n\
         | Total steps | {} |\n\
         | Average mood | {:.1} |\n\
         | Exercise (min) | {} |\n\
         | Veggie servings per day | {:.1} |\n\
         | Total water (ml) | {} |\n\
         | Days with alcohol | {} |\n",
        summary.avg_sleep,
        summary.total_steps,
        summary.mood_avg,
        summary.exercise_total,
        summary.veggie_avg,
        summary.water_total,
        summary.alcohol_days,
    )
}

/// Assemble the user message from profile, statistics and guidelines
pub fn build_user_prompt(
    summary: &WeeklySummaryRecord,
    profile: Option<&ProfileRecord>,
) -> String {
    let personal = profile
        .map(personal_context)
        .unwrap_or_else(|| NO_PROFILE_PLACEHOLDER.to_string());

    format!(
        "## Profile\n{personal}\n\n## This week's statistics\n{stats}\n## WHO guidelines\n{GUIDELINES}\n",
        stats = stats_table(summary),
    )
}
