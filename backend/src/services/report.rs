//! Weekly report generation service
//!
//! State machine per invocation: fetch the latest weekly summary,
//! assemble the prompt once, then up to [`RETRY_LIMIT`] attempts of
//! call-model → extract/repair/validate. A validated report is
//! committed onto the summary row's `suggestions` column; a failed run
//! leaves the prior value untouched and is reported as a status, not
//! raised as an error.

use crate::config::LlmConfig;
use crate::error::ApiError;
use crate::llm::{ChatClient, LlmError};
use crate::repositories::{ProfileRepository, WeeklySummaryRepository};
use crate::services::prompts;
use chrono::NaiveDate;
use habit_coach_shared::report::{ReportParseError, WeeklyReport};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Total attempts per invocation (the prompt is reused across retries)
pub const RETRY_LIMIT: u32 = 2;

/// How one report-generation run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// A validated report was committed for this week
    Generated { week_start: NaiveDate },
    /// There is no weekly summary to report on yet
    NoSummary,
    /// All attempts failed; any prior suggestions are untouched
    Failed,
}

impl ReportOutcome {
    pub fn generated(&self) -> bool {
        matches!(self, ReportOutcome::Generated { .. })
    }

    pub fn status_message(&self) -> &'static str {
        match self {
            ReportOutcome::Generated { .. } => "weekly report generated",
            ReportOutcome::NoSummary => "no weekly summary to report on yet",
            ReportOutcome::Failed => "report generation failed, please try again",
        }
    }
}

/// Why a single attempt was discarded
#[derive(Debug, Error)]
enum AttemptError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("invalid model output: {0}")]
    Invalid(#[from] ReportParseError),
}

/// Weekly report generation service
pub struct ReportService;

impl ReportService {
    /// Run the report state machine for the most recent weekly summary.
    ///
    /// A missing credential is a configuration error and surfaces as
    /// `Err` before any network attempt; transport, service and
    /// validation failures are consumed by the retry budget and end in
    /// `Ok(ReportOutcome::Failed)`.
    pub async fn generate(
        pool: &SqlitePool,
        http: &reqwest::Client,
        config: &LlmConfig,
    ) -> Result<ReportOutcome, ApiError> {
        let Some(summary) = WeeklySummaryRepository::latest(pool)
            .await
            .map_err(ApiError::Internal)?
        else {
            debug!("no weekly summary row, nothing to report on");
            return Ok(ReportOutcome::NoSummary);
        };

        let profile = ProfileRepository::get(pool).await.map_err(ApiError::Internal)?;
        let prompt = prompts::build_user_prompt(&summary, profile.as_ref());

        let client = ChatClient::from_config(http.clone(), config)
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        for attempt in 1..=RETRY_LIMIT {
            match Self::attempt(&client, &prompt).await {
                Ok(report_json) => {
                    WeeklySummaryRepository::set_suggestions(pool, summary.week_start, &report_json)
                        .await
                        .map_err(ApiError::Internal)?;
                    info!(week_start = %summary.week_start, "weekly report saved");
                    return Ok(ReportOutcome::Generated {
                        week_start: summary.week_start,
                    });
                }
                Err(err) => {
                    warn!(
                        attempt,
                        limit = RETRY_LIMIT,
                        error = %err,
                        "report generation attempt failed"
                    );
                }
            }
        }

        Ok(ReportOutcome::Failed)
    }

    /// One call-model, extract, repair, validate cycle.
    ///
    /// Returns the canonical JSON of the validated report, not the raw
    /// model text.
    async fn attempt(client: &ChatClient, prompt: &str) -> Result<String, AttemptError> {
        let raw = client.complete(Some(prompts::SYSTEM_INSTRUCT), prompt).await?;
        let report = WeeklyReport::parse(&raw)?;
        Ok(serde_json::to_string(&report).map_err(ReportParseError::from)?)
    }
}
