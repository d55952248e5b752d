//! Weekly coaching report schema
//!
//! The report generator asks the language model for a JSON-only reply,
//! but the reply must be treated as untrusted text: it can carry
//! surrounding commentary, markdown fences, or missing optional fields.
//! This module owns the full journey from raw model output to a trusted
//! `WeeklyReport`: locate the first balanced JSON object, decode it,
//! repair missing durations, then enforce the shape invariants.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on the report summary, in characters.
pub const MAX_SUMMARY_CHARS: usize = 200;

/// A report must carry exactly this many action items.
pub const REQUIRED_ACTION_ITEMS: usize = 3;

/// Duration assigned to an action item that names neither a period nor
/// an end date.
pub const DEFAULT_PERIOD_WEEKS: u32 = 4;

/// One coaching recommendation inside a weekly report.
///
/// Every item resolves to a duration: either `period_weeks` (nominally
/// 1-8, type-checked only) or a `by_date` end date. Items carrying
/// neither are repaired, not rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub goal: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_weeks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivation: Option<String>,
}

impl ActionItem {
    /// Whether the item already carries a resolvable duration.
    pub fn has_duration(&self) -> bool {
        self.period_weeks.is_some() || self.by_date.is_some()
    }
}

/// A validated weekly coaching report, serialized into
/// `weekly_summary.suggestions` on commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub summary: String,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
}

/// Why a raw model response failed to become a report.
#[derive(Debug, Error)]
pub enum ReportParseError {
    #[error("no JSON object found in model output")]
    NoJson,

    #[error("model output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected exactly {REQUIRED_ACTION_ITEMS} action items, got {0}")]
    WrongItemCount(usize),

    #[error("summary exceeds {MAX_SUMMARY_CHARS} characters (got {0})")]
    SummaryTooLong(usize),
}

impl WeeklyReport {
    /// Parse a raw model response into a validated report.
    ///
    /// Steps: extract the first balanced `{...}` span, decode it,
    /// repair missing durations, then check the shape invariants.
    /// Repair runs before validation so a missing duration is never a
    /// reason to discard an attempt.
    pub fn parse(raw: &str) -> Result<Self, ReportParseError> {
        let span = extract_json_object(raw).ok_or(ReportParseError::NoJson)?;
        let mut report: WeeklyReport = serde_json::from_str(span)?;
        report.apply_default_periods();
        report.validate()?;
        Ok(report)
    }

    /// Default `period_weeks` on every item missing both duration
    /// fields. Idempotent, safe to re-apply to an already valid report.
    pub fn apply_default_periods(&mut self) {
        for item in &mut self.action_items {
            if !item.has_duration() {
                item.period_weeks = Some(DEFAULT_PERIOD_WEEKS);
            }
        }
    }

    /// Enforce the shape invariants: exactly three action items and a
    /// bounded summary.
    pub fn validate(&self) -> Result<(), ReportParseError> {
        if self.action_items.len() != REQUIRED_ACTION_ITEMS {
            return Err(ReportParseError::WrongItemCount(self.action_items.len()));
        }
        let summary_chars = self.summary.chars().count();
        if summary_chars > MAX_SUMMARY_CHARS {
            return Err(ReportParseError::SummaryTooLong(summary_chars));
        }
        Ok(())
    }
}

/// Locate the first top-level balanced JSON object in free text.
///
/// The scanner tracks brace depth and string state (including escape
/// sequences), so nested objects and braces inside string values do not
/// confuse it, and trailing JSON-like spans are never over-captured.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if *byte == b'\\' {
                escaped = true;
            } else if *byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
