//! Weekly summary repository
//!
//! One row per week, keyed by the Monday week-start date. The
//! aggregator's upsert names exactly the derived statistic columns, so
//! repeated aggregation can never touch `suggestions`; only
//! [`WeeklySummaryRepository::set_suggestions`] writes that column.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

/// Weekly summary record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeeklySummaryRecord {
    pub week_start: NaiveDate,
    pub avg_sleep: f64,
    pub total_steps: i64,
    pub mood_avg: f64,
    pub exercise_total: i64,
    pub veggie_avg: f64,
    pub water_total: i64,
    pub alcohol_days: i64,
    pub suggestions: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Derived statistics for one week, as written by the aggregator
#[derive(Debug, Clone, PartialEq)]
pub struct WeekStats {
    pub avg_sleep: f64,
    pub total_steps: i64,
    pub mood_avg: f64,
    pub exercise_total: i64,
    pub veggie_avg: f64,
    pub water_total: i64,
    pub alcohol_days: i64,
}

const SUMMARY_COLUMNS: &str = "week_start, avg_sleep, total_steps, mood_avg, exercise_total, \
                               veggie_avg, water_total, alcohol_days, suggestions, created_at";

/// Weekly summary repository
pub struct WeeklySummaryRepository;

impl WeeklySummaryRepository {
    /// Insert or refresh the derived statistics for a week.
    ///
    /// `suggestions` and `created_at` are absent from the conflict
    /// write set, so recomputation preserves both.
    pub async fn upsert_stats(
        pool: &SqlitePool,
        week_start: NaiveDate,
        stats: &WeekStats,
    ) -> Result<WeeklySummaryRecord> {
        let record = sqlx::query_as::<_, WeeklySummaryRecord>(&format!(
            r#"
            INSERT INTO weekly_summary (
                week_start, avg_sleep, total_steps, mood_avg,
                exercise_total, veggie_avg, water_total, alcohol_days, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(week_start) DO UPDATE SET
                avg_sleep = excluded.avg_sleep,
                total_steps = excluded.total_steps,
                mood_avg = excluded.mood_avg,
                exercise_total = excluded.exercise_total,
                veggie_avg = excluded.veggie_avg,
                water_total = excluded.water_total,
                alcohol_days = excluded.alcohol_days
            RETURNING {SUMMARY_COLUMNS}
            "#
        ))
        .bind(week_start)
        .bind(stats.avg_sleep)
        .bind(stats.total_steps)
        .bind(stats.mood_avg)
        .bind(stats.exercise_total)
        .bind(stats.veggie_avg)
        .bind(stats.water_total)
        .bind(stats.alcohol_days)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Week-starts that already have a summary row
    pub async fn existing_week_starts(pool: &SqlitePool) -> Result<Vec<NaiveDate>> {
        let rows: Vec<(NaiveDate,)> =
            sqlx::query_as("SELECT week_start FROM weekly_summary ORDER BY week_start")
                .fetch_all(pool)
                .await?;

        Ok(rows.into_iter().map(|(week_start,)| week_start).collect())
    }

    /// The most recent summary by week-start, if any
    pub async fn latest(pool: &SqlitePool) -> Result<Option<WeeklySummaryRecord>> {
        let record = sqlx::query_as::<_, WeeklySummaryRecord>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM weekly_summary ORDER BY week_start DESC LIMIT 1"
        ))
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// The most recent `limit` summaries, newest first
    pub async fn fetch_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<WeeklySummaryRecord>> {
        let records = sqlx::query_as::<_, WeeklySummaryRecord>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM weekly_summary ORDER BY week_start DESC LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// The summary for one week, if any
    pub async fn get_by_week(
        pool: &SqlitePool,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklySummaryRecord>> {
        let record = sqlx::query_as::<_, WeeklySummaryRecord>(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM weekly_summary WHERE week_start = ?"
        ))
        .bind(week_start)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Write the validated report JSON onto an existing summary row
    pub async fn set_suggestions(
        pool: &SqlitePool,
        week_start: NaiveDate,
        suggestions: &str,
    ) -> Result<bool> {
        let result = sqlx::query("UPDATE weekly_summary SET suggestions = ? WHERE week_start = ?")
            .bind(suggestions)
            .bind(week_start)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
