//! Daily event repository
//!
//! One row per calendar date, keyed by the date itself. Re-submitting a
//! date overwrites the prior record in place (upsert), never duplicates.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use habit_coach_shared::weeks::DAYS_PER_WEEK;
use sqlx::SqlitePool;

/// Daily event record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRecord {
    pub date: NaiveDate,
    pub sleep_hours: Option<f64>,
    pub sleep_start: Option<NaiveTime>,
    pub sleep_end: Option<NaiveTime>,
    pub veggie_servings: Option<i64>,
    pub high_fat_meals: Option<i64>,
    pub water_ml: Option<i64>,
    pub exercise_minutes: Option<i64>,
    pub steps: Option<i64>,
    pub mood_score: Option<i64>,
    pub mood_note: Option<String>,
    pub screen_hours: Option<f64>,
    pub alcohol: bool,
    pub caffeine: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for upserting a daily event
#[derive(Debug, Clone)]
pub struct UpsertEvent {
    pub date: NaiveDate,
    pub sleep_hours: Option<f64>,
    pub sleep_start: Option<NaiveTime>,
    pub sleep_end: Option<NaiveTime>,
    pub veggie_servings: Option<i64>,
    pub high_fat_meals: Option<i64>,
    pub water_ml: Option<i64>,
    pub exercise_minutes: Option<i64>,
    pub steps: Option<i64>,
    pub mood_score: Option<i64>,
    pub mood_note: Option<String>,
    pub screen_hours: Option<f64>,
    pub alcohol: bool,
    pub caffeine: bool,
}

const EVENT_COLUMNS: &str = "date, sleep_hours, sleep_start, sleep_end, veggie_servings, \
                             high_fat_meals, water_ml, exercise_minutes, steps, mood_score, \
                             mood_note, screen_hours, alcohol, caffeine, created_at";

/// Daily event repository
pub struct EventRepository;

impl EventRepository {
    /// Insert or overwrite the record for a calendar date.
    ///
    /// The conflict clause rewrites every data column but preserves the
    /// original `created_at`.
    pub async fn upsert(pool: &SqlitePool, input: UpsertEvent) -> Result<EventRecord> {
        let record = sqlx::query_as::<_, EventRecord>(&format!(
            r#"
            INSERT INTO events ({EVENT_COLUMNS})
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(date) DO UPDATE SET
                sleep_hours = excluded.sleep_hours,
                sleep_start = excluded.sleep_start,
                sleep_end = excluded.sleep_end,
                veggie_servings = excluded.veggie_servings,
                high_fat_meals = excluded.high_fat_meals,
                water_ml = excluded.water_ml,
                exercise_minutes = excluded.exercise_minutes,
                steps = excluded.steps,
                mood_score = excluded.mood_score,
                mood_note = excluded.mood_note,
                screen_hours = excluded.screen_hours,
                alcohol = excluded.alcohol,
                caffeine = excluded.caffeine
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(input.date)
        .bind(input.sleep_hours)
        .bind(input.sleep_start)
        .bind(input.sleep_end)
        .bind(input.veggie_servings)
        .bind(input.high_fat_meals)
        .bind(input.water_ml)
        .bind(input.exercise_minutes)
        .bind(input.steps)
        .bind(input.mood_score)
        .bind(&input.mood_note)
        .bind(input.screen_hours)
        .bind(input.alcohol)
        .bind(input.caffeine)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// All daily events, oldest first
    pub async fn fetch_all(pool: &SqlitePool) -> Result<Vec<EventRecord>> {
        let records = sqlx::query_as::<_, EventRecord>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY date"
        ))
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// The events of the week beginning at `week_start`, oldest first
    pub async fn fetch_week(pool: &SqlitePool, week_start: NaiveDate) -> Result<Vec<EventRecord>> {
        let end = week_start + chrono::Duration::days(DAYS_PER_WEEK as i64);
        let records = sqlx::query_as::<_, EventRecord>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE date >= ? AND date < ? ORDER BY date"
        ))
        .bind(week_start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Dates with a record on or before `date`, newest first.
    /// Used for the check-in streak walk.
    pub async fn logged_dates_through(pool: &SqlitePool, date: NaiveDate) -> Result<Vec<NaiveDate>> {
        let rows: Vec<(NaiveDate,)> =
            sqlx::query_as("SELECT date FROM events WHERE date <= ? ORDER BY date DESC")
                .bind(date)
                .fetch_all(pool)
                .await?;

        Ok(rows.into_iter().map(|(date,)| date).collect())
    }

    /// Number of records with `start <= date < end`
    pub async fn count_in_range(
        pool: &SqlitePool,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM events WHERE date >= ? AND date < ?")
                .bind(start)
                .bind(end)
                .fetch_one(pool)
                .await?;

        Ok(count.0)
    }
}
