//! Weekly aggregation service
//!
//! Rolls daily events into Monday-keyed weekly statistics. Two
//! entry points:
//!
//! - [`AggregationService::aggregate_unprocessed_weeks`] scans the
//!   whole event store and inserts a summary for every complete week
//!   that has none yet (dashboard load path).
//! - [`AggregationService::aggregate_last_full_week`] recomputes the
//!   most recently completed week on demand, refusing partial weeks.
//!
//! Both are idempotent: repeated runs over unchanged daily data change
//! no derived value and create no duplicate rows, and neither ever
//! writes the `suggestions` column.

use crate::error::ApiError;
use crate::repositories::{EventRecord, EventRepository, WeekStats, WeeklySummaryRepository};
use chrono::NaiveDate;
use habit_coach_shared::weeks::{last_full_week_start, week_start, DAYS_PER_WEEK};
use sqlx::SqlitePool;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

/// Weekly aggregation service
pub struct AggregationService;

impl AggregationService {
    /// Derived statistics for one week of events.
    ///
    /// Missing fields are tolerated, not errors: averages are taken
    /// over the days where the field is present (0 when it never is),
    /// totals sum the present values.
    pub fn compute_week_stats(events: &[EventRecord]) -> WeekStats {
        WeekStats {
            avg_sleep: mean(events.iter().filter_map(|e| e.sleep_hours)),
            total_steps: events.iter().filter_map(|e| e.steps).sum(),
            mood_avg: mean(events.iter().filter_map(|e| e.mood_score.map(|m| m as f64))),
            exercise_total: events.iter().filter_map(|e| e.exercise_minutes).sum(),
            veggie_avg: mean(
                events
                    .iter()
                    .filter_map(|e| e.veggie_servings.map(|v| v as f64)),
            ),
            water_total: events.iter().filter_map(|e| e.water_ml).sum(),
            alcohol_days: events.iter().filter(|e| e.alcohol).count() as i64,
        }
    }

    /// Aggregate every complete week that has no summary row yet.
    ///
    /// A week is complete only when all 7 of its calendar dates have an
    /// event record (the date primary key guarantees distinctness).
    /// Returns the newly processed week-starts in ascending order.
    pub async fn aggregate_unprocessed_weeks(pool: &SqlitePool) -> Result<Vec<NaiveDate>, ApiError> {
        let events = EventRepository::fetch_all(pool).await.map_err(ApiError::Internal)?;
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_week: BTreeMap<NaiveDate, Vec<EventRecord>> = BTreeMap::new();
        for event in events {
            by_week.entry(week_start(event.date)).or_default().push(event);
        }

        let existing: HashSet<NaiveDate> = WeeklySummaryRepository::existing_week_starts(pool)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .collect();

        let mut processed = Vec::new();
        for (start, week_events) in by_week {
            if week_events.len() != DAYS_PER_WEEK || existing.contains(&start) {
                continue;
            }
            let stats = Self::compute_week_stats(&week_events);
            WeeklySummaryRepository::upsert_stats(pool, start, &stats)
                .await
                .map_err(ApiError::Internal)?;
            info!(week_start = %start, "aggregated week");
            processed.push(start);
        }

        Ok(processed)
    }

    /// Recompute the most recently completed week.
    ///
    /// Returns `false` when that week does not yet have all 7 daily
    /// records — a legitimate not-ready state, not an error. On success
    /// the derived columns are upserted; an existing `suggestions`
    /// value survives because it is outside the aggregator's write set.
    pub async fn aggregate_last_full_week(
        pool: &SqlitePool,
        today: NaiveDate,
    ) -> Result<bool, ApiError> {
        let start = last_full_week_start(today);
        let events = EventRepository::fetch_week(pool, start)
            .await
            .map_err(ApiError::Internal)?;

        if events.len() < DAYS_PER_WEEK {
            debug!(
                week_start = %start,
                days = events.len(),
                "last full week not ready for aggregation"
            );
            return Ok(false);
        }

        let stats = Self::compute_week_stats(&events);
        WeeklySummaryRepository::upsert_stats(pool, start, &stats)
            .await
            .map_err(ApiError::Internal)?;
        info!(week_start = %start, "aggregated last full week");

        Ok(true)
    }
}

/// Arithmetic mean of the yielded values, 0 when there are none
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
