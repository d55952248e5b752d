//! Integration tests for the weekly aggregation pipeline
//!
//! These exercise the service and repository layers together against an
//! in-memory SQLite database.

use chrono::NaiveDate;
use habit_coach_backend::db;
use habit_coach_backend::repositories::{
    EventRepository, UpsertEvent, WeeklySummaryRepository,
};
use habit_coach_backend::services::aggregation::AggregationService;
use habit_coach_backend::services::streak::StreakService;
use habit_coach_shared::weeks::{last_full_week_start, week_dates};
use sqlx::SqlitePool;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn event_for(day: NaiveDate) -> UpsertEvent {
    UpsertEvent {
        date: day,
        sleep_hours: Some(7.0),
        sleep_start: None,
        sleep_end: None,
        veggie_servings: Some(4),
        high_fat_meals: Some(1),
        water_ml: Some(1500),
        exercise_minutes: Some(30),
        steps: Some(8000),
        mood_score: Some(4),
        mood_note: None,
        screen_hours: Some(2.5),
        alcohol: false,
        caffeine: true,
    }
}

async fn seed_days(pool: &SqlitePool, from: NaiveDate, count: usize) {
    for day in week_dates(from).take(count) {
        EventRepository::upsert(pool, event_for(day)).await.unwrap();
    }
}

#[tokio::test]
async fn complete_week_aggregates_exact_stats() {
    let pool = db::memory_pool().await.unwrap();
    let monday = date(2025, 6, 2);
    seed_days(&pool, monday, 7).await;

    let processed = AggregationService::aggregate_unprocessed_weeks(&pool)
        .await
        .unwrap();
    assert_eq!(processed, vec![monday]);

    let summary = WeeklySummaryRepository::get_by_week(&pool, monday)
        .await
        .unwrap()
        .expect("summary row should exist");
    assert_eq!(summary.total_steps, 56_000);
    assert_eq!(summary.avg_sleep, 7.0);
    assert_eq!(summary.exercise_total, 210);
    assert_eq!(summary.water_total, 10_500);
    assert_eq!(summary.mood_avg, 4.0);
    assert_eq!(summary.veggie_avg, 4.0);
    assert_eq!(summary.alcohol_days, 0);
    assert!(summary.suggestions.is_none());
}

#[tokio::test]
async fn partial_weeks_are_skipped() {
    let pool = db::memory_pool().await.unwrap();
    // Only 5 of 7 days logged
    seed_days(&pool, date(2025, 6, 2), 5).await;

    let processed = AggregationService::aggregate_unprocessed_weeks(&pool)
        .await
        .unwrap();
    assert!(processed.is_empty());
    assert!(WeeklySummaryRepository::latest(&pool).await.unwrap().is_none());
}

#[tokio::test]
async fn last_full_week_requires_all_seven_days() {
    let pool = db::memory_pool().await.unwrap();
    let today = date(2025, 6, 11); // Wednesday; last full week starts 06-02
    let monday = last_full_week_start(today);
    assert_eq!(monday, date(2025, 6, 2));

    seed_days(&pool, monday, 6).await;
    let ready = AggregationService::aggregate_last_full_week(&pool, today)
        .await
        .unwrap();
    assert!(!ready, "six days must be treated as not-ready");
    assert!(WeeklySummaryRepository::get_by_week(&pool, monday)
        .await
        .unwrap()
        .is_none());

    // The seventh day arrives
    seed_days(&pool, monday, 7).await;
    let ready = AggregationService::aggregate_last_full_week(&pool, today)
        .await
        .unwrap();
    assert!(ready);
    assert!(WeeklySummaryRepository::get_by_week(&pool, monday)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn reaggregation_is_idempotent() {
    let pool = db::memory_pool().await.unwrap();
    let monday = date(2025, 6, 2);
    seed_days(&pool, monday, 7).await;

    let first_run = AggregationService::aggregate_unprocessed_weeks(&pool)
        .await
        .unwrap();
    assert_eq!(first_run.len(), 1);
    let before = WeeklySummaryRepository::get_by_week(&pool, monday)
        .await
        .unwrap()
        .unwrap();

    // Second pass over unchanged data: nothing new, nothing changed
    let second_run = AggregationService::aggregate_unprocessed_weeks(&pool)
        .await
        .unwrap();
    assert!(second_run.is_empty());

    let all = WeeklySummaryRepository::fetch_recent(&pool, 10).await.unwrap();
    assert_eq!(all.len(), 1, "no duplicate rows");

    let after = &all[0];
    assert_eq!(after.avg_sleep, before.avg_sleep);
    assert_eq!(after.total_steps, before.total_steps);
    assert_eq!(after.mood_avg, before.mood_avg);
    assert_eq!(after.exercise_total, before.exercise_total);
    assert_eq!(after.veggie_avg, before.veggie_avg);
    assert_eq!(after.water_total, before.water_total);
    assert_eq!(after.alcohol_days, before.alcohol_days);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn recomputation_preserves_suggestions() {
    let pool = db::memory_pool().await.unwrap();
    let today = date(2025, 6, 11);
    let monday = last_full_week_start(today);
    seed_days(&pool, monday, 7).await;

    assert!(AggregationService::aggregate_last_full_week(&pool, today)
        .await
        .unwrap());

    let stored = r#"{"summary":"ok","action_items":[]}"#;
    assert!(WeeklySummaryRepository::set_suggestions(&pool, monday, stored)
        .await
        .unwrap());

    // Recomputing the same week must not touch the suggestions column
    assert!(AggregationService::aggregate_last_full_week(&pool, today)
        .await
        .unwrap());
    let summary = WeeklySummaryRepository::get_by_week(&pool, monday)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(summary.suggestions.as_deref(), Some(stored));
}

#[tokio::test]
async fn event_upsert_overwrites_in_place() {
    let pool = db::memory_pool().await.unwrap();
    let day = date(2025, 6, 2);

    let first = EventRepository::upsert(&pool, event_for(day)).await.unwrap();

    let mut updated = event_for(day);
    updated.steps = Some(12_000);
    let second = EventRepository::upsert(&pool, updated).await.unwrap();

    assert_eq!(second.steps, Some(12_000));
    // Original creation timestamp survives the overwrite
    assert_eq!(second.created_at, first.created_at);

    let all = EventRepository::fetch_all(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn streak_counts_consecutive_days_ending_today() {
    let pool = db::memory_pool().await.unwrap();
    let today = date(2025, 6, 11);

    // today, yesterday, then a gap, then one older day
    for day in [today, date(2025, 6, 10), date(2025, 6, 7)] {
        EventRepository::upsert(&pool, event_for(day)).await.unwrap();
    }

    let stats = StreakService::stats(&pool, today).await.unwrap();
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.days_in_month, 30);
    assert_eq!(stats.days_filled, 3);
}

#[tokio::test]
async fn streak_is_zero_without_todays_entry() {
    let pool = db::memory_pool().await.unwrap();
    let today = date(2025, 6, 11);
    EventRepository::upsert(&pool, event_for(date(2025, 6, 10)))
        .await
        .unwrap();

    let stats = StreakService::stats(&pool, today).await.unwrap();
    assert_eq!(stats.current_streak, 0);
}
