//! Database connection and schema management
//!
//! The persistent store is a single local SQLite file holding three
//! tables with natural keys: `events` (by date), `weekly_summary`
//! (by week-start) and the singleton `user_profile` row. The schema
//! auto-creates on first use; there is no migration mechanism.

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// DDL executed on every startup. `IF NOT EXISTS` keeps it idempotent.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS events (
        date             TEXT PRIMARY KEY,
        sleep_hours      REAL,
        sleep_start      TEXT,
        sleep_end        TEXT,
        veggie_servings  INTEGER,
        high_fat_meals   INTEGER,
        water_ml         INTEGER,
        exercise_minutes INTEGER,
        steps            INTEGER,
        mood_score       INTEGER,
        mood_note        TEXT,
        screen_hours     REAL,
        alcohol          INTEGER NOT NULL DEFAULT 0,
        caffeine         INTEGER NOT NULL DEFAULT 0,
        created_at       TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS weekly_summary (
        week_start     TEXT PRIMARY KEY,
        avg_sleep      REAL NOT NULL,
        total_steps    INTEGER NOT NULL,
        mood_avg       REAL NOT NULL,
        exercise_total INTEGER NOT NULL,
        veggie_avg     REAL NOT NULL,
        water_total    INTEGER NOT NULL,
        alcohol_days   INTEGER NOT NULL,
        suggestions    TEXT,
        created_at     TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_profile (
        id         INTEGER PRIMARY KEY CHECK (id = 1),
        name       TEXT NOT NULL,
        gender     TEXT NOT NULL CHECK (gender IN ('male', 'female', 'other')),
        age        INTEGER NOT NULL,
        height_cm  INTEGER NOT NULL,
        weight_kg  REAL NOT NULL,
        occupation TEXT,
        updated_at TEXT NOT NULL
    )
    "#,
];

/// Create a SQLite connection pool, creating the database file if needed
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(connect_options)
        .await?;

    info!("Database pool created: max={}", max_connections);

    Ok(pool)
}

/// Create all tables that do not exist yet
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    for ddl in SCHEMA {
        sqlx::query(ddl).execute(pool).await?;
    }
    info!("Database schema ready");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &SqlitePool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}

/// In-memory pool for tests. A single connection keeps every query on
/// the same in-memory database.
pub async fn memory_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    init_schema(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_init_is_idempotent() {
        let pool = memory_pool().await.unwrap();
        // Running DDL again must not fail or clobber anything
        init_schema(&pool).await.unwrap();
        health_check(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn profile_check_constraint_rejects_second_row() {
        let pool = memory_pool().await.unwrap();
        let insert = "INSERT INTO user_profile (id, name, gender, age, height_cm, weight_kg, updated_at) \
                      VALUES (?, 'A', 'other', 30, 170, 60.0, '2025-01-01T00:00:00Z')";
        sqlx::query(insert).bind(1).execute(&pool).await.unwrap();
        assert!(sqlx::query(insert).bind(2).execute(&pool).await.is_err());
    }
}
