//! User profile repository
//!
//! The profile is a single-slot record (fixed id = 1, enforced by a
//! CHECK constraint). Each save overwrites the prior state; it is not
//! versioned.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Profile record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub name: String,
    pub gender: String,
    pub age: i64,
    pub height_cm: i64,
    pub weight_kg: f64,
    pub occupation: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Input for saving the profile
#[derive(Debug, Clone)]
pub struct UpsertProfile {
    pub name: String,
    pub gender: String,
    pub age: i64,
    pub height_cm: i64,
    pub weight_kg: f64,
    pub occupation: Option<String>,
}

const PROFILE_COLUMNS: &str = "name, gender, age, height_cm, weight_kg, occupation, updated_at";

/// User profile repository
pub struct ProfileRepository;

impl ProfileRepository {
    /// The singleton profile, if one has been saved
    pub async fn get(pool: &SqlitePool) -> Result<Option<ProfileRecord>> {
        let record = sqlx::query_as::<_, ProfileRecord>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profile WHERE id = 1"
        ))
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Create or overwrite the singleton profile
    pub async fn upsert(pool: &SqlitePool, input: UpsertProfile) -> Result<ProfileRecord> {
        let record = sqlx::query_as::<_, ProfileRecord>(&format!(
            r#"
            INSERT INTO user_profile (id, {PROFILE_COLUMNS})
            VALUES (1, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                gender = excluded.gender,
                age = excluded.age,
                height_cm = excluded.height_cm,
                weight_kg = excluded.weight_kg,
                occupation = excluded.occupation,
                updated_at = excluded.updated_at
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.gender)
        .bind(input.age)
        .bind(input.height_cm)
        .bind(input.weight_kg)
        .bind(&input.occupation)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(record)
    }
}
