//! Check-in streak statistics
//!
//! Answers "how consistently has the user been logging": the
//! consecutive-days streak ending today, plus how much of the current
//! calendar month is filled in.

use crate::error::ApiError;
use crate::repositories::EventRepository;
use chrono::{Duration, NaiveDate};
use habit_coach_shared::weeks::{days_in_month, month_start, next_month_start};
use sqlx::SqlitePool;

/// Streak statistics for the dashboard header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakStats {
    pub current_streak: i64,
    pub days_in_month: i64,
    pub days_filled: i64,
}

/// Streak statistics service
pub struct StreakService;

impl StreakService {
    /// Compute streak and month-fill statistics as of `today`
    pub async fn stats(pool: &SqlitePool, today: NaiveDate) -> Result<StreakStats, ApiError> {
        let logged = EventRepository::logged_dates_through(pool, today)
            .await
            .map_err(ApiError::Internal)?;

        // Dates come back newest-first; walk backwards from today until
        // the first gap.
        let mut current_streak = 0i64;
        let mut expected = today;
        for date in logged {
            if date == expected {
                current_streak += 1;
                expected -= Duration::days(1);
            } else if date < expected {
                break;
            }
        }

        let days_filled =
            EventRepository::count_in_range(pool, month_start(today), next_month_start(today))
                .await
                .map_err(ApiError::Internal)?;

        Ok(StreakStats {
            current_streak,
            days_in_month: days_in_month(today),
            days_filled,
        })
    }
}
