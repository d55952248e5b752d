//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod events;
pub mod profile;
pub mod weekly;

pub use events::{EventRecord, EventRepository, UpsertEvent};
pub use profile::{ProfileRecord, ProfileRepository, UpsertProfile};
pub use weekly::{WeekStats, WeeklySummaryRecord, WeeklySummaryRepository};
