//! Habit Coach Shared Library
//!
//! This crate contains the data contracts and pure logic shared between
//! the backend and any future frontend: API request/response types, the
//! weekly coaching report schema (validation + repair), week date math,
//! and BMI computation for profile display.

pub mod health_metrics;
pub mod report;
pub mod types;
pub mod weeks;

// Re-export commonly used items
pub use report::{ActionItem, ReportParseError, WeeklyReport};
pub use weeks::week_start;
