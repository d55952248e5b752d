//! Business logic services

pub mod aggregation;
pub mod prompts;
pub mod report;
pub mod streak;

pub use aggregation::AggregationService;
pub use report::{ReportOutcome, ReportService};
pub use streak::{StreakService, StreakStats};
