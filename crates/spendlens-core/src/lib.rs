//! SpendLens Core Library
//!
//! Analytics and budget-alert engine for the SpendLens expense tracker:
//! - Aggregation of expense snapshots into totals, breakdowns, and rankings
//! - Week-over-week trends, day-of-week patterns, and spending velocity
//! - Composite financial health scoring
//! - Tiered budget alerts against per-category limits
//! - A facade assembling everything into one overview per request
//!
//! The engine is pure and synchronous: it receives an immutable snapshot of
//! one user's expense records, an optional budget configuration, and an
//! explicit reference date, and produces derived values with no I/O, no
//! shared state, and no hidden clock reads. Storage, HTTP routing, and UI
//! rendering live in the surrounding layers.

pub mod aggregate;
pub mod analytics;
pub mod budget;
pub mod error;
pub mod filter;
pub mod health;
pub mod models;
pub mod trends;

/// Deterministic fixture builders for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{aggregate as aggregate_expenses, AggregateOptions, Aggregation, DEFAULT_TOP_N};
pub use analytics::{budget_alerts, overview, OverviewParams};
pub use error::{Error, Result};
pub use filter::ExpenseFilter;
pub use health::HealthInputs;
pub use models::{
    AlertLevel, AnalyticsOverview, BudgetAlert, BudgetConfig, Category, ExpenseRecord, HealthScore,
    MonthBucket, Priority, SpendingVelocity, WeekBucket, WeekdayAverage, WeeklyComparison,
};
