//! Data model for the SpendLens analytics core
//!
//! Expense records and budget configuration arrive from the external store as
//! immutable snapshots. Everything else in this module is derived output,
//! computed per request and never persisted.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Expense categories
///
/// A closed set so that a typo in stored data cannot silently fragment the
/// category breakdown; anything unrecognized lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    Transportation,
    Entertainment,
    Utilities,
    Shopping,
    Healthcare,
    Travel,
    Education,
    Housing,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Shopping => "Shopping",
            Self::Healthcare => "Healthcare",
            Self::Travel => "Travel",
            Self::Education => "Education",
            Self::Housing => "Housing",
            Self::Other => "Other",
        }
    }

    /// Lossy parse: unknown labels map to `Other` instead of failing
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Self::Other)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food & dining" | "food" => Ok(Self::FoodAndDining),
            "transportation" | "transport" => Ok(Self::Transportation),
            "entertainment" => Ok(Self::Entertainment),
            "utilities" => Ok(Self::Utilities),
            "shopping" => Ok(Self::Shopping),
            "healthcare" => Ok(Self::Healthcare),
            "travel" => Ok(Self::Travel),
            "education" => Ok(Self::Education),
            "housing" => Ok(Self::Housing),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending priority of an expense
///
/// `High` marks essential spend (rent, fees), `Low` marks discretionary
/// spend; the health scorer leans on that split.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Whether this priority counts as essential spend
    pub fn is_essential(&self) -> bool {
        matches!(self, Self::High)
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single expense record for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: String,
    pub description: String,
    /// Spend amount in the store's currency unit; never negative for a valid record
    pub amount: f64,
    pub category: Category,
    /// Calendar date as stored (ISO-8601 `YYYY-MM-DD`). Kept as text so one
    /// corrupt record degrades into a reported exclusion instead of failing
    /// the whole snapshot.
    pub date: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExpenseRecord {
    /// Parse the stored date, if it is a valid calendar date
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Check the record invariants: non-negative amount, parseable date
    pub fn validate(&self) -> Result<()> {
        if self.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "negative amount {} on expense {}",
                self.amount, self.id
            )));
        }
        if self.parsed_date().is_none() {
            return Err(Error::InvalidData(format!(
                "unparseable date {:?} on expense {}",
                self.date, self.id
            )));
        }
        Ok(())
    }
}

/// Per-category budget limits for one user
///
/// A category missing from the map has no budget set; the alert evaluator
/// skips it rather than assuming a default limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub limits: BTreeMap<Category, f64>,
}

impl BudgetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, category: Category, limit: f64) -> Self {
        self.limits.insert(category, limit);
        self
    }

    pub fn limit(&self, category: Category) -> Option<f64> {
        self.limits.get(&category).copied()
    }
}

/// Severity tier of a budget alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Self::Info => 1,
            Self::Warning => 2,
            Self::Critical => 3,
        }
    }
}

impl std::str::FromStr for AlertLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Unknown alert level: {}", s)),
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A budget alert for one category (computed per evaluation, never persisted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub category: Category,
    pub spent: f64,
    pub limit: f64,
    /// Share of the limit consumed, as spend / limit * 100
    pub percentage: f64,
    pub level: AlertLevel,
}

/// Spend summed over one calendar month (`YYYY-MM`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month: String,
    pub amount: f64,
}

/// Spend summed over one Monday-anchored week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekBucket {
    pub week_start: NaiveDate,
    pub amount: f64,
}

/// Average spend for one day of the week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayAverage {
    pub weekday: Weekday,
    pub average: f64,
}

/// Most recent 7 days of spend against the 7 days before them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyComparison {
    pub current_week: f64,
    pub previous_week: f64,
    pub change_amount: f64,
    /// None when the previous week had no spend (undefined, not infinity)
    pub change_percentage: Option<f64>,
}

/// Current weekly spend rate relative to the trailing four-week average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingVelocity {
    pub current_week: f64,
    pub four_week_average: f64,
    /// Values above 1 indicate accelerating spend; None without trailing history
    pub ratio: Option<f64>,
}

/// Composite financial health score in [0, 100]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    pub score: f64,
    /// Savings rate contribution, already scaled to [0, 100]
    pub savings_component: Option<f64>,
    /// Budget adherence contribution, scaled to [0, 100]
    pub adherence_component: Option<f64>,
    /// Essential-spend contribution, scaled to [0, 100]
    pub essential_component: Option<f64>,
}

/// The full analytics overview for one snapshot
///
/// Computed on demand and discarded after the response; identical inputs
/// always produce an identical overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    pub total_spent: f64,
    pub expense_count: usize,
    /// Records excluded for a negative amount or unparseable date
    pub malformed_records: usize,
    pub average_daily: f64,
    pub category_breakdown: BTreeMap<Category, f64>,
    pub priority_distribution: BTreeMap<Priority, f64>,
    pub monthly_trend: Vec<MonthBucket>,
    pub weekly_spending: Vec<WeekBucket>,
    pub daily_pattern: Vec<WeekdayAverage>,
    pub weekly_comparison: WeeklyComparison,
    pub velocity: SpendingVelocity,
    pub top_expenses: Vec<ExpenseRecord>,
    /// Percent of monthly income left over; None when no income was supplied
    pub savings_rate: Option<f64>,
    /// None when no component of the score had data
    pub health: Option<HealthScore>,
}
