//! Snapshot filtering
//!
//! Mirrors the query surface the expense store exposes to the API layer:
//! category, date range, amount bounds, priority, any-of tag matching, and
//! skip/limit pagination, applied over an in-memory snapshot.

use chrono::NaiveDate;

use crate::models::{Category, ExpenseRecord, Priority};

/// A filter over an expense snapshot; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub priority: Option<Priority>,
    /// Keep records carrying at least one of these tags (case-insensitive)
    pub tags: Vec<String>,
    /// Records to skip before collecting results
    pub skip: usize,
    /// Maximum number of results; None returns everything
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_amount_range(mut self, min: f64, max: f64) -> Self {
        self.min_amount = Some(min);
        self.max_amount = Some(max);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_page(mut self, skip: usize, limit: usize) -> Self {
        self.skip = skip;
        self.limit = Some(limit);
        self
    }

    /// Apply the filter, preserving input order.
    ///
    /// Records whose date does not parse are excluded only when a date bound
    /// is set, since their position relative to the bound is unknowable.
    pub fn apply(&self, expenses: &[ExpenseRecord]) -> Vec<ExpenseRecord> {
        let tags_lower: Vec<String> = self
            .tags
            .iter()
            .map(|tag| tag.trim().to_lowercase())
            .collect();

        let matched = expenses
            .iter()
            .filter(|expense| self.matches(expense, &tags_lower))
            .skip(self.skip);

        match self.limit {
            Some(limit) => matched.take(limit).cloned().collect(),
            None => matched.cloned().collect(),
        }
    }

    fn matches(&self, expense: &ExpenseRecord, tags_lower: &[String]) -> bool {
        if let Some(category) = self.category {
            if expense.category != category {
                return false;
            }
        }
        if self.start_date.is_some() || self.end_date.is_some() {
            let Some(date) = expense.parsed_date() else {
                return false;
            };
            if let Some(start) = self.start_date {
                if date < start {
                    return false;
                }
            }
            if let Some(end) = self.end_date {
                if date > end {
                    return false;
                }
            }
        }
        if let Some(min) = self.min_amount {
            if expense.amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if expense.amount > max {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if expense.priority != priority {
                return false;
            }
        }
        if !tags_lower.is_empty() {
            let any_match = expense
                .tags
                .iter()
                .any(|tag| tags_lower.contains(&tag.trim().to_lowercase()));
            if !any_match {
                return false;
            }
        }
        true
    }
}
