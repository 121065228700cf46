//! Expense aggregation
//!
//! Turns a snapshot of expense records into totals, category and priority
//! breakdowns, day and month buckets, and a top-N ranking. Every output
//! collection is ordered, so identical snapshots aggregate to identical
//! output.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Category, ExpenseRecord, MonthBucket, Priority};

/// Default size of the top-expenses ranking
pub const DEFAULT_TOP_N: usize = 10;

/// Options for one aggregation pass
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Inclusive date range filter; records outside it are ignored
    pub range: Option<(NaiveDate, NaiveDate)>,
    /// Size of the top-expenses ranking
    pub top_n: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            range: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Aggregated view of one expense snapshot
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub total_spent: f64,
    pub expense_count: usize,
    /// Records excluded for a negative amount or unparseable date
    pub malformed_records: usize,
    /// Total divided by the distinct calendar days spanned (minimum 1 day)
    pub average_daily: f64,
    /// Categories with zero spend are omitted
    pub category_breakdown: BTreeMap<Category, f64>,
    pub priority_distribution: BTreeMap<Priority, f64>,
    /// Per-day sums for records with a parseable date
    pub daily_totals: BTreeMap<NaiveDate, f64>,
    /// Per-month sums (`YYYY-MM`), ascending
    pub monthly_trend: Vec<MonthBucket>,
    /// Largest expenses first; ties broken by most recent date, then input order
    pub top_expenses: Vec<ExpenseRecord>,
}

/// Aggregate a snapshot of expense records.
///
/// Malformed records follow an explicit exclusion policy:
/// - a negative amount drops the record from every amount-sensitive aggregate;
/// - an unparseable date keeps the record in the total, count, breakdown, and
///   top-N but excludes it from day and month buckets;
/// - an unparseable date combined with a range filter drops the record
///   entirely, since membership in the range cannot be decided.
///
/// Each exclusion increments `malformed_records` so nothing disappears
/// without trace. An empty snapshot produces an all-zero aggregation.
pub fn aggregate(expenses: &[ExpenseRecord], opts: &AggregateOptions) -> Aggregation {
    let mut total_spent = 0.0;
    let mut expense_count = 0usize;
    let mut malformed_records = 0usize;
    let mut category_breakdown: BTreeMap<Category, f64> = BTreeMap::new();
    let mut priority_distribution: BTreeMap<Priority, f64> = BTreeMap::new();
    let mut daily_totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut monthly: BTreeMap<String, f64> = BTreeMap::new();
    let mut ranked: Vec<(usize, &ExpenseRecord, Option<NaiveDate>)> = Vec::new();

    for (index, expense) in expenses.iter().enumerate() {
        if expense.amount < 0.0 {
            malformed_records += 1;
            continue;
        }

        let date = expense.parsed_date();
        if date.is_none() {
            malformed_records += 1;
            if opts.range.is_some() {
                continue;
            }
        }
        if let (Some((start, end)), Some(day)) = (opts.range, date) {
            if day < start || day > end {
                continue;
            }
        }

        total_spent += expense.amount;
        expense_count += 1;
        *category_breakdown.entry(expense.category).or_insert(0.0) += expense.amount;
        *priority_distribution.entry(expense.priority).or_insert(0.0) += expense.amount;
        if let Some(day) = date {
            *daily_totals.entry(day).or_insert(0.0) += expense.amount;
            *monthly.entry(day.format("%Y-%m").to_string()).or_insert(0.0) += expense.amount;
        }
        ranked.push((index, expense, date));
    }

    if malformed_records > 0 {
        tracing::debug!(
            malformed = malformed_records,
            "excluded malformed expense records from aggregation"
        );
    }

    // Amount descending, then most recent date (undated records last), then
    // stable input order.
    ranked.sort_by(|a, b| {
        b.1.amount
            .partial_cmp(&a.1.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.2.cmp(&a.2))
            .then_with(|| a.0.cmp(&b.0))
    });
    let top_expenses: Vec<ExpenseRecord> = ranked
        .iter()
        .take(opts.top_n)
        .map(|(_, expense, _)| (*expense).clone())
        .collect();

    let days_spanned = match (
        opts.range,
        daily_totals.keys().next(),
        daily_totals.keys().next_back(),
    ) {
        (Some((start, end)), _, _) => (end - start).num_days() + 1,
        (None, Some(first), Some(last)) => (*last - *first).num_days() + 1,
        _ => 1,
    }
    .max(1);
    let average_daily = if expense_count == 0 {
        0.0
    } else {
        total_spent / days_spanned as f64
    };

    let monthly_trend = monthly
        .into_iter()
        .map(|(month, amount)| MonthBucket { month, amount })
        .collect();

    Aggregation {
        total_spent,
        expense_count,
        malformed_records,
        average_daily,
        category_breakdown,
        priority_distribution,
        daily_totals,
        monthly_trend,
        top_expenses,
    }
}
