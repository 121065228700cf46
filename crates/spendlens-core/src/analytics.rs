//! Analytics facade
//!
//! Orchestrates aggregation, trend analysis, health scoring, and budget alert
//! evaluation over one immutable snapshot. Every input is explicit, including
//! the reference date standing in for "today", so two calls with identical
//! arguments produce identical output.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::aggregate::{self, AggregateOptions, Aggregation, DEFAULT_TOP_N};
use crate::budget;
use crate::health::{self, HealthInputs};
use crate::models::{AnalyticsOverview, BudgetAlert, BudgetConfig, Category, ExpenseRecord};
use crate::trends::{self, DEFAULT_WEEKLY_SERIES_LEN};

/// Parameters for one overview computation
#[derive(Debug, Clone)]
pub struct OverviewParams {
    /// Reference date standing in for "today"
    pub today: NaiveDate,
    /// Optional inclusive date range restricting the snapshot
    pub range: Option<(NaiveDate, NaiveDate)>,
    /// Size of the top-expenses ranking
    pub top_n: usize,
    /// Monthly income used for the savings rate; None leaves it unscored
    pub monthly_income: Option<f64>,
}

impl OverviewParams {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            range: None,
            top_n: DEFAULT_TOP_N,
            monthly_income: None,
        }
    }

    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.range = Some((start, end));
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_monthly_income(mut self, income: f64) -> Self {
        self.monthly_income = Some(income);
        self
    }
}

/// Compute the full analytics overview for one user's snapshot.
///
/// Always returns a complete overview: malformed records become a reported
/// count, ratios with empty denominators become `None`, and a health score
/// with no usable components is simply absent.
pub fn overview(
    expenses: &[ExpenseRecord],
    budgets: Option<&BudgetConfig>,
    params: &OverviewParams,
) -> AnalyticsOverview {
    let aggregation = aggregate::aggregate(
        expenses,
        &AggregateOptions {
            range: params.range,
            top_n: params.top_n,
        },
    );

    let weekly_comparison = trends::weekly_comparison(&aggregation.daily_totals, params.today);
    let velocity = trends::velocity(&aggregation.daily_totals, params.today);
    let daily_pattern = trends::daily_pattern(&aggregation.daily_totals);
    let weekly_spending = trends::weekly_series(
        &aggregation.daily_totals,
        params.today,
        DEFAULT_WEEKLY_SERIES_LEN,
    );

    let savings_rate = params.monthly_income.and_then(|income| {
        if income <= 0.0 {
            return None;
        }
        let month_spent = reference_month_spend(&aggregation.daily_totals, params.today);
        Some(((income - month_spent) / income * 100.0).max(0.0))
    });

    let health_inputs = HealthInputs {
        savings_rate,
        budget_adherence: budgets.and_then(|config| budget_adherence(config, &aggregation)),
        essential_ratio: essential_ratio(&aggregation),
    };
    let health = match health::score(&health_inputs) {
        Ok(score) => Some(score),
        Err(e) => {
            tracing::debug!(error = %e, "health score unavailable");
            None
        }
    };

    tracing::debug!(
        total = aggregation.total_spent,
        count = aggregation.expense_count,
        malformed = aggregation.malformed_records,
        "analytics overview computed"
    );

    AnalyticsOverview {
        total_spent: aggregation.total_spent,
        expense_count: aggregation.expense_count,
        malformed_records: aggregation.malformed_records,
        average_daily: aggregation.average_daily,
        category_breakdown: aggregation.category_breakdown,
        priority_distribution: aggregation.priority_distribution,
        monthly_trend: aggregation.monthly_trend,
        weekly_spending,
        daily_pattern,
        weekly_comparison,
        velocity,
        top_expenses: aggregation.top_expenses,
        savings_rate,
        health,
    }
}

/// Evaluate budget alerts for the reference month (the 1st through `today`).
///
/// Month scoping matches how budget limits are defined: one limit per
/// category per calendar month.
pub fn budget_alerts(
    expenses: &[ExpenseRecord],
    config: &BudgetConfig,
    today: NaiveDate,
) -> Vec<BudgetAlert> {
    let month_start = today.with_day(1).expect("day 1 always valid");
    let aggregation = aggregate::aggregate(
        expenses,
        &AggregateOptions {
            range: Some((month_start, today)),
            top_n: 0,
        },
    );

    let alerts = budget::evaluate(&aggregation.category_breakdown, config);
    tracing::debug!(alerts = alerts.len(), "budget alerts evaluated");
    alerts
}

/// Spend inside the calendar month containing `today`, up to `today`
fn reference_month_spend(daily: &BTreeMap<NaiveDate, f64>, today: NaiveDate) -> f64 {
    let month_start = today.with_day(1).expect("day 1 always valid");
    daily.range(month_start..=today).map(|(_, amount)| amount).sum()
}

/// Fraction of configured categories (positive limits only) within limit
fn budget_adherence(config: &BudgetConfig, aggregation: &Aggregation) -> Option<f64> {
    let configured: Vec<(Category, f64)> = config
        .limits
        .iter()
        .filter(|(_, limit)| **limit > 0.0)
        .map(|(&category, &limit)| (category, limit))
        .collect();
    if configured.is_empty() {
        return None;
    }

    let within = configured
        .iter()
        .filter(|(category, limit)| {
            let spent = aggregation
                .category_breakdown
                .get(category)
                .copied()
                .unwrap_or(0.0);
            spent <= *limit
        })
        .count();
    Some(within as f64 / configured.len() as f64)
}

/// Share of total spend marked essential; None when nothing was spent
fn essential_ratio(aggregation: &Aggregation) -> Option<f64> {
    if aggregation.total_spent <= 0.0 {
        return None;
    }
    let essential: f64 = aggregation
        .priority_distribution
        .iter()
        .filter(|(priority, _)| priority.is_essential())
        .map(|(_, amount)| amount)
        .sum();
    Some(essential / aggregation.total_spent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertLevel, Priority};
    use crate::test_utils::{expense, expense_with_priority};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_overview_of_empty_snapshot_is_all_zeroes() {
        let params = OverviewParams::new(date(2026, 8, 14));
        let overview = overview(&[], None, &params);

        assert_eq!(overview.total_spent, 0.0);
        assert_eq!(overview.expense_count, 0);
        assert_eq!(overview.average_daily, 0.0);
        assert!(overview.category_breakdown.is_empty());
        assert!(overview.top_expenses.is_empty());
        assert_eq!(overview.weekly_comparison.change_percentage, None);
        assert_eq!(overview.velocity.ratio, None);
        assert_eq!(overview.savings_rate, None);
        assert!(overview.health.is_none());
    }

    #[test]
    fn test_savings_rate_uses_reference_month() {
        let expenses = vec![
            expense("e1", "Lunch", 4000.0, Category::FoodAndDining, "2026-08-10"),
            // Prior month spend must not count against August income
            expense("e2", "Course", 9000.0, Category::Education, "2026-07-05"),
        ];
        let params = OverviewParams::new(date(2026, 8, 14)).with_monthly_income(15000.0);
        let overview = overview(&expenses, None, &params);

        let savings = overview.savings_rate.unwrap();
        assert!((savings - (15000.0 - 4000.0) / 15000.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_savings_rate_clamped_at_zero_when_overspent() {
        let expenses = vec![expense(
            "e1",
            "Laptop",
            50000.0,
            Category::Shopping,
            "2026-08-10",
        )];
        let params = OverviewParams::new(date(2026, 8, 14)).with_monthly_income(15000.0);
        let overview = overview(&expenses, None, &params);
        assert_eq!(overview.savings_rate, Some(0.0));
    }

    #[test]
    fn test_health_reflects_budget_adherence() {
        let expenses = vec![
            expense_with_priority(
                "e1",
                "Rent",
                8000.0,
                Category::Housing,
                "2026-08-01",
                Priority::High,
            ),
            expense("e2", "Dining", 900.0, Category::FoodAndDining, "2026-08-10"),
        ];
        let config = BudgetConfig::new()
            .with_limit(Category::Housing, 8000.0)
            .with_limit(Category::FoodAndDining, 600.0);
        let params = OverviewParams::new(date(2026, 8, 14));
        let overview = overview(&expenses, Some(&config), &params);

        let health = overview.health.unwrap();
        // Housing within limit, Food & Dining over: adherence 50
        assert_eq!(health.adherence_component, Some(50.0));
        // No income supplied, so the savings term is absent
        assert_eq!(health.savings_component, None);
        let essential = health.essential_component.unwrap();
        assert!((essential - 8000.0 / 8900.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_budget_alerts_scope_to_reference_month() {
        let expenses = vec![
            expense("aug1", "Dining", 500.0, Category::FoodAndDining, "2026-08-03"),
            expense("aug2", "Dining", 300.0, Category::FoodAndDining, "2026-08-08"),
            // July spend must not trip the August budget
            expense("jul", "Dining", 5000.0, Category::FoodAndDining, "2026-07-20"),
        ];
        let config = BudgetConfig::new().with_limit(Category::FoodAndDining, 700.0);
        let alerts = budget_alerts(&expenses, &config, date(2026, 8, 14));

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].spent, 800.0);
        assert_eq!(alerts[0].level, AlertLevel::Critical);
    }
}
