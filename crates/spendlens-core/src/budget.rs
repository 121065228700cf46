//! Budget alert evaluation
//!
//! Compares per-category spend against configured limits and classifies each
//! into a severity tier. Thresholds are inclusive lower bounds and fixed
//! design constants.

use std::collections::BTreeMap;

use crate::models::{AlertLevel, BudgetAlert, BudgetConfig, Category};

/// Spend at or above this share of the limit produces an Info alert
pub const INFO_THRESHOLD: f64 = 50.0;
/// Spend at or above this share of the limit produces a Warning alert
pub const WARNING_THRESHOLD: f64 = 80.0;
/// Spend at or past the limit produces a Critical alert
pub const CRITICAL_THRESHOLD: f64 = 100.0;

/// Classify a percentage-of-limit into a severity tier.
///
/// Below the Info threshold there is no alert at all.
pub fn classify(percentage: f64) -> Option<AlertLevel> {
    if percentage >= CRITICAL_THRESHOLD {
        Some(AlertLevel::Critical)
    } else if percentage >= WARNING_THRESHOLD {
        Some(AlertLevel::Warning)
    } else if percentage >= INFO_THRESHOLD {
        Some(AlertLevel::Info)
    } else {
        None
    }
}

/// Evaluate every category that has both spend and a positive limit.
///
/// A zero limit means "no budget set" and is skipped, as is any category the
/// config does not mention; neither is an error. Alerts come back Critical
/// first, then by percentage descending within a tier, so a UI can render
/// just the top few.
pub fn evaluate(breakdown: &BTreeMap<Category, f64>, config: &BudgetConfig) -> Vec<BudgetAlert> {
    let mut alerts = Vec::new();

    for (&category, &spent) in breakdown {
        let Some(limit) = config.limit(category) else {
            continue;
        };
        if limit <= 0.0 {
            tracing::debug!(category = %category, "no usable budget limit, skipping");
            continue;
        }

        let percentage = spent / limit * 100.0;
        let Some(level) = classify(percentage) else {
            continue;
        };

        alerts.push(BudgetAlert {
            category,
            spent,
            limit,
            percentage,
            level,
        });
    }

    alerts.sort_by(|a, b| {
        b.level
            .priority()
            .cmp(&a.level.priority())
            .then_with(|| {
                b.percentage
                    .partial_cmp(&a.percentage)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });
    alerts
}
