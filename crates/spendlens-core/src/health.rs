//! Financial health scoring
//!
//! Combines the savings rate, budget adherence, and the essential-spend share
//! into one bounded 0-100 score. The weights are fixed design constants;
//! components without data drop out and the remaining weights renormalize, so
//! a partial picture still yields a score.

use crate::error::{Error, Result};
use crate::models::HealthScore;

/// Weight of the savings-rate component
pub const SAVINGS_WEIGHT: f64 = 0.40;
/// Weight of the budget-adherence component
pub const ADHERENCE_WEIGHT: f64 = 0.35;
/// Weight of the essential-spend component
pub const ESSENTIAL_WEIGHT: f64 = 0.25;

/// Inputs to the scorer; `None` marks a component with no underlying data
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthInputs {
    /// Savings rate in percent; clamped to [0, 100]
    pub savings_rate: Option<f64>,
    /// Fraction of budgeted categories still within their limit, in [0, 1]
    pub budget_adherence: Option<f64>,
    /// Share of spend marked high priority, in [0, 1]
    pub essential_ratio: Option<f64>,
}

/// Score the supplied components.
///
/// Returns `Error::InsufficientData` when every component is absent; the
/// weight sum is never zero in the division below.
pub fn score(inputs: &HealthInputs) -> Result<HealthScore> {
    let savings_component = inputs.savings_rate.map(|rate| rate.clamp(0.0, 100.0));
    let adherence_component = inputs
        .budget_adherence
        .map(|fraction| fraction.clamp(0.0, 1.0) * 100.0);
    let essential_component = inputs
        .essential_ratio
        .map(|fraction| fraction.clamp(0.0, 1.0) * 100.0);

    let mut weighted = 0.0;
    let mut weight_sum = 0.0;
    for (component, weight) in [
        (savings_component, SAVINGS_WEIGHT),
        (adherence_component, ADHERENCE_WEIGHT),
        (essential_component, ESSENTIAL_WEIGHT),
    ] {
        if let Some(value) = component {
            weighted += weight * value;
            weight_sum += weight;
        }
    }

    if weight_sum == 0.0 {
        return Err(Error::InsufficientData(
            "no health score component has data".to_string(),
        ));
    }

    Ok(HealthScore {
        score: (weighted / weight_sum).clamp(0.0, 100.0),
        savings_component,
        adherence_component,
        essential_component,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_components_present() {
        let health = score(&HealthInputs {
            savings_rate: Some(50.0),
            budget_adherence: Some(0.8),
            essential_ratio: Some(0.4),
        })
        .unwrap();
        // 0.40*50 + 0.35*80 + 0.25*40 = 20 + 28 + 10 = 58
        assert!((health.score - 58.0).abs() < 1e-9);
        assert_eq!(health.savings_component, Some(50.0));
        assert_eq!(health.adherence_component, Some(80.0));
        assert_eq!(health.essential_component, Some(40.0));
    }

    #[test]
    fn test_missing_savings_renormalizes_weights() {
        let health = score(&HealthInputs {
            savings_rate: None,
            budget_adherence: Some(1.0),
            essential_ratio: Some(1.0),
        })
        .unwrap();
        // (0.35*100 + 0.25*100) / 0.60 = 100
        assert!((health.score - 100.0).abs() < 1e-9);
        assert_eq!(health.savings_component, None);
    }

    #[test]
    fn test_single_component_scores_itself() {
        let health = score(&HealthInputs {
            savings_rate: Some(30.0),
            budget_adherence: None,
            essential_ratio: None,
        })
        .unwrap();
        assert!((health.score - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_missing_is_insufficient_data() {
        let err = score(&HealthInputs::default()).unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));
    }

    #[test]
    fn test_inputs_are_clamped() {
        let health = score(&HealthInputs {
            savings_rate: Some(250.0),
            budget_adherence: Some(-0.5),
            essential_ratio: Some(1.5),
        })
        .unwrap();
        assert_eq!(health.savings_component, Some(100.0));
        assert_eq!(health.adherence_component, Some(0.0));
        assert_eq!(health.essential_component, Some(100.0));
        assert!(health.score <= 100.0 && health.score >= 0.0);
    }
}
