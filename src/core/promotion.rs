//! Promotion evaluation
//!
//! Checks a year's final grades against three independent criteria: how many
//! subjects are failing, the overall average, and the summed deficit of the
//! failing subjects. All three must pass.

use crate::core::aggregate::{final_grade, round_to_half, round_to_two_decimals, UNGRADED};
use crate::core::models::CurriculumEntity;
use serde::{Deserialize, Serialize};

/// Final grades strictly below this value count as failing.
pub const PASSING_GRADE: f64 = 4.0;

/// Thresholds a year's performance must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PromotionCriteria {
    /// Maximum number of final grades below 4
    pub max_failures: usize,
    /// Minimum average of all final grades
    pub min_average: f64,
    /// Maximum summed shortfall below 4
    pub max_deficit: f64,
}

impl Default for PromotionCriteria {
    fn default() -> Self {
        Self {
            max_failures: 4,
            min_average: 4.0,
            max_deficit: 2.0,
        }
    }
}

/// Result of the failure-count criterion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FailuresCheck {
    /// Whether the criterion is met
    pub passed: bool,
    /// Number of failing final grades
    pub count: usize,
    /// Threshold used
    pub max: usize,
}

/// Result of the average criterion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageCheck {
    /// Whether the criterion is met
    pub passed: bool,
    /// Average of the final grades, rounded to the nearest 0.5
    pub value: f64,
    /// Threshold used
    pub min: f64,
}

/// Result of the deficit criterion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeficitCheck {
    /// Whether the criterion is met
    pub passed: bool,
    /// Summed shortfall below 4, rounded to 2 decimals
    pub value: f64,
    /// Threshold used
    pub max: f64,
}

/// Per-criterion results
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriteriaResults {
    /// Failure count
    pub failures: FailuresCheck,
    /// Average
    pub average: AverageCheck,
    /// Deficit
    pub deficit: DeficitCheck,
}

/// Promotion verdict for one year
///
/// Only meaningful when `has_grades` is true; with no graded subject the
/// verdict is vacuously passing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionStatus {
    /// All three criteria are met
    pub is_passing: bool,
    /// At least one entity has a grade
    pub has_grades: bool,
    /// Detail for each criterion
    pub criteria: CriteriaResults,
}

/// Evaluate a year's curriculum entities against promotion criteria.
///
/// Ungraded entities (final grade `0`) are left out of every statistic.
/// Combined and leaf subjects count as one data point each.
#[must_use]
pub fn evaluate(entities: &[CurriculumEntity], criteria: &PromotionCriteria) -> PromotionStatus {
    let final_grades: Vec<f64> = entities.iter().map(final_grade).collect();
    evaluate_final_grades(&final_grades, criteria)
}

/// Evaluate already computed final grades (sentinel zeros are skipped).
#[must_use]
pub fn evaluate_final_grades(final_grades: &[f64], criteria: &PromotionCriteria) -> PromotionStatus {
    let valid: Vec<f64> = final_grades
        .iter()
        .copied()
        .filter(|&g| g > UNGRADED)
        .collect();
    let has_grades = !valid.is_empty();

    let failing: Vec<f64> = valid.iter().copied().filter(|&g| g < PASSING_GRADE).collect();

    #[allow(clippy::cast_precision_loss)]
    let average = if has_grades {
        round_to_half(valid.iter().sum::<f64>() / valid.len() as f64)
    } else {
        0.0
    };

    let deficit = round_to_two_decimals(
        failing
            .iter()
            .map(|&g| (PASSING_GRADE - g).max(0.0))
            .sum::<f64>(),
    );

    let failures = FailuresCheck {
        passed: failing.len() <= criteria.max_failures,
        count: failing.len(),
        max: criteria.max_failures,
    };
    let average = AverageCheck {
        passed: average >= criteria.min_average,
        value: average,
        min: criteria.min_average,
    };
    let deficit = DeficitCheck {
        passed: deficit <= criteria.max_deficit,
        value: deficit,
        max: criteria.max_deficit,
    };

    PromotionStatus {
        is_passing: failures.passed && average.passed && deficit.passed,
        has_grades,
        criteria: CriteriaResults {
            failures,
            average,
            deficit,
        },
    }
}
