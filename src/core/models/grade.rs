//! Grade model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::aggregate::round_to_two_decimals;
use crate::core::gradebook::GradebookError;

/// Lowest grade on the scale.
pub const MIN_GRADE: f64 = 1.0;

/// Highest grade on the scale.
pub const MAX_GRADE: f64 = 6.0;

/// A single assessment result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Unique identifier, never reused
    pub id: String,

    /// Grade on the 1.0 - 6.0 scale (6 = best)
    pub value: f64,

    /// Relative contribution to the subject's weighted average
    pub weight: f64,

    /// Optional free-text annotation (e.g. "midterm")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Raw, unvalidated grade fields as entered by the user
#[derive(Debug, Clone, PartialEq)]
pub struct GradeInput {
    /// Grade value
    pub value: f64,
    /// Weight (defaults to 1.0)
    pub weight: f64,
    /// Optional label
    pub label: Option<String>,
}

impl GradeInput {
    /// Input with the default weight of 1.0 and no label
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            weight: 1.0,
            label: None,
        }
    }

    /// Set the weight
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Partial update applied by an edit; `None` keeps the current field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradePatch {
    /// New value
    pub value: Option<f64>,
    /// New weight
    pub weight: Option<f64>,
    /// New label; `Some("")` clears it
    pub label: Option<String>,
}

impl Grade {
    /// Validate user input and create a grade with a fresh id
    ///
    /// Value and weight are rounded to 2 decimals and the label is trimmed
    /// (an empty label becomes `None`).
    ///
    /// # Errors
    /// Returns an error if the value is outside `[1, 6]` or the weight is not positive.
    pub fn new(input: GradeInput) -> Result<Self, GradebookError> {
        let (value, weight) = validate(input.value, input.weight)?;
        Ok(Self {
            id: Self::generate_id(),
            value,
            weight,
            label: normalize_label(input.label),
        })
    }

    /// Generate a new unique grade id
    #[must_use]
    pub fn generate_id() -> String {
        format!("grade-{}", Uuid::new_v4())
    }

    /// Apply a validated patch, keeping the id
    ///
    /// # Errors
    /// Returns an error if the merged value or weight is invalid; the grade
    /// is left untouched in that case.
    pub fn apply(&mut self, patch: GradePatch) -> Result<(), GradebookError> {
        let (value, weight) = validate(
            patch.value.unwrap_or(self.value),
            patch.weight.unwrap_or(self.weight),
        )?;
        self.value = value;
        self.weight = weight;
        if patch.label.is_some() {
            self.label = normalize_label(patch.label);
        }
        Ok(())
    }
}

// Checks apply to the rounded values, since those are what gets stored.
fn validate(value: f64, weight: f64) -> Result<(f64, f64), GradebookError> {
    let rounded_value = round_to_two_decimals(value);
    if !rounded_value.is_finite() || !(MIN_GRADE..=MAX_GRADE).contains(&rounded_value) {
        return Err(GradebookError::InvalidValue(value));
    }
    let rounded_weight = round_to_two_decimals(weight);
    if !rounded_weight.is_finite() || rounded_weight <= 0.0 {
        return Err(GradebookError::InvalidWeight(weight));
    }
    Ok((rounded_value, rounded_weight))
}

fn normalize_label(label: Option<String>) -> Option<String> {
    label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
}
