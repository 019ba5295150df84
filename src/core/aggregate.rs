//! Grade aggregation
//!
//! Turns the grades of a curriculum entity into a single final grade on the
//! half-grade scale. A final grade of `0.0` is the "ungraded" sentinel: it is
//! never a real grade and callers must treat it as "no data".

use crate::core::models::{CombinedSubject, CurriculumEntity, Subject};

/// Final grade reported for an entity without any grade data.
pub const UNGRADED: f64 = 0.0;

/// Round to the nearest multiple of 0.5 (halves round up, e.g. 4.25 -> 4.5).
#[must_use]
pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

/// Round to at most 2 decimal places.
#[must_use]
pub fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Final grade of a subject or combined subject.
///
/// Returns [`UNGRADED`] when there is no grade data.
#[must_use]
pub fn final_grade(entity: &CurriculumEntity) -> f64 {
    match entity {
        CurriculumEntity::Subject(subject) => subject_final_grade(subject),
        CurriculumEntity::Combined(combined) => combined_final_grade(combined),
    }
}

/// Weighted mean of a subject's grades, rounded to the nearest 0.5.
///
/// Input is not re-validated: out-of-range values are averaged as they are.
/// A weight sum that is not positive yields [`UNGRADED`].
#[must_use]
pub fn subject_final_grade(subject: &Subject) -> f64 {
    if subject.grades.is_empty() {
        return UNGRADED;
    }

    let (weighted_sum, total_weight) = subject
        .grades
        .iter()
        .fold((0.0, 0.0), |(sum, weight), g| {
            (sum + g.value * g.weight, weight + g.weight)
        });

    if total_weight > 0.0 {
        round_to_half(weighted_sum / total_weight)
    } else {
        UNGRADED
    }
}

/// Unweighted mean of the final grades of the graded members, rounded to
/// the nearest 0.5.
///
/// Members without grades count neither in the sum nor in the divisor. With
/// no graded member at all the result is [`UNGRADED`].
#[must_use]
pub fn combined_final_grade(combined: &CombinedSubject) -> f64 {
    let (sum, graded) = combined
        .subjects
        .iter()
        .filter(|s| !s.grades.is_empty())
        .fold((0.0, 0_u32), |(sum, n), s| {
            (sum + subject_final_grade(s), n + 1)
        });

    if graded == 0 {
        return UNGRADED;
    }
    round_to_half(sum / f64::from(graded))
}

/// Whether the entity holds at least one grade (directly or via a member).
#[must_use]
pub fn has_any_grade(entity: &CurriculumEntity) -> bool {
    match entity {
        CurriculumEntity::Subject(subject) => !subject.grades.is_empty(),
        CurriculumEntity::Combined(combined) => {
            combined.subjects.iter().any(|s| !s.grades.is_empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Grade;

    fn grade(value: f64, weight: f64) -> Grade {
        Grade {
            id: format!("g-{value}-{weight}"),
            value,
            weight,
            label: None,
        }
    }

    fn subject(id: &str, grades: &[(f64, f64)]) -> Subject {
        Subject {
            id: id.to_string(),
            name: id.to_uppercase(),
            grades: grades.iter().map(|&(v, w)| grade(v, w)).collect(),
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_round_to_half() {
        assert_close(round_to_half(4.25), 4.5);
        assert_close(round_to_half(4.24), 4.0);
        assert_close(round_to_half(4.75), 5.0);
        assert_close(round_to_half(3.667), 3.5);
        assert_close(round_to_half(6.0), 6.0);
        assert_close(round_to_half(0.0), 0.0);
    }

    #[test]
    fn test_round_to_two_decimals() {
        assert_close(round_to_two_decimals(1.005_000_1), 1.01);
        assert_close(round_to_two_decimals(0.1 + 0.2), 0.3);
        assert_close(round_to_two_decimals(2.0), 2.0);
    }

    #[test]
    fn test_weighted_mean() {
        let s = subject("math", &[(5.0, 1.0), (3.0, 2.0)]);
        assert_close(subject_final_grade(&s), 3.5);
    }

    #[test]
    fn test_single_grade() {
        let s = subject("math", &[(4.75, 1.0)]);
        assert_close(subject_final_grade(&s), 5.0);
    }

    #[test]
    fn test_empty_subject_is_ungraded() {
        let s = subject("math", &[]);
        assert_close(final_grade(&s.clone().into()), UNGRADED);
        assert!(!has_any_grade(&s.into()));
    }

    #[test]
    fn test_zero_total_weight_is_ungraded() {
        let s = subject("math", &[(5.0, 0.0)]);
        assert_close(subject_final_grade(&s), UNGRADED);
    }

    #[test]
    fn test_out_of_range_values_are_averaged() {
        let s = subject("math", &[(7.0, 1.0), (9.0, 1.0)]);
        assert_close(subject_final_grade(&s), 8.0);
    }

    #[test]
    fn test_combined_excludes_ungraded_members() {
        let combined = CombinedSubject {
            id: "sci".to_string(),
            name: "Science".to_string(),
            subjects: vec![
                subject("bio", &[(5.0, 1.0)]),
                subject("chem", &[(4.0, 1.0)]),
                subject("phys", &[]),
            ],
        };
        let entity = CurriculumEntity::from(combined);
        assert_close(final_grade(&entity), 4.5);
        assert!(has_any_grade(&entity));
    }

    #[test]
    fn test_combined_single_graded_member() {
        let combined = CombinedSubject {
            id: "sci".to_string(),
            name: "Science".to_string(),
            subjects: vec![
                subject("bio", &[(6.0, 1.0)]),
                subject("chem", &[]),
                subject("phys", &[]),
            ],
        };
        assert_close(combined_final_grade(&combined), 6.0);
    }

    #[test]
    fn test_combined_without_grades_is_ungraded() {
        let combined = CombinedSubject {
            id: "sci".to_string(),
            name: "Science".to_string(),
            subjects: vec![subject("bio", &[]), subject("chem", &[])],
        };
        let grade = combined_final_grade(&combined);
        assert!(!grade.is_nan());
        assert_close(grade, UNGRADED);
        assert!(!has_any_grade(&combined.into()));
    }

    #[test]
    fn test_combined_without_members_is_ungraded() {
        let combined = CombinedSubject {
            id: "empty".to_string(),
            name: "Empty".to_string(),
            subjects: Vec::new(),
        };
        assert_close(combined_final_grade(&combined), UNGRADED);
    }

    #[test]
    fn test_combined_rounds_member_grades_first() {
        // Members round to 4.5 and 5.5 before averaging: (4.5 + 5.5) / 2 = 5.0
        let combined = CombinedSubject {
            id: "lang".to_string(),
            name: "Languages".to_string(),
            subjects: vec![
                subject("de", &[(4.4, 1.0)]),
                subject("it", &[(5.3, 1.0)]),
            ],
        };
        assert_close(combined_final_grade(&combined), 5.0);
    }
}
