//! Aggregation and promotion scenarios

use grade_tracker::core::aggregate::{final_grade, round_to_half, UNGRADED};
use grade_tracker::core::models::{CombinedSubject, CurriculumEntity, Grade, GradeInput, Subject};
use grade_tracker::core::promotion::{evaluate, PromotionCriteria};

fn grade(value: f64, weight: f64) -> Grade {
    Grade::new(GradeInput::new(value).with_weight(weight)).unwrap()
}

fn subject(name: &str, grades: &[(f64, f64)]) -> Subject {
    let mut subject = Subject::from_name(name);
    subject.grades = grades.iter().map(|&(v, w)| grade(v, w)).collect();
    subject
}

fn graded(name: &str, value: f64) -> CurriculumEntity {
    subject(name, &[(value, 1.0)]).into()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn weighted_mean_is_rounded_to_half() {
    let math: CurriculumEntity = subject("Math", &[(5.0, 1.0), (3.0, 2.0)]).into();
    assert!(close(final_grade(&math), 3.5));
}

#[test]
fn empty_subject_is_excluded() {
    let entities = vec![graded("Math", 5.0), subject("Art", &[]).into()];
    assert!(close(final_grade(&entities[1]), UNGRADED));

    let status = evaluate(&entities, &PromotionCriteria::default());
    assert!(close(status.criteria.average.value, 5.0));
    assert_eq!(status.criteria.failures.count, 0);
}

#[test]
fn combined_subject_skips_ungraded_members() {
    let languages = CombinedSubject {
        id: "languages".to_string(),
        name: "Languages".to_string(),
        subjects: vec![
            subject("German", &[(5.0, 1.0)]),
            subject("Italian", &[(4.0, 1.0)]),
            subject("Spanish", &[]),
        ],
    };
    assert!(close(final_grade(&languages.into()), 4.5));
}

#[test]
fn combined_subject_without_grades_is_zero() {
    let languages = CombinedSubject::from_names("Languages", &["German", "Italian"]);
    let value = final_grade(&languages.into());
    assert!(!value.is_nan());
    assert!(close(value, UNGRADED));
}

#[test]
fn promotion_passes() {
    let entities = vec![
        graded("Math", 5.0),
        graded("French", 4.5),
        graded("English", 3.5),
    ];
    let status = evaluate(&entities, &PromotionCriteria::default());

    assert_eq!(status.criteria.failures.count, 1);
    assert!(close(status.criteria.average.value, 4.5));
    assert!(close(status.criteria.deficit.value, 0.5));
    assert!(status.is_passing);
}

#[test]
fn promotion_fails_on_average_and_deficit() {
    let entities = vec![
        graded("Math", 2.0),
        graded("French", 2.0),
        graded("English", 6.0),
    ];
    let status = evaluate(&entities, &PromotionCriteria::default());

    assert_eq!(status.criteria.failures.count, 2);
    assert!(status.criteria.failures.passed);
    assert!(close(status.criteria.average.value, 3.5));
    assert!(!status.criteria.average.passed);
    assert!(close(status.criteria.deficit.value, 4.0));
    assert!(!status.criteria.deficit.passed);
    assert!(!status.is_passing);
}

#[test]
fn evaluation_is_repeatable() {
    let entities = vec![graded("Math", 4.75), graded("French", 3.25)];
    let criteria = PromotionCriteria::default();
    assert_eq!(evaluate(&entities, &criteria), evaluate(&entities, &criteria));
}

#[test]
fn quarter_boundary_rounds_up() {
    assert!(close(round_to_half(4.25), 4.5));
    assert!(close(round_to_half(4.24), 4.0));
}

#[test]
fn no_grades_is_vacuously_passing() {
    let status = evaluate(&[], &PromotionCriteria::default());
    assert!(!status.has_grades);
    assert!(status.is_passing);
    assert_eq!(status.criteria.failures.count, 0);
    assert!(close(status.criteria.average.value, 0.0));
    assert!(close(status.criteria.deficit.value, 0.0));
}

#[test]
fn custom_criteria_are_honoured() {
    let entities = vec![graded("Math", 3.5), graded("French", 5.0)];
    let strict = PromotionCriteria {
        max_failures: 0,
        min_average: 4.0,
        max_deficit: 2.0,
    };
    let status = evaluate(&entities, &strict);
    assert!(!status.criteria.failures.passed);
    assert!(!status.is_passing);
}
