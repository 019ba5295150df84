//! Subject templates for each school year
//!
//! Years 1 and 2 share a fixed subject list. Year 3 subjects depend on the
//! direction (track) the student picks.

use crate::core::models::{
    CombinedSubject, CurriculumEntity, StudentData, Subject, Year, YearData, Years,
};

/// Subjects taught in years 1 and 2
const CORE_SUBJECTS: [&str; 8] = [
    "French",
    "English",
    "Biology",
    "Math",
    "Physics",
    "Chemistry",
    "History",
    "Geography",
];

/// A year-3 track with its own subject list
#[derive(Debug, Clone, PartialEq)]
pub struct Direction {
    /// Direction identifier (e.g., "direction-a")
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Subject template
    pub subjects: Vec<CurriculumEntity>,
}

/// Template subjects for a year (empty for year 3, which uses directions)
#[must_use]
pub fn default_subjects(year: Year) -> Vec<CurriculumEntity> {
    match year {
        Year::First | Year::Second => CORE_SUBJECTS
            .iter()
            .map(|name| Subject::from_name(name).into())
            .collect(),
        Year::Third => Vec::new(),
    }
}

/// All year-3 directions
#[must_use]
pub fn year3_directions() -> Vec<Direction> {
    vec![
        Direction {
            id: "direction-a",
            name: "Direction A",
            subjects: leaves(&[
                "Advanced Math",
                "Physics",
                "Chemistry",
                "Biology",
                "French",
                "English",
            ]),
        },
        Direction {
            id: "direction-b",
            name: "Direction B",
            subjects: leaves(&["Economics", "Business", "Math", "History", "French", "English"]),
        },
        Direction {
            id: "direction-c",
            name: "Direction C",
            subjects: vec![
                Subject::from_name("Literature").into(),
                Subject::from_name("History").into(),
                Subject::from_name("Philosophy").into(),
                CombinedSubject::from_names("Languages", &["German", "Italian"]).into(),
                Subject::from_name("French").into(),
                Subject::from_name("English").into(),
            ],
        },
    ]
}

/// Look up a direction by id
#[must_use]
pub fn find_direction(direction_id: &str) -> Option<Direction> {
    year3_directions()
        .into_iter()
        .find(|d| d.id == direction_id)
}

fn leaves(names: &[&str]) -> Vec<CurriculumEntity> {
    names
        .iter()
        .map(|name| Subject::from_name(name).into())
        .collect()
}

/// Fresh student data: year 1 active, years 1 and 2 provisioned from the
/// templates, year 3 empty until a direction is chosen.
#[must_use]
pub fn initialize_student_data() -> StudentData {
    StudentData {
        student_info: None,
        current_year: Year::First,
        year3_direction: None,
        years: Years {
            first: YearData {
                subjects: default_subjects(Year::First),
            },
            second: YearData {
                subjects: default_subjects(Year::Second),
            },
            third: YearData::default(),
        },
    }
}

/// Subjects shown and evaluated for a year
///
/// For year 3 with a known direction, the direction's template is used and
/// each entry is replaced by the stored entity with the same id, so grades
/// survive. Otherwise the stored list is used, or the template when nothing
/// is stored yet.
#[must_use]
pub fn subjects_for_year(data: &StudentData, year: Year) -> Vec<CurriculumEntity> {
    let stored = &data.years.get(year).subjects;

    if year == Year::Third {
        if let Some(direction) = data.year3_direction.as_deref().and_then(find_direction) {
            return direction
                .subjects
                .into_iter()
                .map(|template| {
                    stored
                        .iter()
                        .find(|s| s.id() == template.id())
                        .cloned()
                        .unwrap_or(template)
                })
                .collect();
        }
    }

    if stored.is_empty() {
        default_subjects(year)
    } else {
        stored.clone()
    }
}
