//! Subject models
//!
//! A year's curriculum is a flat list of [`CurriculumEntity`] values. Each
//! entry is either a leaf [`Subject`] holding grades directly, or a
//! [`CombinedSubject`] grouping leaf subjects (one level of nesting only).

use super::Grade;
use serde::{Deserialize, Serialize};

/// A leaf subject accumulating grades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Subject {
    /// Subject identifier (e.g., "advanced-math")
    pub id: String,

    /// Display name (e.g., "Advanced Math")
    pub name: String,

    /// Grades in entry order
    pub grades: Vec<Grade>,
}

impl Subject {
    /// Create an ungraded subject
    #[must_use]
    pub const fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            grades: Vec::new(),
        }
    }

    /// Create an ungraded subject whose id is derived from its name
    ///
    /// The id is the lower-cased name with whitespace runs replaced by `-`
    /// (e.g., "Advanced Math" becomes "advanced-math").
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::new(slugify(name), name.to_string())
    }

    /// Find a grade by id
    #[must_use]
    pub fn grade(&self, grade_id: &str) -> Option<&Grade> {
        self.grades.iter().find(|g| g.id == grade_id)
    }
}

/// A composite subject whose final grade averages its members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CombinedSubject {
    /// Subject identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Member subjects
    pub subjects: Vec<Subject>,
}

impl CombinedSubject {
    /// Create a combined subject from a name and its member subject names
    #[must_use]
    pub fn from_names(name: &str, members: &[&str]) -> Self {
        Self {
            id: slugify(name),
            name: name.to_string(),
            subjects: members.iter().map(|m| Subject::from_name(m)).collect(),
        }
    }
}

/// An entry in a year's curriculum
///
/// On the wire the two variants are told apart by their fields: `grades`
/// for a subject, `subjects` for a combined subject. An object carrying
/// both (or neither) is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurriculumEntity {
    /// Leaf subject
    Subject(Subject),
    /// Composite of leaf subjects
    Combined(CombinedSubject),
}

impl CurriculumEntity {
    /// Entity id
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Subject(s) => &s.id,
            Self::Combined(c) => &c.id,
        }
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Subject(s) => &s.name,
            Self::Combined(c) => &c.name,
        }
    }

    /// Number of grades held directly or by members
    #[must_use]
    pub fn grade_count(&self) -> usize {
        match self {
            Self::Subject(s) => s.grades.len(),
            Self::Combined(c) => c.subjects.iter().map(|s| s.grades.len()).sum(),
        }
    }

    /// Iterate over every leaf subject (the subject itself, or the members)
    pub fn leaves(&self) -> Box<dyn Iterator<Item = &Subject> + '_> {
        match self {
            Self::Subject(s) => Box::new(std::iter::once(s)),
            Self::Combined(c) => Box::new(c.subjects.iter()),
        }
    }

    /// Find a leaf subject by id, looking into combined members
    pub fn leaf_mut(&mut self, subject_id: &str) -> Option<&mut Subject> {
        match self {
            Self::Subject(s) => (s.id == subject_id).then_some(s),
            Self::Combined(c) => c.subjects.iter_mut().find(|s| s.id == subject_id),
        }
    }

    /// Copy of this entity with every grade removed
    #[must_use]
    pub fn without_grades(&self) -> Self {
        match self {
            Self::Subject(s) => Self::Subject(Subject::new(s.id.clone(), s.name.clone())),
            Self::Combined(c) => Self::Combined(CombinedSubject {
                id: c.id.clone(),
                name: c.name.clone(),
                subjects: c
                    .subjects
                    .iter()
                    .map(|s| Subject::new(s.id.clone(), s.name.clone()))
                    .collect(),
            }),
        }
    }
}

impl From<Subject> for CurriculumEntity {
    fn from(subject: Subject) -> Self {
        Self::Subject(subject)
    }
}

impl From<CombinedSubject> for CurriculumEntity {
    fn from(subject: CombinedSubject) -> Self {
        Self::Combined(subject)
    }
}

fn slugify(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
