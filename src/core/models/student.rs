//! Student data model
//!
//! [`StudentData`] is the whole persisted document: onboarding info, the
//! active year, the year-3 direction and every year's subject list.

use super::CurriculumEntity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// School year (1, 2 or 3); serialized as a plain number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Year {
    /// First year
    First,
    /// Second year
    Second,
    /// Third year (subjects depend on the chosen direction)
    Third,
}

impl Year {
    /// All years in order
    pub const ALL: [Self; 3] = [Self::First, Self::Second, Self::Third];

    /// Numeric form (1-3)
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }
}

impl TryFrom<u8> for Year {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            _ => Err(format!("Invalid year: {value} (expected 1, 2 or 3)")),
        }
    }
}

impl From<Year> for u8 {
    fn from(year: Year) -> Self {
        year.number()
    }
}

impl FromStr for Year {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid year: '{s}' (expected 1, 2 or 3)"))?;
        Self::try_from(n)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// School division
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Division {
    /// Fachmittelschule
    #[serde(rename = "FMS")]
    Fms,
    /// Gymnasium
    Gymnasium,
}

impl FromStr for Division {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fms" => Ok(Self::Fms),
            "gymnasium" | "gym" => Ok(Self::Gymnasium),
            _ => Err(format!("Unknown division: '{s}' (expected FMS or Gymnasium)")),
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fms => write!(f, "FMS"),
            Self::Gymnasium => write!(f, "Gymnasium"),
        }
    }
}

/// Onboarding information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    /// Student name
    pub name: String,
    /// Division the student attends
    pub division: Division,
}

/// Subjects of one school year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearData {
    /// Curriculum entries
    pub subjects: Vec<CurriculumEntity>,
}

/// Per-year data, keyed `"1"`, `"2"`, `"3"` on the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Years {
    /// Year 1
    #[serde(rename = "1")]
    pub first: YearData,
    /// Year 2
    #[serde(rename = "2")]
    pub second: YearData,
    /// Year 3
    #[serde(rename = "3")]
    pub third: YearData,
}

impl Years {
    /// Data for a year
    #[must_use]
    pub const fn get(&self, year: Year) -> &YearData {
        match year {
            Year::First => &self.first,
            Year::Second => &self.second,
            Year::Third => &self.third,
        }
    }

    /// Mutable data for a year
    pub fn get_mut(&mut self, year: Year) -> &mut YearData {
        match year {
            Year::First => &mut self.first,
            Year::Second => &mut self.second,
            Year::Third => &mut self.third,
        }
    }
}

/// The persisted student document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentData {
    /// Onboarding info; `None` until onboarding completes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_info: Option<StudentInfo>,

    /// Year currently shown
    pub current_year: Year,

    /// Direction id chosen for year 3
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year3_direction: Option<String>,

    /// Subject lists per year
    pub years: Years,
}

impl StudentData {
    /// Whether onboarding has been completed
    #[must_use]
    pub const fn is_onboarded(&self) -> bool {
        self.student_info.is_some()
    }
}
