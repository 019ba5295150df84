//! Promotion criteria lookup by school year

use crate::core::models::Year;
use crate::core::promotion::PromotionCriteria;
use serde::{Deserialize, Serialize};

/// Criteria for each school year
///
/// Stored in the `[criteria]` section of the configuration; missing years
/// fall back to [`PromotionCriteria::default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CriteriaTable {
    /// Year 1 criteria
    #[serde(default)]
    pub year1: PromotionCriteria,
    /// Year 2 criteria
    #[serde(default)]
    pub year2: PromotionCriteria,
    /// Year 3 criteria
    #[serde(default)]
    pub year3: PromotionCriteria,
}

impl CriteriaTable {
    /// Criteria that apply to a year
    #[must_use]
    pub const fn for_year(&self, year: Year) -> PromotionCriteria {
        match year {
            Year::First => self.year1,
            Year::Second => self.year2,
            Year::Third => self.year3,
        }
    }

    /// Mutable criteria for a year
    pub fn for_year_mut(&mut self, year: Year) -> &mut PromotionCriteria {
        match year {
            Year::First => &mut self.year1,
            Year::Second => &mut self.year2,
            Year::Third => &mut self.year3,
        }
    }

    /// Read a single criterion by key (`max_failures`, `min_average`, `max_deficit`)
    #[must_use]
    pub fn get(&self, year: Year, field: &str) -> Option<String> {
        let c = self.for_year(year);
        match field {
            "max_failures" => Some(c.max_failures.to_string()),
            "min_average" => Some(c.min_average.to_string()),
            "max_deficit" => Some(c.max_deficit.to_string()),
            _ => None,
        }
    }

    /// Set a single criterion by key
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// as a non-negative number.
    pub fn set(&mut self, year: Year, field: &str, value: &str) -> Result<(), String> {
        let c = self.for_year_mut(year);
        match field {
            "max_failures" => {
                c.max_failures = value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid count for 'max_failures': '{value}'"))?;
            }
            "min_average" => c.min_average = parse_threshold(field, value)?,
            "max_deficit" => c.max_deficit = parse_threshold(field, value)?,
            _ => return Err(format!("Unknown criteria key: '{field}'")),
        }
        Ok(())
    }
}

fn parse_threshold(field: &str, value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| format!("Invalid number for '{field}': '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_every_year() {
        let table = CriteriaTable::default();
        for year in Year::ALL {
            assert_eq!(table.for_year(year), PromotionCriteria::default());
        }
    }

    #[test]
    fn test_set_and_get() {
        let mut table = CriteriaTable::default();
        table.set(Year::Third, "max_failures", "2").unwrap();
        table.set(Year::Third, "min_average", "4.5").unwrap();

        assert_eq!(table.for_year(Year::Third).max_failures, 2);
        assert_eq!(table.get(Year::Third, "min_average").as_deref(), Some("4.5"));
        assert_eq!(table.for_year(Year::First).max_failures, 4);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut table = CriteriaTable::default();
        assert!(table.set(Year::First, "max_failures", "-1").is_err());
        assert!(table.set(Year::First, "max_deficit", "abc").is_err());
        assert!(table.set(Year::First, "max_deficit", "-0.5").is_err());
        assert!(table.set(Year::First, "bogus", "1").is_err());
        assert_eq!(table, CriteriaTable::default());
    }

    #[test]
    fn test_missing_years_use_defaults() {
        let table: CriteriaTable = toml::from_str(
            r"
[year2]
max_failures = 3
min_average = 4.0
max_deficit = 1.5
",
        )
        .unwrap();
        assert_eq!(table.year1, PromotionCriteria::default());
        assert_eq!(table.year2.max_failures, 3);
        assert!((table.year2.max_deficit - 1.5).abs() < f64::EPSILON);
    }
}
