//! Assessment model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Section an assessment belongs to in a dual-section course
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Lecture / theory section
    #[default]
    Theory,
    /// Lab / practical section
    Lab,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Theory => write!(f, "theory"),
            Self::Lab => write!(f, "lab"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "theory" | "lecture" => Ok(Self::Theory),
            "lab" | "practical" => Ok(Self::Lab),
            _ => Err(format!("Unknown assessment category: {s}")),
        }
    }
}

/// A single weighted piece of coursework (exam, lab report, quiz...)
///
/// `grade` is only authoritative once `is_complete` is set. For incomplete
/// assessments it holds a working value used by projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Display name (not required to be unique)
    pub name: String,

    /// Weight in percentage points of the final grade
    pub weight: f64,

    /// Grade as a percentage
    #[serde(default)]
    pub grade: f64,

    /// Theory or lab section
    #[serde(default)]
    pub category: Category,

    /// Whether `grade` is a real, received grade
    #[serde(default)]
    pub is_complete: bool,
}

impl Assessment {
    /// Create a new, incomplete theory assessment with no grade
    ///
    /// # Arguments
    /// * `name` - Display name
    /// * `weight` - Weight in percentage points
    #[must_use]
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            grade: 0.0,
            category: Category::Theory,
            is_complete: false,
        }
    }

    /// Set the received grade and mark the assessment complete
    #[must_use]
    pub fn graded(mut self, grade: f64) -> Self {
        self.grade = grade;
        self.is_complete = true;
        self
    }

    /// Place the assessment in the given section
    #[must_use]
    pub fn in_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Record a received grade on an existing assessment
    pub fn record_grade(&mut self, grade: f64) {
        self.grade = grade;
        self.is_complete = true;
    }

    /// Grade multiplied by weight
    #[must_use]
    pub fn weighted_grade(&self) -> f64 {
        self.grade * self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assessment_is_incomplete_theory() {
        let a = Assessment::new("Midterm", 30.0);
        assert_eq!(a.name, "Midterm");
        assert!((a.weight - 30.0).abs() < f64::EPSILON);
        assert!(a.grade.abs() < f64::EPSILON);
        assert_eq!(a.category, Category::Theory);
        assert!(!a.is_complete);
    }

    #[test]
    fn test_graded_marks_complete() {
        let a = Assessment::new("Lab 1", 10.0)
            .in_category(Category::Lab)
            .graded(85.0);
        assert!(a.is_complete);
        assert_eq!(a.category, Category::Lab);
        assert!((a.weighted_grade() - 850.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_grade() {
        let mut a = Assessment::new("Quiz", 5.0);
        a.record_grade(72.5);
        assert!(a.is_complete);
        assert!((a.grade - 72.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Theory".parse::<Category>(), Ok(Category::Theory));
        assert_eq!("lab".parse::<Category>(), Ok(Category::Lab));
        assert_eq!("practical".parse::<Category>(), Ok(Category::Lab));
        assert!("seminar".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_field_names() {
        let a = Assessment::new("Final", 40.0).in_category(Category::Lab);
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["category"], "lab");
        assert_eq!(json["isComplete"], false);
    }

    #[test]
    fn test_serde_defaults_for_missing_fields() {
        let a: Assessment = serde_json::from_str(r#"{"name":"Essay","weight":15}"#).unwrap();
        assert_eq!(a.category, Category::Theory);
        assert!(!a.is_complete);
        assert!(a.grade.abs() < f64::EPSILON);
    }
}
