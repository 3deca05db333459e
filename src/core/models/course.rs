//! Course model

use super::Assessment;
use crate::core::calculator::{self, GradeSummary};
use serde::{Deserialize, Serialize};

/// Represents a course and its weighted assessments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Course code (e.g., "CS2510", "PHYS 1151")
    pub code: String,

    /// Whether theory and lab sections are tracked and reported separately
    #[serde(default)]
    pub is_dual_section: bool,

    /// Assessments in display order
    #[serde(default)]
    pub assessments: Vec<Assessment>,
}

impl Course {
    /// Create a new course with no assessments
    ///
    /// # Arguments
    /// * `code` - Course code
    /// * `is_dual_section` - Report theory and lab sections separately
    #[must_use]
    pub fn new(code: impl Into<String>, is_dual_section: bool) -> Self {
        Self {
            code: code.into(),
            is_dual_section,
            assessments: Vec::new(),
        }
    }

    /// Create a course with an initial list of assessments
    #[must_use]
    pub fn with_assessments(
        code: impl Into<String>,
        is_dual_section: bool,
        assessments: Vec<Assessment>,
    ) -> Self {
        Self {
            code: code.into(),
            is_dual_section,
            assessments,
        }
    }

    /// Append an assessment
    pub fn add_assessment(&mut self, assessment: Assessment) {
        self.assessments.push(assessment);
    }

    /// Remove the assessment at `index`, returning it if the index was valid
    pub fn remove_assessment(&mut self, index: usize) -> Option<Assessment> {
        (index < self.assessments.len()).then(|| self.assessments.remove(index))
    }

    /// Get the assessment at `index`
    #[must_use]
    pub fn assessment(&self, index: usize) -> Option<&Assessment> {
        self.assessments.get(index)
    }

    /// Get a mutable reference to the assessment at `index`
    pub fn assessment_mut(&mut self, index: usize) -> Option<&mut Assessment> {
        self.assessments.get_mut(index)
    }

    /// Number of assessments
    #[must_use]
    pub fn assessment_count(&self) -> usize {
        self.assessments.len()
    }

    /// Whether `code` refers to this course (case- and whitespace-insensitive)
    #[must_use]
    pub fn matches_code(&self, code: &str) -> bool {
        normalize_code(&self.code) == normalize_code(code)
    }

    /// Compute the grade summary for this course
    #[must_use]
    pub fn summary(&self) -> GradeSummary {
        calculator::summarize(self)
    }
}

fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}
