//! Grade report generation
//!
//! Renders a single course's assessments, grade summary, and an optional goal
//! projection as Markdown or HTML.

pub mod formats;

use crate::core::calculator::GradeSummary;
use crate::core::goal_seeker::GoalOutcome;
use crate::core::models::{Assessment, Course};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// A goal target and the seeker's answer for it
#[derive(Debug, Clone, Copy)]
pub struct GoalProjection<'a> {
    /// Target final grade
    pub target: f64,
    /// Result of seeking the target
    pub outcome: &'a GoalOutcome,
}

/// Grade an unfinished assessment needs for the goal to be met
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredGrade<'a> {
    /// 1-based assessment number
    pub number: usize,
    /// Assessment name
    pub name: &'a str,
    /// Assessment weight
    pub weight: f64,
    /// Grade needed
    pub grade: f64,
}

/// Pair the course's unfinished assessments with the grades the seeker found.
///
/// Empty unless the outcome is [`GoalOutcome::Reached`].
#[must_use]
pub fn required_grades<'a>(course: &'a Course, outcome: &GoalOutcome) -> Vec<RequiredGrade<'a>> {
    let GoalOutcome::Reached { assessments, .. } = outcome else {
        return Vec::new();
    };
    course
        .assessments
        .iter()
        .zip(assessments)
        .enumerate()
        .filter(|(_, (item, _))| !item.is_complete)
        .map(|(idx, (item, solved))| RequiredGrade {
            number: idx + 1,
            name: &item.name,
            weight: item.weight,
            grade: solved.grade,
        })
        .collect()
}

/// Data context for report generation
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Course being reported
    pub course: &'a Course,
    /// Precomputed grade summary for the course
    pub summary: &'a GradeSummary,
    /// Optional goal projection
    pub goal: Option<GoalProjection<'a>>,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        course: &'a Course,
        summary: &'a GradeSummary,
        goal: Option<GoalProjection<'a>>,
    ) -> Self {
        Self {
            course,
            summary,
            goal,
        }
    }

    /// Human label for the course layout
    #[must_use]
    pub const fn layout_label(&self) -> &'static str {
        if self.course.is_dual_section {
            "Theory / Lab"
        } else {
            "Single section"
        }
    }

    /// Final grade, or a note that the weighting is incomplete
    #[must_use]
    pub fn final_grade_label(&self) -> String {
        self.summary
            .final_grade
            .map_or_else(|| "not final yet".to_string(), percent)
    }

    /// One sentence describing the goal outcome
    #[must_use]
    pub fn goal_message(&self) -> Option<String> {
        let goal = self.goal?;
        let message = match goal.outcome {
            GoalOutcome::WeightComplete(_) => format!(
                "All weight is graded; the final grade is {}.",
                self.final_grade_label()
            ),
            GoalOutcome::AlreadyMet(_) => format!(
                "The current grade of {} already meets the goal of {}.",
                percent(self.summary.current_grade),
                percent(goal.target)
            ),
            GoalOutcome::Reached { .. } => format!(
                "To finish with {}, the remaining assessments need:",
                percent(goal.target)
            ),
            GoalOutcome::Unreachable { .. } => format!(
                "Cannot reach {} with the remaining assessments.",
                percent(goal.target)
            ),
        };
        Some(message)
    }

    /// Grades needed on unfinished work, when the goal was reached
    #[must_use]
    pub fn required_grades(&self) -> Vec<RequiredGrade<'a>> {
        self.goal
            .map(|goal| required_grades(self.course, goal.outcome))
            .unwrap_or_default()
    }
}

/// Format a percentage with two decimals
#[must_use]
pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Grade cell for an assessment: the grade once complete, otherwise "pending"
#[must_use]
pub fn grade_label(assessment: &Assessment) -> String {
    if assessment.is_complete {
        percent(assessment.grade)
    } else {
        "pending".to_string()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
