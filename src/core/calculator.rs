//! Weighted grade calculations
//!
//! Every aggregate is a pure function over a slice of assessments. Invalid or
//! partial weight totals are never errors: they are reported through
//! [`is_weight_valid`] and the aggregates fall back to `0` where a result
//! would be meaningless.

use crate::core::models::{Assessment, Category, Course};

/// Which assessments contribute to an aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only assessments that have been completed
    Completed,
    /// Every assessment, using working grades for incomplete ones
    All,
}

impl Scope {
    const fn includes(self, assessment: &Assessment) -> bool {
        match self {
            Self::Completed => assessment.is_complete,
            Self::All => true,
        }
    }
}

/// Weight total that marks a course's weighting as complete.
pub const FULL_WEIGHT: f64 = 100.0;

/// Round a percentage to 2 decimal places, halves away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn contributing(items: &[Assessment], scope: Scope) -> impl Iterator<Item = &Assessment> {
    items.iter().filter(move |a| scope.includes(a))
}

fn weighted_sum(items: &[Assessment], scope: Scope) -> f64 {
    contributing(items, scope).map(Assessment::weighted_grade).sum()
}

/// Sum of weights of the contributing assessments.
#[must_use]
pub fn total_weight(items: &[Assessment], scope: Scope) -> f64 {
    contributing(items, scope).map(|a| a.weight).sum()
}

/// Whether the completed assessments account for exactly 100 weight points.
///
/// This is the signal that a course's grade is final. The comparison is exact;
/// 99.99 is not valid.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_weight_valid(items: &[Assessment]) -> bool {
    total_weight(items, Scope::Completed) == FULL_WEIGHT
}

/// Final weighted grade, `Σ(grade × weight) / 100`.
///
/// Returns `0` unless [`is_weight_valid`] holds, since a final grade is only
/// meaningful once every weight point has been earned.
#[must_use]
pub fn overall_grade(items: &[Assessment], scope: Scope) -> f64 {
    if !is_weight_valid(items) {
        return 0.0;
    }
    round2(weighted_sum(items, scope) / FULL_WEIGHT)
}

/// In-progress grade normalized by the weight actually contributing.
///
/// Usable before weights reach 100. Returns `0` when nothing contributes.
#[must_use]
pub fn grade_so_far(items: &[Assessment], scope: Scope) -> f64 {
    let weight = total_weight(items, scope);
    if weight == 0.0 {
        return 0.0;
    }
    round2(weighted_sum(items, scope) / weight)
}

/// [`grade_so_far`] restricted to one section.
#[must_use]
pub fn section_grade_so_far(items: &[Assessment], category: Category, scope: Scope) -> f64 {
    let section: Vec<Assessment> = items
        .iter()
        .filter(|a| a.category == category)
        .cloned()
        .collect();
    grade_so_far(&section, scope)
}

/// Hypothetical final grade if every assessment finished at its current grade.
///
/// Uses all assessments and the fixed denominator of 100. Returns `0` when the
/// assessments carry no weight at all. Not rounded.
#[must_use]
pub fn projected_grade(items: &[Assessment]) -> f64 {
    if total_weight(items, Scope::All) == 0.0 {
        return 0.0;
    }
    weighted_sum(items, Scope::All) / FULL_WEIGHT
}

/// Grade figures shown for a course
#[derive(Debug, Clone, PartialEq)]
pub struct GradeSummary {
    /// Grade so far over completed assessments
    pub current_grade: f64,
    /// Final grade, present only once completed weight is exactly 100
    pub final_grade: Option<f64>,
    /// Weight of completed assessments
    pub completed_weight: f64,
    /// Weight of all assessments
    pub planned_weight: f64,
    /// Number of completed assessments
    pub completed_count: usize,
    /// Number of assessments
    pub assessment_count: usize,
    /// Theory section grade so far (dual-section courses only)
    pub theory_grade: Option<f64>,
    /// Lab section grade so far (dual-section courses only)
    pub lab_grade: Option<f64>,
}

impl GradeSummary {
    /// Whether any completed assessment carries weight
    #[must_use]
    pub fn has_graded_work(&self) -> bool {
        self.completed_weight > 0.0
    }

    /// Whether the weighting is complete and the grade is final
    #[must_use]
    pub const fn is_final(&self) -> bool {
        self.final_grade.is_some()
    }

    /// Weight still to be earned, relative to a full 100
    #[must_use]
    pub fn remaining_weight(&self) -> f64 {
        FULL_WEIGHT - self.completed_weight
    }
}

/// Compute the grade summary for a course.
#[must_use]
pub fn summarize(course: &Course) -> GradeSummary {
    let items = &course.assessments;
    let section = |category| {
        course
            .is_dual_section
            .then(|| section_grade_so_far(items, category, Scope::Completed))
    };

    GradeSummary {
        current_grade: grade_so_far(items, Scope::Completed),
        final_grade: is_weight_valid(items).then(|| overall_grade(items, Scope::Completed)),
        completed_weight: total_weight(items, Scope::Completed),
        planned_weight: total_weight(items, Scope::All),
        completed_count: items.iter().filter(|a| a.is_complete).count(),
        assessment_count: items.len(),
        theory_grade: section(Category::Theory),
        lab_grade: section(Category::Lab),
    }
}
