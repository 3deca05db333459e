//! Goal seeking: back-solve the grades needed on unfinished work
//!
//! Given a target final grade, the seeker adjusts the working grades of every
//! incomplete assessment until the projected final grade lands within a
//! tolerance of the target, or reports that the target cannot be reached.
//!
//! The caller's assessments are never modified; the seeker works on a copy
//! and hands it back on success.

use crate::core::calculator::{self, Scope};
use crate::core::config::SolverConfig;
use crate::core::models::Assessment;
use crate::debug;
use std::fmt;
use std::str::FromStr;

/// Accepted distance between the projected grade and the goal.
pub const DEFAULT_TOLERANCE: f64 = 0.1;
/// Per-round adjustment applied to every incomplete assessment.
pub const DEFAULT_STEP: f64 = 0.5;
/// Rounds attempted before the goal is declared unreachable.
pub const DEFAULT_MAX_ITERATIONS: usize = 9999;
/// Starting grade for incomplete assessments that have none.
pub const DEFAULT_INITIAL_GUESS: f64 = 50.0;

const MIN_GRADE: f64 = 0.0;
const MAX_GRADE: f64 = 100.0;

/// How the required grades are searched for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeekStrategy {
    /// Move every incomplete grade together by a fixed step each round
    #[default]
    Stepwise,
    /// Solve directly for one shared grade across the incomplete weight
    Proportional,
}

impl FromStr for SeekStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stepwise" | "step" => Ok(Self::Stepwise),
            "proportional" | "closed-form" | "exact" => Ok(Self::Proportional),
            _ => Err(format!("Unknown solver strategy: {s}")),
        }
    }
}

impl fmt::Display for SeekStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stepwise => write!(f, "stepwise"),
            Self::Proportional => write!(f, "proportional"),
        }
    }
}

/// Result of a goal-seeking run
#[derive(Debug, Clone, PartialEq)]
pub enum GoalOutcome {
    /// Completed weight already totals 100; there is nothing left to solve.
    WeightComplete(Vec<Assessment>),
    /// The grade so far is already within tolerance of the goal.
    AlreadyMet(Vec<Assessment>),
    /// Grades were found. Formerly incomplete assessments are now complete
    /// and carry the grade they need.
    Reached {
        /// Adjusted copy of the assessments
        assessments: Vec<Assessment>,
        /// Rounds taken to converge
        iterations: usize,
    },
    /// The goal cannot be reached with this assessment structure.
    Unreachable {
        /// Rounds attempted before giving up
        iterations: usize,
    },
}

impl GoalOutcome {
    /// Whether the goal is satisfied (everything except [`GoalOutcome::Unreachable`])
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Unreachable { .. })
    }

    /// The resulting assessments, or `None` when the goal is unreachable
    #[must_use]
    pub fn assessments(&self) -> Option<&[Assessment]> {
        match self {
            Self::WeightComplete(items) | Self::AlreadyMet(items) => Some(items),
            Self::Reached { assessments, .. } => Some(assessments),
            Self::Unreachable { .. } => None,
        }
    }

    /// Consume the outcome, returning the assessments unless unreachable
    #[must_use]
    pub fn into_assessments(self) -> Option<Vec<Assessment>> {
        match self {
            Self::WeightComplete(items) | Self::AlreadyMet(items) => Some(items),
            Self::Reached { assessments, .. } => Some(assessments),
            Self::Unreachable { .. } => None,
        }
    }
}

/// Iterative solver for the grades required to reach a target
#[derive(Debug, Clone, PartialEq)]
pub struct GoalSeeker {
    /// Accepted distance between projection and goal
    pub tolerance: f64,
    /// Stepwise adjustment per round
    pub step: f64,
    /// Round cap for the stepwise search
    pub max_iterations: usize,
    /// Starting grade for incomplete assessments at 0
    pub initial_guess: f64,
    /// Search strategy
    pub strategy: SeekStrategy,
}

impl Default for GoalSeeker {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            step: DEFAULT_STEP,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_guess: DEFAULT_INITIAL_GUESS,
            strategy: SeekStrategy::Stepwise,
        }
    }
}

impl From<&SolverConfig> for GoalSeeker {
    fn from(config: &SolverConfig) -> Self {
        let defaults = Self::default();
        Self {
            tolerance: positive_or(config.tolerance, defaults.tolerance),
            step: positive_or(config.step, defaults.step),
            max_iterations: if config.max_iterations == 0 {
                defaults.max_iterations
            } else {
                config.max_iterations
            },
            initial_guess: defaults.initial_guess,
            strategy: config.strategy.parse().unwrap_or(defaults.strategy),
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        fallback
    }
}

impl GoalSeeker {
    /// Create a seeker with the default parameters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different search strategy
    #[must_use]
    pub const fn with_strategy(mut self, strategy: SeekStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Find the grades needed on incomplete assessments to reach `goal`.
    ///
    /// `goal` is not range-checked; goals outside `[0, 100]` simply come back
    /// as [`GoalOutcome::Unreachable`] when no valid grades achieve them.
    #[must_use]
    pub fn seek(&self, items: &[Assessment], goal: f64) -> GoalOutcome {
        if calculator::is_weight_valid(items) {
            debug!("Goal seek skipped: completed weight already totals 100");
            return GoalOutcome::WeightComplete(items.to_vec());
        }

        let so_far = calculator::grade_so_far(items, Scope::Completed);
        if (goal - so_far).abs() <= self.tolerance {
            debug!("Goal {goal} already met by grade so far {so_far}");
            return GoalOutcome::AlreadyMet(items.to_vec());
        }

        let outcome = match self.strategy {
            SeekStrategy::Stepwise => self.seek_stepwise(items.to_vec(), goal),
            SeekStrategy::Proportional => self.seek_proportional(items.to_vec(), goal),
        };

        match &outcome {
            GoalOutcome::Reached { iterations, .. } => {
                debug!("Goal {goal} reached after {iterations} round(s) ({})", self.strategy);
            }
            GoalOutcome::Unreachable { iterations } => {
                debug!("Goal {goal} unreachable after {iterations} round(s) ({})", self.strategy);
            }
            _ => {}
        }
        outcome
    }

    fn within_tolerance(&self, goal: f64, projected: f64) -> bool {
        (goal - projected).abs() <= self.tolerance
    }

    fn seek_stepwise(&self, mut working: Vec<Assessment>, goal: f64) -> GoalOutcome {
        for item in working.iter_mut().filter(|a| !a.is_complete) {
            if item.grade == 0.0 {
                item.grade = self.initial_guess;
            }
        }

        let mut projected = calculator::projected_grade(&working);
        let mut iterations = 0;
        while !self.within_tolerance(goal, projected) && iterations < self.max_iterations {
            let delta = if goal > projected {
                self.step
            } else {
                -self.step
            };
            for item in working.iter_mut().filter(|a| !a.is_complete) {
                let next = item.grade + delta;
                if (MIN_GRADE..=MAX_GRADE).contains(&next) {
                    item.grade = next;
                }
            }
            projected = calculator::projected_grade(&working);
            iterations += 1;
        }

        if self.within_tolerance(goal, projected) {
            GoalOutcome::Reached {
                assessments: complete_all(working),
                iterations,
            }
        } else {
            GoalOutcome::Unreachable { iterations }
        }
    }

    fn seek_proportional(&self, mut working: Vec<Assessment>, goal: f64) -> GoalOutcome {
        let earned: f64 = working
            .iter()
            .filter(|a| a.is_complete)
            .map(Assessment::weighted_grade)
            .sum();
        let open_weight: f64 = working
            .iter()
            .filter(|a| !a.is_complete)
            .map(|a| a.weight)
            .sum();

        if open_weight == 0.0 {
            return GoalOutcome::Unreachable { iterations: 0 };
        }

        let required = calculator::round2(goal.mul_add(calculator::FULL_WEIGHT, -earned) / open_weight);
        if !(MIN_GRADE..=MAX_GRADE).contains(&required) {
            return GoalOutcome::Unreachable { iterations: 1 };
        }

        for item in working.iter_mut().filter(|a| !a.is_complete) {
            item.grade = required;
        }

        if self.within_tolerance(goal, calculator::projected_grade(&working)) {
            GoalOutcome::Reached {
                assessments: complete_all(working),
                iterations: 1,
            }
        } else {
            GoalOutcome::Unreachable { iterations: 1 }
        }
    }
}

fn complete_all(mut working: Vec<Assessment>) -> Vec<Assessment> {
    for item in &mut working {
        item.is_complete = true;
    }
    working
}

/// Find the grades needed to reach `goal` with the default stepwise seeker.
#[must_use]
pub fn calculate_required_grades(items: &[Assessment], goal: f64) -> GoalOutcome {
    GoalSeeker::default().seek(items, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Category;

    fn half_done() -> Vec<Assessment> {
        vec![
            Assessment::new("Midterm", 50.0).graded(80.0),
            Assessment::new("Final", 50.0),
        ]
    }

    #[test]
    fn test_reaches_goal_stepwise() {
        let outcome = calculate_required_grades(&half_done(), 75.0);
        let GoalOutcome::Reached {
            assessments,
            iterations,
        } = outcome
        else {
            panic!("expected Reached, got {outcome:?}");
        };
        assert_eq!(iterations, 40);
        assert!((assessments[1].grade - 70.0).abs() <= 0.5);
        assert!(assessments.iter().all(|a| a.is_complete));
        assert!((calculator::projected_grade(&assessments) - 75.0).abs() <= 0.1);
    }

    #[test]
    fn test_steps_downward_when_goal_is_lower() {
        let outcome = calculate_required_grades(&half_done(), 50.0);
        let items = outcome.into_assessments().expect("reachable");
        // 40 + 0.5 * g = 50
        assert!((items[1].grade - 20.0).abs() <= 0.5);
    }

    #[test]
    fn test_caller_items_are_not_modified() {
        let items = half_done();
        let before = items.clone();
        let _ = calculate_required_grades(&items, 75.0);
        assert_eq!(items, before);
    }

    #[test]
    fn test_weight_complete_short_circuit() {
        let items = vec![Assessment::new("Only", 100.0).graded(90.0)];
        let outcome = calculate_required_grades(&items, 40.0);
        assert_eq!(outcome, GoalOutcome::WeightComplete(items));
        assert!(outcome.is_success());
    }

    #[test]
    fn test_already_met_short_circuit_keeps_items_incomplete() {
        let items = half_done();
        let outcome = calculate_required_grades(&items, 80.05);
        assert_eq!(outcome, GoalOutcome::AlreadyMet(items));
    }

    #[test]
    fn test_preset_nonzero_grade_is_starting_point() {
        let mut items = half_done();
        items[1].grade = 70.0;
        let outcome = calculate_required_grades(&items, 75.0);
        assert!(matches!(
            outcome,
            GoalOutcome::Reached { iterations: 0, .. }
        ));
    }

    #[test]
    fn test_unreachable_above_100() {
        let items = vec![
            Assessment::new("Midterm", 60.0).graded(50.0),
            Assessment::new("Final", 30.0),
        ];
        let outcome = calculate_required_grades(&items, 101.0);
        assert_eq!(
            outcome,
            GoalOutcome::Unreachable {
                iterations: DEFAULT_MAX_ITERATIONS
            }
        );
        assert!(!outcome.is_success());
        assert!(outcome.assessments().is_none());
    }

    #[test]
    fn test_out_of_range_steps_are_skipped() {
        let items = vec![
            Assessment::new("Done", 40.0).graded(100.0),
            Assessment::new("Nearly maxed", 30.0),
            Assessment::new("Fresh", 30.0),
        ];
        let mut seeded = items;
        seeded[1].grade = 99.8;
        // the 99.8 item cannot step past 100, so only "Fresh" keeps climbing
        let outcome = GoalSeeker::new().seek(&seeded, 95.0);
        let result = outcome.into_assessments().expect("reachable");
        assert!((result[1].grade - 99.8).abs() < 1e-9);
        assert!(result[2].grade <= 100.0);
        assert!((calculator::projected_grade(&result) - 95.0).abs() <= 0.1);
    }

    #[test]
    fn test_small_iteration_cap_gives_up() {
        let seeker = GoalSeeker {
            max_iterations: 3,
            ..GoalSeeker::default()
        };
        let outcome = seeker.seek(&half_done(), 90.0);
        assert_eq!(outcome, GoalOutcome::Unreachable { iterations: 3 });
    }

    #[test]
    fn test_proportional_solves_in_one_round() {
        let items = vec![
            Assessment::new("Midterm", 40.0).graded(70.0),
            Assessment::new("Project", 20.0).in_category(Category::Lab),
            Assessment::new("Final", 40.0),
        ];
        let outcome = GoalSeeker::new()
            .with_strategy(SeekStrategy::Proportional)
            .seek(&items, 82.0);
        let GoalOutcome::Reached {
            assessments,
            iterations,
        } = outcome
        else {
            panic!("expected Reached, got {outcome:?}");
        };
        assert_eq!(iterations, 1);
        // (8200 - 2800) / 60 = 90
        assert!((assessments[1].grade - 90.0).abs() < 1e-9);
        assert!((assessments[2].grade - 90.0).abs() < 1e-9);
        assert!(assessments.iter().all(|a| a.is_complete));
    }

    #[test]
    fn test_proportional_reaches_goal_stepwise_oscillates_past() {
        // open weight 60 moves the projection 0.3 per round, wider than the
        // 0.2 acceptance window around the goal
        let items = vec![
            Assessment::new("Midterm", 40.0).graded(70.0),
            Assessment::new("Project", 30.0),
            Assessment::new("Final", 30.0),
        ];
        let stepwise = GoalSeeker::new().seek(&items, 61.15);
        assert_eq!(
            stepwise,
            GoalOutcome::Unreachable {
                iterations: DEFAULT_MAX_ITERATIONS
            }
        );

        let proportional = GoalSeeker::new()
            .with_strategy(SeekStrategy::Proportional)
            .seek(&items, 61.15);
        let result = proportional.into_assessments().expect("reachable");
        assert!((result[1].grade - 55.25).abs() < 1e-9);
    }

    #[test]
    fn test_proportional_unreachable() {
        let outcome = GoalSeeker::new()
            .with_strategy(SeekStrategy::Proportional)
            .seek(&half_done(), 95.0);
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_proportional_without_open_weight() {
        let items = vec![Assessment::new("Midterm", 40.0).graded(70.0)];
        let outcome = GoalSeeker::new()
            .with_strategy(SeekStrategy::Proportional)
            .seek(&items, 90.0);
        assert_eq!(outcome, GoalOutcome::Unreachable { iterations: 0 });
    }

    #[test]
    fn test_strategy_parse_and_display() {
        assert_eq!("Stepwise".parse::<SeekStrategy>(), Ok(SeekStrategy::Stepwise));
        assert_eq!(
            "proportional".parse::<SeekStrategy>(),
            Ok(SeekStrategy::Proportional)
        );
        assert!("newton".parse::<SeekStrategy>().is_err());
        assert_eq!(SeekStrategy::Proportional.to_string(), "proportional");
    }

    #[test]
    fn test_from_solver_config_falls_back_on_invalid_values() {
        let config = SolverConfig {
            tolerance: 0.0,
            step: 0.25,
            max_iterations: 0,
            strategy: "bogus".to_string(),
        };
        let seeker = GoalSeeker::from(&config);
        assert!((seeker.tolerance - DEFAULT_TOLERANCE).abs() < f64::EPSILON);
        assert!((seeker.step - 0.25).abs() < f64::EPSILON);
        assert_eq!(seeker.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(seeker.strategy, SeekStrategy::Stepwise);
    }
}
