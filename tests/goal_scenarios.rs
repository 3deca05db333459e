//! End-to-end goal seeking scenarios

use gradecalc::core::calculator::{
    grade_so_far, is_weight_valid, overall_grade, projected_grade, total_weight, Scope,
};
use gradecalc::core::goal_seeker::{calculate_required_grades, GoalOutcome, GoalSeeker, SeekStrategy};
use gradecalc::core::models::Assessment;

fn midterm_done() -> Vec<Assessment> {
    vec![
        Assessment::new("Midterm", 50.0).graded(80.0),
        Assessment::new("Final", 50.0),
    ]
}

#[test]
fn half_graded_course_converges_near_70() {
    let outcome = calculate_required_grades(&midterm_done(), 75.0);
    let solved = outcome.into_assessments().expect("goal should be reachable");

    assert!((solved[1].grade - 70.0).abs() <= 0.5);
    assert!(solved.iter().all(|a| a.is_complete));
    assert!((projected_grade(&solved) - 75.0).abs() <= 0.1);
}

#[test]
fn fully_weighted_course_is_returned_unchanged() {
    let items = vec![Assessment::new("Everything", 100.0).graded(90.0)];
    assert!(is_weight_valid(&items));
    assert!((overall_grade(&items, Scope::Completed) - 90.0).abs() < f64::EPSILON);

    for goal in [0.0, 50.0, 90.0, 100.0, 150.0] {
        assert_eq!(
            calculate_required_grades(&items, goal),
            GoalOutcome::WeightComplete(items.clone())
        );
    }
}

#[test]
fn goal_above_100_exhausts_the_search() {
    let items = vec![
        Assessment::new("Midterm", 60.0).graded(85.0),
        Assessment::new("Final", 40.0),
    ];
    let outcome = calculate_required_grades(&items, 120.0);

    assert_eq!(outcome, GoalOutcome::Unreachable { iterations: 9999 });
    assert!(outcome.assessments().is_none());
}

#[test]
fn empty_course_computes_zero_everywhere() {
    let items: Vec<Assessment> = Vec::new();

    assert_eq!(total_weight(&items, Scope::All), 0.0);
    assert_eq!(grade_so_far(&items, Scope::Completed), 0.0);
    assert_eq!(overall_grade(&items, Scope::Completed), 0.0);
    assert_eq!(projected_grade(&items), 0.0);
    assert!(!is_weight_valid(&items));
}

#[test]
fn solving_a_solved_course_is_idempotent() {
    let first = calculate_required_grades(&midterm_done(), 75.0)
        .into_assessments()
        .expect("goal should be reachable");

    let second = calculate_required_grades(&first, 75.0);
    assert_eq!(second, GoalOutcome::WeightComplete(first));
}

#[test]
fn strategies_agree_on_reachable_goals() {
    let items = vec![
        Assessment::new("Quizzes", 20.0).graded(95.0),
        Assessment::new("Midterm", 30.0).graded(72.0),
        Assessment::new("Project", 20.0),
        Assessment::new("Final", 30.0),
    ];

    let stepwise = GoalSeeker::new().seek(&items, 80.05);
    let proportional = GoalSeeker::new()
        .with_strategy(SeekStrategy::Proportional)
        .seek(&items, 80.05);

    for outcome in [stepwise, proportional] {
        let solved = outcome.into_assessments().expect("goal should be reachable");
        assert!((projected_grade(&solved) - 80.05).abs() <= 0.1);
        // graded work keeps its grade
        assert!((solved[0].grade - 95.0).abs() < f64::EPSILON);
        assert!((solved[1].grade - 72.0).abs() < f64::EPSILON);
    }
}

#[test]
fn goal_matching_current_grade_needs_no_search() {
    let items = midterm_done();
    assert_eq!(
        calculate_required_grades(&items, 80.0),
        GoalOutcome::AlreadyMet(items)
    );
}
