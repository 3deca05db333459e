//! Goal command handler
//!
//! Projects the grades needed on unfinished assessments without saving them.

use super::find_course;
use gradecalc::config::Config;
use gradecalc::core::goal_seeker::{GoalOutcome, GoalSeeker, SeekStrategy};
use gradecalc::core::report::{percent, required_grades};
use gradecalc::core::store::CourseStore;
use gradecalc::{info, verbose};

/// Build the seeker from config, letting a CLI strategy win
pub fn seeker_for(config: &Config, strategy: Option<SeekStrategy>) -> GoalSeeker {
    let seeker = GoalSeeker::from(&config.solver);
    match strategy {
        Some(strategy) => seeker.with_strategy(strategy),
        None => seeker,
    }
}

/// Run the goal command.
pub fn run(
    store: &CourseStore,
    code: &str,
    target: f64,
    strategy: Option<SeekStrategy>,
    config: &Config,
) -> Result<(), String> {
    let course = find_course(store, code)?;
    let seeker = seeker_for(config, strategy);
    verbose!(
        "Seeking {target} for {} ({} strategy, tolerance {}, step {})",
        course.code,
        seeker.strategy,
        seeker.tolerance,
        seeker.step
    );

    let outcome = seeker.seek(&course.assessments, target);
    let summary = course.summary();

    match &outcome {
        GoalOutcome::WeightComplete(_) => {
            let final_grade = summary.final_grade.unwrap_or(summary.current_grade);
            println!(
                "✓ All weight in {} is graded; the final grade is {}",
                course.code,
                percent(final_grade)
            );
        }
        GoalOutcome::AlreadyMet(_) => {
            println!(
                "✓ The current grade of {} already meets {}",
                percent(summary.current_grade),
                percent(target)
            );
        }
        GoalOutcome::Reached { iterations, .. } => {
            info!("Goal {target} for {} reached in {iterations} round(s)", course.code);
            println!("\nTo finish {} with {}:\n", course.code, percent(target));
            for row in required_grades(course, &outcome) {
                println!(
                    "  {:>2}. {:<24} {:>6.2}%  needs {}",
                    row.number,
                    row.name,
                    row.weight,
                    percent(row.grade)
                );
            }
            verbose!("Search finished after {iterations} round(s)");
        }
        GoalOutcome::Unreachable { iterations } => {
            info!(
                "Goal {target} for {} unreachable after {iterations} round(s)",
                course.code
            );
            println!(
                "✗ Cannot reach this goal: {} in {} is out of reach with the remaining assessments",
                percent(target),
                course.code
            );
        }
    }
    Ok(())
}
