//! Course command handler

use super::{confirm, find_course, save_store, store_error};
use crate::args::CourseSubcommand;
use gradecalc::core::models::{Category, Course};
use gradecalc::core::report::{grade_label, percent};
use gradecalc::core::store::CourseStore;
use gradecalc::info;

/// Dispatch course subcommands
pub fn run(subcommand: CourseSubcommand, store: &mut CourseStore) -> Result<(), String> {
    match subcommand {
        CourseSubcommand::List => {
            list(store);
            Ok(())
        }
        CourseSubcommand::Add { code, dual } => add(store, &code, dual),
        CourseSubcommand::Remove { code, yes } => remove(store, &code, yes),
        CourseSubcommand::Show { code } => {
            print_course(find_course(store, &code)?);
            Ok(())
        }
    }
}

fn list(store: &CourseStore) {
    if store.is_empty() {
        println!("No courses yet. Add one with `gradecalc course add <CODE>`.");
        return;
    }

    println!("\n=== Courses ===\n");
    for course in store.courses() {
        let summary = course.summary();
        let grade = match summary.final_grade {
            Some(g) => format!("{} final", percent(g)),
            None if summary.has_graded_work() => {
                format!("{} so far", percent(summary.current_grade))
            }
            None => "no graded work".to_string(),
        };
        println!(
            "  {:<12} {:>2} assessment(s)  {:>6.2}/100 weight  {grade}",
            course.code, summary.assessment_count, summary.planned_weight
        );
    }
}

fn add(store: &mut CourseStore, code: &str, dual: bool) -> Result<(), String> {
    let code = code.trim();
    if code.is_empty() {
        return Err("✗ Course code cannot be empty".to_string());
    }

    store
        .add_course(Course::new(code, dual))
        .map_err(|e| store_error(&e))?;
    save_store(store)?;

    info!("Added course {code} (dual section: {dual})");
    println!("✓ Added course {code}");
    Ok(())
}

fn remove(store: &mut CourseStore, code: &str, yes: bool) -> Result<(), String> {
    let course = find_course(store, code)?;
    if !yes
        && !confirm(&format!(
            "Remove {} and its {} assessment(s)?",
            course.code,
            course.assessment_count()
        ))
    {
        println!("✗ Removal cancelled");
        return Ok(());
    }

    let removed = store.remove_course(code).map_err(|e| store_error(&e))?;
    save_store(store)?;

    info!("Removed course {}", removed.code);
    println!("✓ Removed course {}", removed.code);
    Ok(())
}

/// Print a course's assessments followed by its grade summary
pub fn print_course(course: &Course) {
    let summary = course.summary();
    let layout = if course.is_dual_section {
        "theory / lab"
    } else {
        "single section"
    };
    println!("\n=== {} ({layout}) ===\n", course.code);

    if course.assessments.is_empty() {
        println!("  No assessments recorded.");
    }
    for (idx, assessment) in course.assessments.iter().enumerate() {
        let section = match (course.is_dual_section, assessment.category) {
            (false, _) => "",
            (true, Category::Theory) => " [theory]",
            (true, Category::Lab) => " [lab]",
        };
        println!(
            "  {:>2}. {:<24} {:>6.2}%  {}{section}",
            idx + 1,
            assessment.name,
            assessment.weight,
            grade_label(assessment)
        );
    }

    println!();
    println!(
        "  Completed:    {}/{} ({:.2} of {:.2} weight)",
        summary.completed_count,
        summary.assessment_count,
        summary.completed_weight,
        summary.planned_weight
    );
    println!("  Grade so far: {}", percent(summary.current_grade));
    if let Some(theory) = summary.theory_grade {
        println!("  Theory:       {}", percent(theory));
    }
    if let Some(lab) = summary.lab_grade {
        println!("  Lab:          {}", percent(lab));
    }
    match summary.final_grade {
        Some(final_grade) => println!("  Final grade:  {}", percent(final_grade)),
        None => println!(
            "  Final grade:  not final yet ({:.2} weight remaining)",
            summary.remaining_weight()
        ),
    }
}
