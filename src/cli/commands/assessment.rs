//! Assessment command handler

use super::{save_store, store_error};
use crate::args::AssessmentSubcommand;
use gradecalc::core::models::{Assessment, Category};
use gradecalc::core::report::percent;
use gradecalc::core::store::CourseStore;
use gradecalc::{info, warn};

/// Dispatch assessment subcommands
pub fn run(subcommand: AssessmentSubcommand, store: &mut CourseStore) -> Result<(), String> {
    match subcommand {
        AssessmentSubcommand::Add {
            course,
            name,
            weight,
            grade,
            lab,
        } => {
            let category = if lab { Category::Lab } else { Category::Theory };
            let mut assessment = Assessment::new(name.trim(), weight).in_category(category);
            if let Some(grade) = grade {
                assessment = assessment.graded(grade);
            }
            add(store, &course, assessment)
        }
        AssessmentSubcommand::Grade {
            course,
            number,
            grade,
        } => record_grade(store, &course, number, grade),
        AssessmentSubcommand::Remove { course, number } => remove(store, &course, number),
    }
}

fn add(store: &mut CourseStore, code: &str, assessment: Assessment) -> Result<(), String> {
    if assessment.name.is_empty() {
        return Err("✗ Assessment name cannot be empty".to_string());
    }

    let course = store.find_mut(code).map_err(|e| store_error(&e))?;
    if assessment.category == Category::Lab && !course.is_dual_section {
        warn!(
            "{} is single section; lab assessment '{}' counts toward the overall grade only",
            course.code, assessment.name
        );
    }

    let name = assessment.name.clone();
    course.add_assessment(assessment);
    let number = course.assessment_count();
    let planned = course.summary().planned_weight;
    let course_code = course.code.clone();
    save_store(store)?;

    info!("Added assessment '{name}' to {course_code}");
    println!("✓ Added #{number} {name} to {course_code}");
    if planned > 100.0 {
        println!("⚠️  Planned weight is now {planned:.2}, more than 100");
    }
    Ok(())
}

fn record_grade(store: &mut CourseStore, code: &str, number: usize, grade: f64) -> Result<(), String> {
    let name = store
        .record_grade(code, number, grade)
        .map_err(|e| store_error(&e))?
        .name
        .clone();
    save_store(store)?;

    info!("Recorded {grade} for '{name}' in {code}");
    println!("✓ Recorded {} for #{number} {name}", percent(grade));
    Ok(())
}

fn remove(store: &mut CourseStore, code: &str, number: usize) -> Result<(), String> {
    let removed = store
        .remove_assessment(code, number)
        .map_err(|e| store_error(&e))?;
    save_store(store)?;

    info!("Removed assessment '{}' from {code}", removed.name);
    println!("✓ Removed #{number} {}", removed.name);
    Ok(())
}
