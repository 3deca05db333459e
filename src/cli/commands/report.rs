//! Report command handler
//!
//! Generates a course grade report in Markdown or HTML, optionally with a
//! goal projection.

use super::find_course;
use super::goal::seeker_for;
use gradecalc::config::Config;
use gradecalc::core::report::{
    GoalProjection, HtmlReporter, MarkdownReporter, ReportContext, ReportFormat, ReportGenerator,
};
use gradecalc::core::store::CourseStore;
use gradecalc::{error, info};
use std::path::{Path, PathBuf};

/// Run the report command.
///
/// # Arguments
/// * `store` - Loaded course data
/// * `code` - Course to report on
/// * `format` - Report format
/// * `output_file` - Optional output path; defaults to the configured reports directory
/// * `goal` - Optional target grade to project
/// * `config` - Configuration providing the reports directory and solver settings
pub fn run(
    store: &CourseStore,
    code: &str,
    format: ReportFormat,
    output_file: Option<&Path>,
    goal: Option<f64>,
    config: &Config,
) -> Result<(), String> {
    let course = find_course(store, code)?;
    let summary = course.summary();
    let outcome = goal.map(|target| seeker_for(config, None).seek(&course.assessments, target));
    let projection = goal.zip(outcome.as_ref()).map(|(target, outcome)| GoalProjection {
        target,
        outcome,
    });
    let ctx = ReportContext::new(course, &summary, projection);

    let output_path = resolve_output_path(output_file, &config.paths.reports_dir, &course.code, format)?;

    let result = match format {
        ReportFormat::Markdown => MarkdownReporter::new().generate(&ctx, &output_path),
        ReportFormat::Html => HtmlReporter::new().generate(&ctx, &output_path),
    };
    result.map_err(|e| {
        error!("Report generation failed for {}: {e}", course.code);
        format!("✗ Failed to generate {format} report: {e}")
    })?;

    info!("Report exported to: {}", output_path.display());
    println!("✓ Report generated: {}", output_path.display());
    Ok(())
}

/// Pick the output file, creating the reports directory when it is used
fn resolve_output_path(
    output_file: Option<&Path>,
    reports_dir: &str,
    code: &str,
    format: ReportFormat,
) -> Result<PathBuf, String> {
    if let Some(output) = output_file {
        return Ok(output.to_path_buf());
    }

    let reports_dir = PathBuf::from(reports_dir);
    std::fs::create_dir_all(&reports_dir).map_err(|e| {
        format!(
            "✗ Failed to create reports directory {}: {e}",
            reports_dir.display()
        )
    })?;
    Ok(reports_dir.join(report_file_name(code, format)))
}

/// File name for a course report, with path-hostile characters replaced
fn report_file_name(code: &str, format: ReportFormat) -> String {
    let stem: String = code
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{stem}_report.{}", format.extension())
}
