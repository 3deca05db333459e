//! Markdown report generator
//!
//! Renders grade reports as Markdown tables that read well in GitHub, GitLab,
//! and VS Code previews.

use crate::core::models::Category;
use crate::core::report::{grade_label, percent, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn render_template(ctx: &ReportContext) -> String {
        let mut values = super::summary_values(ctx, escape_cell(&ctx.course.code));
        values.push(("section_rows", Self::section_rows(ctx)));
        values.push(("assessment_table", Self::assessment_table(ctx)));
        values.push(("goal_section", Self::goal_section(ctx)));
        super::fill_template(MARKDOWN_TEMPLATE, &values)
    }

    fn section_rows(ctx: &ReportContext) -> String {
        let mut rows = String::new();
        if let Some(theory) = ctx.summary.theory_grade {
            let _ = writeln!(rows, "| Theory so far | {} |", percent(theory));
        }
        if let Some(lab) = ctx.summary.lab_grade {
            let _ = writeln!(rows, "| Lab so far | {} |", percent(lab));
        }
        rows
    }

    fn assessment_table(ctx: &ReportContext) -> String {
        if ctx.course.assessments.is_empty() {
            return "_No assessments recorded._\n".to_string();
        }

        let mut table = String::new();
        let dual = ctx.course.is_dual_section;
        if dual {
            table.push_str("| # | Assessment | Section | Weight | Grade |\n");
            table.push_str("|---|---|---|---:|---:|\n");
        } else {
            table.push_str("| # | Assessment | Weight | Grade |\n");
            table.push_str("|---|---|---:|---:|\n");
        }

        for (idx, assessment) in ctx.course.assessments.iter().enumerate() {
            let name = escape_cell(&assessment.name);
            let weight = format!("{:.2}", assessment.weight);
            let grade = grade_label(assessment);
            if dual {
                let section = match assessment.category {
                    Category::Theory => "Theory",
                    Category::Lab => "Lab",
                };
                let _ = writeln!(
                    table,
                    "| {} | {name} | {section} | {weight} | {grade} |",
                    idx + 1
                );
            } else {
                let _ = writeln!(table, "| {} | {name} | {weight} | {grade} |", idx + 1);
            }
        }
        table
    }

    fn goal_section(ctx: &ReportContext) -> String {
        let Some(message) = ctx.goal_message() else {
            return String::new();
        };

        let mut section = String::from("\n## Goal Projection\n\n");
        let _ = writeln!(section, "{message}");

        let required = ctx.required_grades();
        if !required.is_empty() {
            section.push_str("\n| # | Assessment | Weight | Required |\n");
            section.push_str("|---|---|---:|---:|\n");
            for row in &required {
                let _ = writeln!(
                    section,
                    "| {} | {} | {:.2} | {} |",
                    row.number,
                    escape_cell(row.name),
                    row.weight,
                    percent(row.grade)
                );
            }
        }
        section
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep pipes in names from breaking table columns
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        fs::write(output_path, content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::render_template(ctx))
    }
}
