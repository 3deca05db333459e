//! HTML report generator
//!
//! Generates a self-contained HTML page with embedded CSS.

use crate::core::report::{grade_label, percent, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn render_template(ctx: &ReportContext) -> String {
        let mut values = super::summary_values(ctx, escape_html(&ctx.course.code));
        values.push(("section_rows", Self::section_rows(ctx)));
        values.push(("assessment_table", Self::assessment_table(ctx)));
        values.push(("goal_section", Self::goal_section(ctx)));
        super::fill_template(HTML_TEMPLATE, &values)
    }

    fn section_rows(ctx: &ReportContext) -> String {
        let mut rows = String::new();
        for (label, grade) in [
            ("Theory so far", ctx.summary.theory_grade),
            ("Lab so far", ctx.summary.lab_grade),
        ] {
            if let Some(grade) = grade {
                let _ = writeln!(
                    rows,
                    "  <tr><th>{label}</th><td>{}</td></tr>",
                    percent(grade)
                );
            }
        }
        rows
    }

    fn assessment_table(ctx: &ReportContext) -> String {
        if ctx.course.assessments.is_empty() {
            return "<p class=\"pending\">No assessments recorded.</p>\n".to_string();
        }

        let dual = ctx.course.is_dual_section;
        let mut html = String::from("<table>\n  <tr><th>#</th><th>Assessment</th>");
        if dual {
            html.push_str("<th>Section</th>");
        }
        html.push_str("<th>Weight</th><th>Grade</th></tr>\n");

        for (idx, assessment) in ctx.course.assessments.iter().enumerate() {
            let _ = write!(
                html,
                "  <tr><td>{}</td><td>{}</td>",
                idx + 1,
                escape_html(&assessment.name)
            );
            if dual {
                let _ = write!(html, "<td>{}</td>", assessment.category);
            }
            let grade_class = if assessment.is_complete {
                "num"
            } else {
                "num pending"
            };
            let _ = writeln!(
                html,
                "<td class=\"num\">{:.2}</td><td class=\"{grade_class}\">{}</td></tr>",
                assessment.weight,
                grade_label(assessment)
            );
        }
        html.push_str("</table>\n");
        html
    }

    fn goal_section(ctx: &ReportContext) -> String {
        let Some(message) = ctx.goal_message() else {
            return String::new();
        };

        let unreachable = ctx.goal.is_some_and(|g| !g.outcome.is_success());
        let class = if unreachable { " class=\"unreachable\"" } else { "" };
        let mut html = String::from("<h2>Goal Projection</h2>\n");
        let _ = writeln!(html, "<p{class}>{}</p>", escape_html(&message));

        let required = ctx.required_grades();
        if !required.is_empty() {
            html.push_str(
                "<table>\n  <tr><th>#</th><th>Assessment</th><th>Weight</th><th>Required</th></tr>\n",
            );
            for row in &required {
                let _ = writeln!(
                    html,
                    "  <tr><td>{}</td><td>{}</td><td class=\"num\">{:.2}</td><td class=\"num\">{}</td></tr>",
                    row.number,
                    escape_html(row.name),
                    row.weight,
                    percent(row.grade)
                );
            }
            html.push_str("</table>\n");
        }
        html
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let html = self.render(ctx)?;
        fs::write(output_path, html)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::render_template(ctx))
    }
}
