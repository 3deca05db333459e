//! Report format implementations
//!
//! Provides generators for Markdown and HTML grade reports.

pub mod html;
pub mod markdown;

pub use html::HtmlReporter;
pub use markdown::MarkdownReporter;

use super::ReportContext;
use crate::core::get_version;
use std::fmt;
use std::str::FromStr;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Markdown tables
    Markdown,
    /// Self-contained HTML page
    Html,
}

impl ReportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Placeholder values shared by every template
fn summary_values(ctx: &ReportContext, course_code: String) -> Vec<(&'static str, String)> {
    let summary = ctx.summary;
    vec![
        ("course_code", course_code),
        ("layout", ctx.layout_label().to_string()),
        ("completed_count", summary.completed_count.to_string()),
        ("assessment_count", summary.assessment_count.to_string()),
        ("completed_weight", format!("{:.2}", summary.completed_weight)),
        ("planned_weight", format!("{:.2}", summary.planned_weight)),
        ("current_grade", super::percent(summary.current_grade)),
        ("final_grade", ctx.final_grade_label()),
        ("version", get_version().to_string()),
    ]
}

/// Substitute `{{name}}` placeholders in a single pass over the template.
///
/// Inserted values are never rescanned, so course data that happens to
/// contain `{{...}}` is written out literally. Unknown placeholders are kept.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("md".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert_eq!("Markdown".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert_eq!("htm".parse::<ReportFormat>(), Ok(ReportFormat::Html));
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let values = vec![
            ("name", "{{other}}".to_string()),
            ("other", "expanded".to_string()),
        ];
        assert_eq!(
            fill_template("<{{name}}|{{other}}>", &values),
            "<{{other}}|expanded>"
        );
    }

    #[test]
    fn test_fill_template_keeps_unknown_and_unclosed() {
        let values = vec![("a", "1".to_string())];
        assert_eq!(fill_template("{{a}} {{b}} {{a", &values), "1 {{b}} {{a");
    }

    #[test]
    fn test_extension_and_display() {
        assert_eq!(ReportFormat::Markdown.extension(), "md");
        assert_eq!(ReportFormat::Html.extension(), "html");
        assert_eq!(ReportFormat::Html.to_string(), "html");
    }
}
