//! CLI argument definitions for `gradecalc`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gradecalc::config::ConfigOverrides;
use gradecalc::core::goal_seeker::SeekStrategy;
use gradecalc::core::report::ReportFormat;
use gradecalc::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// Goal seeking strategy argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StrategyArg {
    /// Move all unfinished grades together in fixed steps
    Stepwise,
    /// Solve directly for one shared grade
    Proportional,
}

impl From<StrategyArg> for SeekStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Stepwise => Self::Stepwise,
            StrategyArg::Proportional => Self::Proportional,
        }
    }
}

/// Parse a percentage in `[0, 100]`
fn parse_percentage(value: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .trim()
        .trim_end_matches('%')
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=100.0).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(format!("'{value}' must be between 0 and 100"))
    }
}

/// Parse a goal grade; any finite number is accepted
fn parse_goal(value: &str) -> Result<f64, String> {
    value
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("'{value}' is not a number"))
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_file`, `strategy`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum CourseSubcommand {
    /// List all courses with their current grade.
    List,
    /// Add a new course.
    Add {
        /// Course code (e.g., CS2510)
        #[arg(value_name = "CODE")]
        code: String,
        /// Track theory and lab sections separately
        #[arg(long)]
        dual: bool,
    },
    /// Remove a course and all of its assessments.
    Remove {
        /// Course code
        #[arg(value_name = "CODE")]
        code: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show a course's assessments and grade summary.
    Show {
        /// Course code
        #[arg(value_name = "CODE")]
        code: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum AssessmentSubcommand {
    /// Add an assessment to a course.
    Add {
        /// Course code
        #[arg(value_name = "COURSE")]
        course: String,
        /// Assessment name
        #[arg(value_name = "NAME")]
        name: String,
        /// Weight in percentage points (0-100)
        #[arg(short, long, value_parser = parse_percentage)]
        weight: f64,
        /// Grade received (0-100); marks the assessment complete
        #[arg(short, long, value_parser = parse_percentage)]
        grade: Option<f64>,
        /// Place the assessment in the lab section
        #[arg(long)]
        lab: bool,
    },
    /// Record the grade received on an assessment.
    Grade {
        /// Course code
        #[arg(value_name = "COURSE")]
        course: String,
        /// Assessment number as shown by `course show`
        #[arg(value_name = "NUMBER")]
        number: usize,
        /// Grade received (0-100)
        #[arg(value_name = "GRADE", value_parser = parse_percentage)]
        grade: f64,
    },
    /// Remove an assessment from a course.
    Remove {
        /// Course code
        #[arg(value_name = "COURSE")]
        course: String,
        /// Assessment number as shown by `course show`
        #[arg(value_name = "NUMBER")]
        number: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Manage courses.
    Course {
        #[command(subcommand)]
        subcommand: CourseSubcommand,
    },
    /// Manage a course's assessments.
    Assessment {
        #[command(subcommand)]
        subcommand: AssessmentSubcommand,
    },
    /// Project the grades needed on unfinished assessments to reach a target.
    ///
    /// The saved course is never modified.
    Goal {
        /// Course code
        #[arg(value_name = "COURSE")]
        course: String,
        /// Target final grade
        #[arg(value_name = "TARGET", value_parser = parse_goal, allow_negative_numbers = true)]
        target: f64,
        /// Search strategy (defaults to config `strategy`)
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,
    },
    /// Generate a grade report for a course.
    Report {
        /// Course code
        #[arg(value_name = "COURSE")]
        course: String,
        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "md")]
        format: ReportFormat,
        /// Output file path (defaults to `<reports_dir>/<code>.<ext>`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Include a projection for this target grade
        #[arg(long, value_name = "TARGET", value_parser = parse_goal, allow_negative_numbers = true)]
        goal: Option<f64>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gradecalc",
    about = "Track course assessments and project the grades you need",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Use a different course data file for this run
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--reports-dir`) take precedence over long-form
    /// flags (e.g., `--config-reports-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            data_file: self.data_file.as_ref().map(path_string),
            reports_dir: self
                .reports_dir
                .as_ref()
                .or(self.config_reports_dir.as_ref())
                .map(path_string),
            strategy: None,
        }
    }
}
