//! Command-line interface entry point for `gradecalc`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use gradecalc::config::Config;
use gradecalc::core::store::CourseStore;
use gradecalc::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use gradecalc::{error, info};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    // Config commands never touch the course data file
    let command = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
            return;
        }
        other => other,
    };

    let mut store = match CourseStore::open(&config.paths.data_file) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open course data: {e}");
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    let result = match command {
        Command::Course { subcommand } => commands::course::run(subcommand, &mut store),
        Command::Assessment { subcommand } => commands::assessment::run(subcommand, &mut store),
        Command::Goal {
            course,
            target,
            strategy,
        } => commands::goal::run(
            &store,
            &course,
            target,
            strategy.map(Into::into),
            &config,
        ),
        Command::Report {
            course,
            format,
            output,
            goal,
        } => commands::report::run(&store, &course, format, output.as_deref(), goal, &config),
        Command::Config { .. } => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
