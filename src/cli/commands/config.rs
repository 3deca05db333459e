//! Config command handler

use crate::args::ConfigSubcommand;
use gradecalc::config::Config;
use gradecalc::core::goal_seeker::{GoalSeeker, SeekStrategy};
use gradecalc::{info, warn};

/// Keys read by the goal seeker
const SOLVER_KEYS: [&str; 5] = [
    "tolerance",
    "step",
    "max_iterations",
    "max-iterations",
    "strategy",
];

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

/// Handle the config get subcommand
pub fn handle_config_get(config: &Config, key: Option<String>) {
    if let Some(k) = key {
        match config.get(&k) {
            Some(value) => println!("{value}"),
            None => eprintln!("Unknown config key: '{k}'"),
        }
    } else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
        println!("\nConfig file: {}", Config::get_config_file_path().display());
        print_solver_in_use(config);
    }
}

/// Describe the seeker built from this config, after fallbacks
fn solver_in_use(config: &Config) -> String {
    let seeker = GoalSeeker::from(&config.solver);
    format!(
        "{} strategy, tolerance {}, step {}, up to {} rounds",
        seeker.strategy, seeker.tolerance, seeker.step, seeker.max_iterations
    )
}

/// Solver keys whose stored value is unusable and replaced by the default
fn ignored_solver_keys(config: &Config) -> Vec<&'static str> {
    let solver = &config.solver;
    let mut ignored = Vec::new();
    if solver.tolerance <= 0.0 {
        ignored.push("tolerance");
    }
    if solver.step <= 0.0 {
        ignored.push("step");
    }
    if solver.max_iterations == 0 {
        ignored.push("max_iterations");
    }
    if solver.strategy.parse::<SeekStrategy>().is_err() {
        ignored.push("strategy");
    }
    ignored
}

fn print_solver_in_use(config: &Config) {
    println!("Goal seeker in use: {}", solver_in_use(config));
    for key in ignored_solver_keys(config) {
        warn!("Config value for '{key}' is invalid; using the default");
    }
}

/// Handle the config set subcommand
pub fn handle_config_set(config: &mut Config, key: &str, value: &str) {
    if let Err(e) = config.set(key, value) {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }

    if let Err(e) = config.save() {
        eprintln!("✗ Failed to save config: {e}");
        std::process::exit(1);
    }

    info!("Config key {key} set to {value}");
    println!("✓ Set {key} = {value}");
    if SOLVER_KEYS.contains(&key) {
        print_solver_in_use(config);
    }
}

/// Handle the config unset subcommand
pub fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) {
    if let Err(e) = config.unset(key, defaults) {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }

    if let Err(e) = config.save() {
        eprintln!("✗ Failed to save config: {e}");
        std::process::exit(1);
    }

    println!("✓ Reset {key} to default");
    if SOLVER_KEYS.contains(&key) {
        print_solver_in_use(config);
    }
}

/// Handle the config reset subcommand
pub fn handle_config_reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    if super::confirm("Are you sure you want to reset config to defaults?") {
        if let Err(e) = Config::reset() {
            eprintln!("✗ Failed to remove config file: {e}");
            std::process::exit(1);
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}
