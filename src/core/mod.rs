//! Core module for grade tracking and projection

pub mod calculator;
pub mod config;
pub mod goal_seeker;
pub mod models;
pub mod report;
pub mod store;

/// Returns the current version of the `gradecalc` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
