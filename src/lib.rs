//! Shared library for `gradecalc`
//! Contains the grade computation and goal-seeking engine used by the CLI

pub mod core;
pub mod logger;

pub use core::{config, get_version};
