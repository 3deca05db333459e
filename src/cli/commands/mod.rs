//! CLI command handlers for `gradecalc`.
//!
//! Each command is implemented in its own submodule. Handlers that touch the
//! course data return `Err` with a user-facing message instead of exiting.

pub mod assessment;
pub mod config;
pub mod course;
pub mod goal;
pub mod report;

use gradecalc::core::models::Course;
use gradecalc::core::store::{CourseStore, StoreError};
use gradecalc::error;
use std::io::{self, Write};

/// Look up a course or produce the error shown to the user
fn find_course<'a>(store: &'a CourseStore, code: &str) -> Result<&'a Course, String> {
    store
        .find(code)
        .ok_or_else(|| format!("✗ {}", StoreError::CourseNotFound(code.to_string())))
}

/// Persist the store after an edit
fn save_store(store: &CourseStore) -> Result<(), String> {
    store.save().map_err(|e| {
        error!("Failed to save course data: {e}");
        format!("✗ Failed to save course data: {e}")
    })
}

/// Turn a store error into the message shown to the user
fn store_error(e: &StoreError) -> String {
    error!("{e}");
    format!("✗ {e}")
}

/// Ask a yes/no question on stdin
fn confirm(prompt: &str) -> bool {
    print!("{prompt} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}
