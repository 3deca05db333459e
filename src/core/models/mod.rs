//! Data models for `gradecalc`

pub mod assessment;
pub mod course;

pub use assessment::{Assessment, Category};
pub use course::Course;
