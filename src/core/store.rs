//! JSON persistence for courses
//!
//! The data file holds a single object with a `courses` array:
//!
//! ```json
//! {
//!     "courses": [
//!         {
//!             "code": "CS2510",
//!             "isDualSection": false,
//!             "assessments": [
//!                 { "name": "Midterm", "weight": 40.0, "grade": 82.0, "category": "theory", "isComplete": true }
//!             ]
//!         }
//!     ]
//! }
//! ```

use crate::core::models::{Assessment, Course};
use crate::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while loading, saving, or editing stored courses
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The data file could not be read or written
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        /// Path of the data file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The data file is not valid course JSON
    #[error("Failed to parse course data: {0}")]
    Json(#[from] serde_json::Error),

    /// No course with this code exists
    #[error("No course with code '{0}'")]
    CourseNotFound(String),

    /// A course with this code already exists
    #[error("A course with code '{0}' already exists")]
    DuplicateCourse(String),

    /// Assessment number outside the course's list
    #[error("Course '{code}' has no assessment #{number}")]
    AssessmentIndex {
        /// Course code
        code: String,
        /// 1-based assessment number as shown to the user
        number: usize,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CourseFile {
    #[serde(default)]
    courses: Vec<Course>,
}

/// Courses backed by a JSON data file
#[derive(Debug)]
pub struct CourseStore {
    path: PathBuf,
    courses: Vec<Course>,
}

impl CourseStore {
    /// Open the data file, creating an empty one if it does not exist yet
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or created, or does not
    /// contain valid course JSON.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            let store = Self {
                path,
                courses: Vec::new(),
            };
            store.save()?;
            info!("Created empty course file at {}", store.path.display());
            return Ok(store);
        }

        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let file: CourseFile = serde_json::from_str(&content)?;
        info!(
            "Loaded {} course(s) from {}",
            file.courses.len(),
            path.display()
        );

        Ok(Self {
            path,
            courses: file.courses,
        })
    }

    /// Write all courses back to the data file
    ///
    /// # Errors
    /// Returns an error if the parent directory or file cannot be written.
    pub fn save(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let file = CourseFile {
            courses: self.courses.clone(),
        };
        fs::write(&self.path, to_pretty_json(&file)?).map_err(io_err)?;
        Ok(())
    }

    /// Path of the backing data file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All courses in insertion order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Number of stored courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether there are no stored courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Find a course by code (case- and whitespace-insensitive)
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.matches_code(code))
    }

    /// Find a course by code for editing
    ///
    /// # Errors
    /// Returns [`StoreError::CourseNotFound`] if no course matches.
    pub fn find_mut(&mut self, code: &str) -> Result<&mut Course, StoreError> {
        self.courses
            .iter_mut()
            .find(|c| c.matches_code(code))
            .ok_or_else(|| StoreError::CourseNotFound(code.to_string()))
    }

    /// Add a course
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateCourse`] if the code is already in use.
    pub fn add_course(&mut self, course: Course) -> Result<(), StoreError> {
        if self.find(&course.code).is_some() {
            return Err(StoreError::DuplicateCourse(course.code));
        }
        self.courses.push(course);
        Ok(())
    }

    /// Remove a course by code, returning it
    ///
    /// # Errors
    /// Returns [`StoreError::CourseNotFound`] if no course matches.
    pub fn remove_course(&mut self, code: &str) -> Result<Course, StoreError> {
        let index = self
            .courses
            .iter()
            .position(|c| c.matches_code(code))
            .ok_or_else(|| StoreError::CourseNotFound(code.to_string()))?;
        Ok(self.courses.remove(index))
    }

    /// Record a received grade on an assessment by its 1-based number
    ///
    /// # Errors
    /// Returns an error if the course or assessment does not exist.
    pub fn record_grade(
        &mut self,
        code: &str,
        number: usize,
        grade: f64,
    ) -> Result<&Assessment, StoreError> {
        let course = self.find_mut(code)?;
        let Some(index) = number
            .checked_sub(1)
            .filter(|i| *i < course.assessments.len())
        else {
            return Err(StoreError::AssessmentIndex {
                code: course.code.clone(),
                number,
            });
        };
        let assessment = &mut course.assessments[index];
        assessment.record_grade(grade);
        Ok(&*assessment)
    }

    /// Remove an assessment by its 1-based number, returning it
    ///
    /// # Errors
    /// Returns an error if the course or assessment does not exist.
    pub fn remove_assessment(&mut self, code: &str, number: usize) -> Result<Assessment, StoreError> {
        let course = self.find_mut(code)?;
        number
            .checked_sub(1)
            .and_then(|i| course.remove_assessment(i))
            .ok_or_else(|| StoreError::AssessmentIndex {
                code: course.code.clone(),
                number,
            })
    }
}

/// Serialize with 4-space indentation
fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}
