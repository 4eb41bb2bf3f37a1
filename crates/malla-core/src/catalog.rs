//! # Curriculum Catalog
//!
//! The immutable set of courses and prerequisite edges.
//!
//! The catalog is loaded once at process start and never mutated. All
//! structural invariants are checked by the validating constructor — a
//! catalog that would corrupt the dependency queries (dangling prerequisite
//! reference, duplicate code, more than one requires-all course) is rejected
//! with a descriptive error instead of being accepted silently.

use crate::primitives::{MAX_CATALOG_COURSES, MAX_CODE_LENGTH, MAX_NAME_LENGTH};
use crate::{Course, CourseCode, MallaError, Requirements};
use std::collections::BTreeMap;

/// The full ordered sequence of course records, with a code index.
///
/// Iteration order is the declaration order of the source definition; this
/// order is user-facing (it becomes the display order of requires-all
/// blocking lists) and is preserved by all queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Course records in declaration order.
    courses: Vec<Course>,
    /// Code index: CourseCode -> position in `courses`.
    index: BTreeMap<CourseCode, usize>,
}

impl Catalog {
    /// Build a catalog from course records, validating every invariant.
    ///
    /// # Errors
    ///
    /// Returns the first defect found:
    /// - `CatalogLimit` when the catalog, a code, or a name exceeds the
    ///   compiled-in size limits
    /// - `InvalidSemester` for a semester of 0
    /// - `DuplicateCourse` for a code declared twice
    /// - `DuplicateAllSentinel` for more than one requires-all course
    /// - `SelfRequirement` for a course listing itself
    /// - `DanglingRequirement` for a prerequisite code with no catalog entry
    pub fn new(courses: Vec<Course>) -> Result<Self, MallaError> {
        if courses.len() > MAX_CATALOG_COURSES {
            return Err(MallaError::CatalogLimit(format!(
                "{} courses exceeds maximum of {}",
                courses.len(),
                MAX_CATALOG_COURSES
            )));
        }

        // Pass 1: identity, limits, and the single-requires-all invariant.
        let mut index = BTreeMap::new();
        let mut all_course: Option<CourseCode> = None;
        for (position, course) in courses.iter().enumerate() {
            if course.code.as_str().is_empty() || course.code.as_str().len() > MAX_CODE_LENGTH {
                return Err(MallaError::CatalogLimit(format!(
                    "course code '{}' is empty or longer than {} bytes",
                    course.code, MAX_CODE_LENGTH
                )));
            }
            if course.name.len() > MAX_NAME_LENGTH {
                return Err(MallaError::CatalogLimit(format!(
                    "name of course {} is longer than {} bytes",
                    course.code, MAX_NAME_LENGTH
                )));
            }
            if course.semester == 0 {
                return Err(MallaError::InvalidSemester(course.code.clone()));
            }
            if index.insert(course.code.clone(), position).is_some() {
                return Err(MallaError::DuplicateCourse(course.code.clone()));
            }
            if course.requirements.is_all() {
                match &all_course {
                    None => all_course = Some(course.code.clone()),
                    Some(first) => {
                        return Err(MallaError::DuplicateAllSentinel {
                            first: first.clone(),
                            second: course.code.clone(),
                        });
                    }
                }
            }
        }

        // Pass 2: every explicit prerequisite must resolve to a catalog entry.
        for course in &courses {
            if let Requirements::Explicit(reqs) = &course.requirements {
                for req in reqs {
                    if *req == course.code {
                        return Err(MallaError::SelfRequirement(course.code.clone()));
                    }
                    if !index.contains_key(req) {
                        return Err(MallaError::DanglingRequirement {
                            course: course.code.clone(),
                            requirement: req.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self { courses, index })
    }

    /// Look up a course by code.
    #[must_use]
    pub fn get(&self, code: &CourseCode) -> Option<&Course> {
        self.index.get(code).map(|&position| &self.courses[position])
    }

    /// Check whether a code has a catalog entry.
    #[must_use]
    pub fn contains(&self, code: &CourseCode) -> bool {
        self.index.contains_key(code)
    }

    /// All courses in declaration order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// The requires-all course, if the catalog declares one.
    #[must_use]
    pub fn requires_all_course(&self) -> Option<&Course> {
        self.courses.iter().find(|c| c.requirements.is_all())
    }

    /// Group courses by semester, preserving declaration order within each.
    #[must_use]
    pub fn by_semester(&self) -> BTreeMap<u32, Vec<&Course>> {
        let mut grouped: BTreeMap<u32, Vec<&Course>> = BTreeMap::new();
        for course in &self.courses {
            grouped.entry(course.semester).or_default().push(course);
        }
        grouped
    }

    /// Total number of courses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Check whether the catalog has no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
