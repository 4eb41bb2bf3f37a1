//! # Core Type Definitions
//!
//! This module contains all core types for the Malla consistency engine:
//! - Course identity (`CourseCode`)
//! - The catalog record (`Course`) and its prerequisite form (`Requirements`)
//! - Derived per-course state (`CourseState`)
//! - Transition results (`Outcome`)
//! - Error types (`MallaError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Use integer arithmetic only (no floating-point)

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// COURSE IDENTITY
// =============================================================================

/// Unique identifier for a course in the catalog.
///
/// The code is the primary key: stable across the process lifetime and the
/// only value used for identity in queries and the completion set. Display
/// names never participate in logic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseCode(pub String);

impl CourseCode {
    /// Create a new course code from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// REQUIREMENTS
// =============================================================================

/// The prerequisite form of a course.
///
/// This is a tagged variant rather than a magic code inside the prerequisite
/// list: the forward and backward queries branch on the tag, never on a
/// sentinel string. The catalog-file keyword `"ALL"` is mapped to
/// `Requirements::All` at the parsing boundary and does not exist past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirements {
    /// An ordered, possibly empty list of prerequisite course codes.
    /// The declared order is the user-facing display order of blocking
    /// reasons and must be preserved by queries.
    Explicit(Vec<CourseCode>),
    /// The course requires every other course in the catalog.
    /// At most one catalog course may carry this tag.
    All,
}

impl Requirements {
    /// No prerequisites.
    #[must_use]
    pub const fn none() -> Self {
        Self::Explicit(Vec::new())
    }

    /// An explicit prerequisite list, in declared order.
    #[must_use]
    pub fn of(codes: impl IntoIterator<Item = CourseCode>) -> Self {
        Self::Explicit(codes.into_iter().collect())
    }

    /// Check whether this is the requires-all form.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Get the explicit prerequisite list, if any.
    #[must_use]
    pub fn as_explicit(&self) -> Option<&[CourseCode]> {
        match self {
            Self::Explicit(codes) => Some(codes),
            Self::All => None,
        }
    }
}

// =============================================================================
// COURSE
// =============================================================================

/// An immutable course record in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Unique course code (primary key).
    pub code: CourseCode,
    /// Display label. Not used for identity or logic.
    pub name: String,
    /// Positive semester number, used only for grouping and sorting.
    pub semester: u32,
    /// Prerequisite form.
    pub requirements: Requirements,
}

impl Course {
    /// Create a new course record.
    #[must_use]
    pub fn new(
        code: CourseCode,
        name: impl Into<String>,
        semester: u32,
        requirements: Requirements,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            semester,
            requirements,
        }
    }
}

// =============================================================================
// DERIVED COURSE STATE
// =============================================================================

/// Per-course state, derived from the completion set.
///
/// There is no stored `Blocked` state: "blocked" is a display property
/// recomputed from `missing_prerequisites` on every query, because the
/// completion set can change between any two queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CourseState {
    /// The course is not in the completion set.
    NotStarted,
    /// The course is in the completion set.
    Completed,
}

impl CourseState {
    /// Check whether the state is `Completed`.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Stable lowercase name, for logs and JSON output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for CourseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// TRANSITION OUTCOME
// =============================================================================

/// Result of a requested state transition.
///
/// `Blocked` is a normal, recoverable outcome — not an error. The carried
/// list is missing prerequisites for a completion request and completed
/// dependents for a reversion request; callers distinguish by the operation
/// they invoked, not by the shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The transition was applied and persisted.
    Success,
    /// The transition was refused; the completion set is unchanged.
    /// Carries the ordered list of obstructing course codes.
    Blocked(Vec<CourseCode>),
}

impl Outcome {
    /// Check whether the transition was refused.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }

    /// Get the obstructing codes, if the transition was refused.
    #[must_use]
    pub fn blocking_codes(&self) -> Option<&[CourseCode]> {
        match self {
            Self::Success => None,
            Self::Blocked(codes) => Some(codes),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Malla system.
///
/// - No silent failures
/// - Use `Result<T, MallaError>` for fallible operations
/// - The core should never panic; all errors must be recoverable
///
/// Catalog construction defects are rejected at load time with a descriptive
/// variant, since accepting them would corrupt the dependency queries
/// silently.
#[derive(Debug, Error)]
pub enum MallaError {
    /// The operation referenced a code not present in the catalog.
    #[error("Unknown course: {0}")]
    UnknownCourse(CourseCode),

    /// Completion was requested for a course already completed.
    #[error("Course already completed: {0}")]
    AlreadyCompleted(CourseCode),

    /// Reversion was requested for a course not completed.
    #[error("Course not completed: {0}")]
    NotCompleted(CourseCode),

    /// The catalog declares the same course code twice.
    #[error("Duplicate course code in catalog: {0}")]
    DuplicateCourse(CourseCode),

    /// A prerequisite list references a code with no catalog entry.
    #[error("Course {course} requires {requirement}, which is not in the catalog")]
    DanglingRequirement {
        course: CourseCode,
        requirement: CourseCode,
    },

    /// A course lists itself as its own prerequisite.
    #[error("Course {0} lists itself as a prerequisite")]
    SelfRequirement(CourseCode),

    /// More than one catalog course carries the requires-all tag.
    #[error("Catalog declares more than one requires-all course: {first} and {second}")]
    DuplicateAllSentinel {
        first: CourseCode,
        second: CourseCode,
    },

    /// A course declares a non-positive semester.
    #[error("Course {0} has an invalid semester (must be >= 1)")]
    InvalidSemester(CourseCode),

    /// The catalog exceeds a compiled-in size limit.
    #[error("Catalog limit exceeded: {0}")]
    CatalogLimit(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
