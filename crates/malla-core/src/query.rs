//! # Dependency Engine
//!
//! The two validation queries over (Catalog, CompletionSet):
//!
//! - `missing_prerequisites` — forward check: what still blocks completing
//!   a course.
//! - `completed_dependents` — backward check: what already-completed courses
//!   would become invalid if a course were reverted.
//!
//! Both are pure functions: no side effects, deterministic given the same
//! two inputs. Results are derived on demand and never cached — the
//! completion set can change between any two queries, and staleness would be
//! a correctness bug.

use crate::catalog::Catalog;
use crate::progress::CompletionSet;
use crate::types::{CourseCode, MallaError, Requirements};
use std::collections::BTreeSet;

/// Prerequisite codes of `code` that are not yet completed.
///
/// For a requires-all course the result is every catalog code except its
/// own that is not in the completion set, in catalog order. For an explicit
/// list the result preserves the declared order. Either way the order is
/// the user-facing display order of blocking reasons.
///
/// An empty result means the course is eligible for completion.
///
/// # Errors
///
/// Returns `UnknownCourse` if `code` has no catalog entry.
pub fn missing_prerequisites(
    catalog: &Catalog,
    completed: &CompletionSet,
    code: &CourseCode,
) -> Result<Vec<CourseCode>, MallaError> {
    let course = catalog
        .get(code)
        .ok_or_else(|| MallaError::UnknownCourse(code.clone()))?;

    let missing = match &course.requirements {
        Requirements::All => catalog
            .courses()
            .filter(|c| c.code != course.code && !completed.contains(&c.code))
            .map(|c| c.code.clone())
            .collect(),
        Requirements::Explicit(reqs) => reqs
            .iter()
            .filter(|req| !completed.contains(req))
            .cloned()
            .collect(),
    };

    Ok(missing)
}

/// Completed courses that depend on `code`.
///
/// A completed requires-all course depends on every other catalog course; a
/// completed explicit course depends on the codes it lists. The result
/// answers "if I revert `code`, which already-completed courses would become
/// invalid?" — duplicates are impossible by construction and the order is
/// not significant.
///
/// # Errors
///
/// Returns `UnknownCourse` if `code` has no catalog entry.
pub fn completed_dependents(
    catalog: &Catalog,
    completed: &CompletionSet,
    code: &CourseCode,
) -> Result<BTreeSet<CourseCode>, MallaError> {
    if !catalog.contains(code) {
        return Err(MallaError::UnknownCourse(code.clone()));
    }

    let mut dependents = BTreeSet::new();
    for course in catalog.courses() {
        if !completed.contains(&course.code) {
            continue;
        }
        let depends = match &course.requirements {
            Requirements::All => course.code != *code,
            Requirements::Explicit(reqs) => reqs.contains(code),
        };
        if depends {
            dependents.insert(course.code.clone());
        }
    }

    Ok(dependents)
}

// =============================================================================
// TESTS
// =============================================================================
