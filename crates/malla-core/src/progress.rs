//! # Completion Set
//!
//! The mutable set of completed course codes.
//!
//! Lifecycle: initialized empty or restored from a progress store at
//! startup; mutated only by the `Tracker` transition operations; persisted
//! after every mutation; cleared entirely by reset.
//!
//! Uses `BTreeSet` for deterministic ordering.

use crate::catalog::Catalog;
use crate::types::CourseCode;
use std::collections::BTreeSet;

/// The set of course codes marked complete.
///
/// Every member must be a valid catalog code; `retain_known` enforces this
/// on restore by dropping violating entries instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    completed: BTreeSet<CourseCode>,
}

impl CompletionSet {
    /// Create a new empty completion set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a completion set from persisted codes.
    #[must_use]
    pub fn from_codes(codes: impl IntoIterator<Item = CourseCode>) -> Self {
        Self {
            completed: codes.into_iter().collect(),
        }
    }

    /// Check whether a course is marked complete.
    #[must_use]
    pub fn contains(&self, code: &CourseCode) -> bool {
        self.completed.contains(code)
    }

    /// Mark a course complete. Returns `true` if it was not already present.
    ///
    /// Normal operation mutates through the `Tracker`, which guards this
    /// with the forward check.
    pub fn insert(&mut self, code: CourseCode) -> bool {
        self.completed.insert(code)
    }

    /// Unmark a course. Returns `true` if it was present.
    ///
    /// Normal operation mutates through the `Tracker`, which guards this
    /// with the backward check.
    pub fn remove(&mut self, code: &CourseCode) -> bool {
        self.completed.remove(code)
    }

    /// Clear the entire set.
    pub fn clear(&mut self) {
        self.completed.clear();
    }

    /// Drop every code without a catalog entry. Returns the dropped count.
    pub fn retain_known(&mut self, catalog: &Catalog) -> usize {
        let before = self.completed.len();
        self.completed.retain(|code| catalog.contains(code));
        before.saturating_sub(self.completed.len())
    }

    /// Number of completed courses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    /// Check whether no course is completed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// Completed codes in deterministic (lexicographic) order.
    pub fn iter(&self) -> impl Iterator<Item = &CourseCode> {
        self.completed.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Course, Requirements};

    #[test]
    fn insert_remove_contains() {
        let mut set = CompletionSet::new();
        let code = CourseCode::new("A");

        assert!(set.insert(code.clone()));
        assert!(!set.insert(code.clone()));
        assert!(set.contains(&code));

        assert!(set.remove(&code));
        assert!(!set.remove(&code));
        assert!(!set.contains(&code));
    }

    #[test]
    fn iter_is_deterministic() {
        let set = CompletionSet::from_codes([
            CourseCode::new("C"),
            CourseCode::new("A"),
            CourseCode::new("B"),
        ]);

        let codes: Vec<_> = set.iter().map(CourseCode::as_str).collect();
        assert_eq!(codes, vec!["A", "B", "C"]);
    }

    #[test]
    fn retain_known_drops_foreign_codes() {
        let catalog = Catalog::new(vec![Course::new(
            CourseCode::new("A"),
            "A",
            1,
            Requirements::none(),
        )])
        .expect("valid catalog");

        let mut set = CompletionSet::from_codes([CourseCode::new("A"), CourseCode::new("GHOST")]);
        let dropped = set.retain_known(&catalog);

        assert_eq!(dropped, 1);
        assert_eq!(set.len(), 1);
        assert!(set.contains(&CourseCode::new("A")));
    }

    #[test]
    fn clear_empties_the_set() {
        let mut set = CompletionSet::from_codes([CourseCode::new("A")]);
        set.clear();
        assert!(set.is_empty());
    }
}
