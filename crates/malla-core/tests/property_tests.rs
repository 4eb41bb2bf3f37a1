//! # Property-Based Tests
//!
//! Verification tests using proptest.
//!
//! Catalogs are generated layered: every prerequisite points at an
//! earlier-declared course, so each generated catalog is valid and
//! acyclic by construction, and completing courses in declaration order
//! always satisfies the forward check.

use malla_core::{
    Catalog, CompletionSet, Course, CourseCode, Outcome, Requirements, Tracker,
    progress_from_bytes, progress_to_bytes,
};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn code(i: usize) -> CourseCode {
    CourseCode::new(format!("C{i:03}"))
}

/// A valid, acyclic catalog: course `i` may require only courses `< i`.
fn layered_catalog() -> impl Strategy<Value = Catalog> {
    vec(vec(any::<prop::sample::Index>(), 0..4), 1..24).prop_map(|layers| {
        let mut courses = Vec::new();
        for (i, picks) in layers.iter().enumerate() {
            let mut reqs = BTreeSet::new();
            if i > 0 {
                for pick in picks {
                    reqs.insert(code(pick.index(i)));
                }
            }
            courses.push(Course::new(
                code(i),
                format!("Course {i}"),
                (i as u32) / 4 + 1,
                Requirements::of(reqs),
            ));
        }
        Catalog::new(courses).expect("layered catalog is valid by construction")
    })
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// A blocked completion request never mutates the completion set, and
    /// repeats with the identical missing list until the set changes.
    #[test]
    fn blocked_completion_never_mutates(catalog in layered_catalog()) {
        let mut tracker = Tracker::new(catalog.clone());

        let codes: Vec<CourseCode> = catalog.courses().map(|c| c.code.clone()).collect();
        for course_code in &codes {
            let missing = tracker.missing_prerequisites(course_code).expect("query");
            if missing.is_empty() {
                continue;
            }

            let before = tracker.progress().clone();
            let first = tracker.request_completion(course_code).expect("request");
            let second = tracker.request_completion(course_code).expect("request");

            prop_assert_eq!(&first, &Outcome::Blocked(missing));
            prop_assert_eq!(&second, &first);
            prop_assert_eq!(tracker.progress(), &before);
        }
    }

    /// Completing courses in declaration order always succeeds: every
    /// prerequisite was declared earlier, so the missing list is empty by
    /// the time each course is requested.
    #[test]
    fn declaration_order_completion_always_succeeds(catalog in layered_catalog()) {
        let mut tracker = Tracker::new(catalog.clone());

        let codes: Vec<CourseCode> = catalog.courses().map(|c| c.code.clone()).collect();
        for course_code in &codes {
            prop_assert!(tracker.missing_prerequisites(course_code).expect("query").is_empty());
            let outcome = tracker.request_completion(course_code).expect("request");
            prop_assert_eq!(outcome, Outcome::Success);
        }
        prop_assert_eq!(tracker.completed_count(), catalog.len());
    }

    /// Reverting in reverse declaration order unwinds a full completion back
    /// to the empty set: each course's dependents were declared later and
    /// are already reverted.
    #[test]
    fn reverse_order_reversion_unwinds_everything(catalog in layered_catalog()) {
        let mut tracker = Tracker::new(catalog.clone());

        let codes: Vec<CourseCode> = catalog.courses().map(|c| c.code.clone()).collect();
        for course_code in &codes {
            tracker.request_completion(course_code).expect("request");
        }
        for course_code in codes.iter().rev() {
            let outcome = tracker.request_reversion(course_code).expect("request");
            prop_assert_eq!(outcome, Outcome::Success);
        }
        prop_assert!(tracker.progress().is_empty());
    }

    /// With everything completed, reverting any course that some completed
    /// course depends on is blocked and mutates nothing.
    #[test]
    fn dependent_protection_holds_under_full_completion(catalog in layered_catalog()) {
        let mut tracker = Tracker::new(catalog.clone());

        let codes: Vec<CourseCode> = catalog.courses().map(|c| c.code.clone()).collect();
        for course_code in &codes {
            tracker.request_completion(course_code).expect("request");
        }

        for course_code in &codes {
            let dependents = tracker.completed_dependents(course_code).expect("query");
            let before = tracker.progress().clone();
            let outcome = tracker.request_reversion(course_code).expect("request");

            if dependents.is_empty() {
                prop_assert_eq!(outcome, Outcome::Success);
                // Restore for the remaining iterations.
                tracker.request_completion(course_code).expect("request");
            } else {
                let expected: Vec<CourseCode> = dependents.into_iter().collect();
                prop_assert_eq!(outcome, Outcome::Blocked(expected));
                prop_assert_eq!(tracker.progress(), &before);
            }
        }
    }

    /// Complete-then-revert returns the completion set to its prior value.
    #[test]
    fn reversion_symmetry(catalog in layered_catalog()) {
        let mut tracker = Tracker::new(catalog.clone());

        let codes: Vec<CourseCode> = catalog.courses().map(|c| c.code.clone()).collect();
        for course_code in &codes {
            let before = tracker.progress().clone();
            tracker.request_completion(course_code).expect("request");
            let outcome = tracker.request_reversion(course_code).expect("request");

            prop_assert_eq!(outcome, Outcome::Success);
            prop_assert_eq!(tracker.progress(), &before);

            // Re-complete so later courses stay eligible.
            tracker.request_completion(course_code).expect("request");
        }
    }

    /// Reset empties the set regardless of the completion sequence.
    #[test]
    fn reset_always_yields_the_empty_set(
        catalog in layered_catalog(),
        keep in vec(any::<bool>(), 24)
    ) {
        let mut tracker = Tracker::new(catalog.clone());

        let codes: Vec<CourseCode> = catalog.courses().map(|c| c.code.clone()).collect();
        for (i, course_code) in codes.iter().enumerate() {
            if keep.get(i).copied().unwrap_or(false) {
                tracker.request_completion(course_code).expect("request");
            }
        }

        tracker.reset();
        prop_assert!(tracker.progress().is_empty());
    }

    /// Identical request sequences produce identical completion sets.
    #[test]
    fn transitions_are_deterministic(catalog in layered_catalog()) {
        let mut tracker1 = Tracker::new(catalog.clone());
        let mut tracker2 = Tracker::new(catalog.clone());

        let codes: Vec<CourseCode> = catalog.courses().map(|c| c.code.clone()).collect();
        for course_code in codes.iter().rev() {
            let first = tracker1.request_completion(course_code).expect("request");
            let second = tracker2.request_completion(course_code).expect("request");
            prop_assert_eq!(first, second);
        }
        prop_assert_eq!(tracker1.progress(), tracker2.progress());
    }

    /// Snapshot serialization round-trips any set of codes.
    #[test]
    fn snapshot_roundtrip(raw_codes in vec("[A-Z]{3}[0-9]{3}", 0..40)) {
        let progress = CompletionSet::from_codes(raw_codes.into_iter().map(CourseCode::new));

        let bytes = progress_to_bytes(&progress).expect("serialize");
        let restored = progress_from_bytes(&bytes).expect("deserialize");

        prop_assert_eq!(restored, progress);
    }
}
