//! # Tracker Module
//!
//! The transition controller: applies requested state changes to the
//! completion set after consulting the dependency queries, and reports the
//! applicable outcome.
//!
//! ## Storage Backends
//!
//! A tracker persists through one of two backends:
//! - `InMemory`: no persistence; the caller owns saving (the file-backed
//!   CLI flow loads before and saves after each invocation)
//! - `Persistent`: a `RedbStore` written after every mutation
//!
//! Persistence is fail-soft: on a storage error the tracker logs a warning
//! and continues with the in-memory completion set as the source of truth
//! for the rest of the session. Storage never blocks a transition.

use crate::catalog::Catalog;
use crate::progress::CompletionSet;
use crate::query;
use crate::storage::{ProgressStore, RedbStore};
use crate::types::{CourseCode, CourseState, MallaError, Outcome};
use std::collections::BTreeSet;
use std::path::Path;

// =============================================================================
// ERROR LOGGING HELPERS
// =============================================================================

/// Log a storage error on stderr in a structured line.
///
/// The core avoids a tracing dependency to stay minimal; the app layer can
/// redirect stderr into its own subscriber if needed.
fn log_storage_warn(context: &str, error: &MallaError) {
    eprintln!(
        "{{\"level\":\"warn\",\"target\":\"malla_core::tracker\",\"message\":\"storage error in {}: {}\"}}",
        context, error
    );
}

/// Storage backend for a Tracker.
#[derive(Debug, Default)]
pub enum StorageBackend {
    /// No persistence; state lives only in memory.
    #[default]
    InMemory,
    /// Disk-backed progress using redb (ACID, persistent).
    Persistent(RedbStore),
}

// NOTE: StorageBackend does NOT implement Clone.
// RedbStore (database handle) cannot be safely cloned.

/// The transition controller over (Catalog, CompletionSet, StorageBackend).
///
/// Per-course state is a two-state machine: `NotStarted` and `Completed`.
/// "Blocked" is never stored — it is recomputed from the forward query on
/// every request, because the completion set can change between queries.
///
/// No operation ever partially mutates the completion set: each transition
/// is a single atomic add/remove guarded by its precondition check, which is
/// safe under the single-threaded, single-user model.
#[derive(Debug)]
pub struct Tracker {
    /// The immutable curriculum catalog.
    catalog: Catalog,
    /// The mutable set of completed course codes.
    completed: CompletionSet,
    /// The storage backend written after every mutation.
    backend: StorageBackend,
}

impl Tracker {
    /// Create a tracker with an empty completion set and no persistence.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            completed: CompletionSet::new(),
            backend: StorageBackend::InMemory,
        }
    }

    /// Create a tracker from previously persisted progress.
    ///
    /// Codes without a catalog entry are dropped (logged, never a crash):
    /// persisted state from an older catalog version must not poison the
    /// dependency queries.
    #[must_use]
    pub fn with_progress(catalog: Catalog, mut progress: CompletionSet) -> Self {
        let dropped = progress.retain_known(&catalog);
        if dropped > 0 {
            log_storage_warn(
                "restore",
                &MallaError::DeserializationError(format!(
                    "dropped {dropped} persisted code(s) with no catalog entry"
                )),
            );
        }
        Self {
            catalog,
            completed: progress,
            backend: StorageBackend::InMemory,
        }
    }

    /// Create a tracker backed by a redb database at the given path.
    ///
    /// Opens or creates the database, restores any persisted progress, and
    /// persists every subsequent mutation automatically.
    pub fn with_redb(catalog: Catalog, path: impl AsRef<Path>) -> Result<Self, MallaError> {
        let store = RedbStore::open(path)?;
        let progress = store.load()?.unwrap_or_default();
        let mut tracker = Self::with_progress(catalog, progress);
        tracker.backend = StorageBackend::Persistent(store);
        Ok(tracker)
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get a reference to the completion set.
    #[must_use]
    pub fn progress(&self) -> &CompletionSet {
        &self.completed
    }

    /// Check if using persistent storage.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, StorageBackend::Persistent(_))
    }

    // =========================================================================
    // DERIVED STATE & QUERY PASSTHROUGHS
    // =========================================================================

    /// Derived state of a course.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCourse` if `code` has no catalog entry.
    pub fn state(&self, code: &CourseCode) -> Result<CourseState, MallaError> {
        if !self.catalog.contains(code) {
            return Err(MallaError::UnknownCourse(code.clone()));
        }
        if self.completed.contains(code) {
            Ok(CourseState::Completed)
        } else {
            Ok(CourseState::NotStarted)
        }
    }

    /// Forward check: prerequisites of `code` not yet completed.
    pub fn missing_prerequisites(&self, code: &CourseCode) -> Result<Vec<CourseCode>, MallaError> {
        query::missing_prerequisites(&self.catalog, &self.completed, code)
    }

    /// Backward check: completed courses that depend on `code`.
    pub fn completed_dependents(
        &self,
        code: &CourseCode,
    ) -> Result<BTreeSet<CourseCode>, MallaError> {
        query::completed_dependents(&self.catalog, &self.completed, code)
    }

    /// Number of completed courses.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    /// Request marking a course complete.
    ///
    /// Preconditions: the code exists in the catalog and the course is
    /// currently `NotStarted`. With missing prerequisites the request is
    /// refused with `Outcome::Blocked(missing)` (in display order) and
    /// nothing mutates; otherwise the course is added, persisted, and
    /// `Outcome::Success` is returned.
    ///
    /// # Errors
    ///
    /// `UnknownCourse` for a code outside the catalog; `AlreadyCompleted`
    /// when the precondition fails (caller misuse, not a user-facing state).
    pub fn request_completion(&mut self, code: &CourseCode) -> Result<Outcome, MallaError> {
        if !self.catalog.contains(code) {
            return Err(MallaError::UnknownCourse(code.clone()));
        }
        if self.completed.contains(code) {
            return Err(MallaError::AlreadyCompleted(code.clone()));
        }

        let missing = query::missing_prerequisites(&self.catalog, &self.completed, code)?;
        if !missing.is_empty() {
            return Ok(Outcome::Blocked(missing));
        }

        self.completed.insert(code.clone());
        self.persist("request_completion");
        Ok(Outcome::Success)
    }

    /// Request reverting a completed course.
    ///
    /// Preconditions: the code exists in the catalog and the course is
    /// currently `Completed`. With completed dependents the request is
    /// refused with `Outcome::Blocked(dependents)` and nothing mutates;
    /// otherwise the course is removed, persisted, and `Outcome::Success`
    /// is returned.
    ///
    /// The blocked list reuses the completion shape but carries dependents,
    /// not prerequisites — callers distinguish by the operation.
    ///
    /// # Errors
    ///
    /// `UnknownCourse` for a code outside the catalog; `NotCompleted` when
    /// the precondition fails.
    pub fn request_reversion(&mut self, code: &CourseCode) -> Result<Outcome, MallaError> {
        if !self.catalog.contains(code) {
            return Err(MallaError::UnknownCourse(code.clone()));
        }
        if !self.completed.contains(code) {
            return Err(MallaError::NotCompleted(code.clone()));
        }

        let dependents = query::completed_dependents(&self.catalog, &self.completed, code)?;
        if !dependents.is_empty() {
            return Ok(Outcome::Blocked(dependents.into_iter().collect()));
        }

        self.completed.remove(code);
        self.persist("request_reversion");
        Ok(Outcome::Success)
    }

    /// Clear the completion set entirely and persist the empty set.
    ///
    /// Always succeeds; has no preconditions. A storage failure is logged
    /// and the in-memory state is still cleared.
    pub fn reset(&mut self) {
        self.completed.clear();
        if let StorageBackend::Persistent(store) = &mut self.backend {
            if let Err(e) = store.clear() {
                log_storage_warn("reset", &e);
            }
        }
    }

    /// Persist the completion set through the backend, fail-soft.
    fn persist(&mut self, context: &str) {
        if let StorageBackend::Persistent(store) = &mut self.backend {
            if let Err(e) = store.save(&self.completed) {
                log_storage_warn(context, &e);
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
