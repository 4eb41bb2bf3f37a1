//! # malla-core
//!
//! The deterministic curriculum-consistency engine for Malla - THE LOGIC.
//!
//! This crate tracks a student's progress through a fixed curriculum graph,
//! enforcing prerequisite dependencies in both directions: a course cannot
//! be completed until its prerequisites are complete, and a completed course
//! cannot be reverted while completed courses still depend on it.
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Is the ONLY place where progress state exists (stateful)
//! - Is pure Rust: no async, no network dependencies
//! - Is deterministic: `BTreeMap`/`BTreeSet` only, no floats, no randomness
//! - Derives "blocked" on every query; it is never stored state

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod formats;
pub mod primitives;
pub mod progress;
pub mod query;
pub mod storage;
pub mod tracker;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Course, CourseCode, CourseState, MallaError, Outcome, Requirements};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use catalog::Catalog;
pub use progress::CompletionSet;
pub use query::{completed_dependents, missing_prerequisites};
pub use tracker::{StorageBackend, Tracker};

// =============================================================================
// RE-EXPORTS: Formats & Storage
// =============================================================================

pub use formats::{progress_from_bytes, progress_to_bytes};
pub use storage::{ProgressStore, RedbStore};
