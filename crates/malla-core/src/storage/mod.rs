//! # Storage Module
//!
//! The persistence collaborator seam for progress data.
//!
//! `ProgressStore` is the interface the `Tracker` persists through; the
//! core ships a redb-backed implementation and the app layer adds a
//! file-backed one. Storage failures never block core logic — the tracker
//! treats them as fail-soft.

pub mod redb_store;

pub use redb_store::RedbStore;

use crate::progress::CompletionSet;
use crate::types::MallaError;

/// The persistence collaborator interface.
///
/// Implementations hold one completion-set snapshot. `load` distinguishes
/// "never written" (`None`) from an empty set so callers can tell a first
/// run from a reset one.
pub trait ProgressStore {
    /// Load the persisted completion set, or `None` if absent.
    fn load(&self) -> Result<Option<CompletionSet>, MallaError>;

    /// Replace the persisted snapshot with `progress`.
    fn save(&mut self, progress: &CompletionSet) -> Result<(), MallaError>;

    /// Remove all persisted progress.
    fn clear(&mut self) -> Result<(), MallaError>;
}
