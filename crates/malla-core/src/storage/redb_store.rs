//! # redb-backed Progress Storage
//!
//! A disk-backed progress store using the redb embedded database.
//!
//! This gives the tracker ACID saves with zero configuration: every
//! mutation replaces the completed-codes table in a single transaction, so
//! a crash mid-save leaves the previous snapshot intact.

use crate::progress::CompletionSet;
use crate::storage::ProgressStore;
use crate::types::{CourseCode, MallaError};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;

/// Table for completed courses: course code -> unit marker.
const COMPLETED: TableDefinition<&str, ()> = TableDefinition::new("completed");

/// A disk-backed progress store using redb.
pub struct RedbStore {
    /// The redb database handle.
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a progress database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MallaError> {
        let db =
            Database::create(path.as_ref()).map_err(|e| MallaError::IoError(e.to_string()))?;

        // Initialize the table if it doesn't exist
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| MallaError::IoError(e.to_string()))?;
            let _ = write_txn
                .open_table(COMPLETED)
                .map_err(|e| MallaError::IoError(e.to_string()))?;
            write_txn
                .commit()
                .map_err(|e| MallaError::IoError(e.to_string()))?;
        }

        Ok(Self { db })
    }

    /// Compact the database (optional optimization).
    pub fn compact(&mut self) -> Result<(), MallaError> {
        self.db
            .compact()
            .map_err(|e| MallaError::IoError(e.to_string()))?;
        Ok(())
    }
}

impl ProgressStore for RedbStore {
    fn load(&self) -> Result<Option<CompletionSet>, MallaError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| MallaError::IoError(e.to_string()))?;
        let table = read_txn
            .open_table(COMPLETED)
            .map_err(|e| MallaError::IoError(e.to_string()))?;

        let mut codes = Vec::new();
        for entry in table
            .iter()
            .map_err(|e| MallaError::IoError(e.to_string()))?
        {
            let (key, _) = entry.map_err(|e| MallaError::IoError(e.to_string()))?;
            codes.push(CourseCode::new(key.value()));
        }

        Ok(Some(CompletionSet::from_codes(codes)))
    }

    fn save(&mut self, progress: &CompletionSet) -> Result<(), MallaError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| MallaError::IoError(e.to_string()))?;

        // Replace the snapshot wholesale inside one transaction.
        write_txn
            .delete_table(COMPLETED)
            .map_err(|e| MallaError::IoError(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(COMPLETED)
                .map_err(|e| MallaError::IoError(e.to_string()))?;
            for code in progress.iter() {
                table
                    .insert(code.as_str(), ())
                    .map_err(|e| MallaError::IoError(e.to_string()))?;
            }
        }

        write_txn
            .commit()
            .map_err(|e| MallaError::IoError(e.to_string()))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), MallaError> {
        self.save(&CompletionSet::new())
    }
}

// =============================================================================
// TESTS
// =============================================================================
