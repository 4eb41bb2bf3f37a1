//! # File-backed Progress Storage
//!
//! A single-snapshot progress store: one file in the binary snapshot layout
//! from `malla_core::formats`. An absent file means absent progress — the
//! distinction a first run needs.
//!
//! This is the lightweight alternative to the redb backend for users who
//! want a copyable, single-file progress record.

use malla_core::{
    CompletionSet, MallaError, ProgressStore, primitives::MAX_PERSISTENCE_PAYLOAD_SIZE,
    progress_from_bytes, progress_to_bytes,
};
use std::path::{Path, PathBuf};

/// A file-backed progress store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store over the given snapshot path. The file is not touched
    /// until the first `save`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for FileStore {
    fn load(&self) -> Result<Option<CompletionSet>, MallaError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let metadata = std::fs::metadata(&self.path)
            .map_err(|e| MallaError::IoError(format!("Cannot read snapshot metadata: {}", e)))?;
        if metadata.len() > MAX_PERSISTENCE_PAYLOAD_SIZE as u64 {
            return Err(MallaError::DeserializationError(format!(
                "Snapshot size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_PERSISTENCE_PAYLOAD_SIZE
            )));
        }

        let bytes = std::fs::read(&self.path).map_err(|e| {
            MallaError::IoError(format!("Cannot read '{}': {}", self.path.display(), e))
        })?;
        Ok(Some(progress_from_bytes(&bytes)?))
    }

    fn save(&mut self, progress: &CompletionSet) -> Result<(), MallaError> {
        let bytes = progress_to_bytes(progress)?;
        std::fs::write(&self.path, bytes).map_err(|e| {
            MallaError::IoError(format!("Cannot write '{}': {}", self.path.display(), e))
        })
    }

    fn clear(&mut self) -> Result<(), MallaError> {
        if !self.path.exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path).map_err(|e| {
            MallaError::IoError(format!("Cannot remove '{}': {}", self.path.display(), e))
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use malla_core::CourseCode;

    #[test]
    fn absent_file_loads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("progress.malla"));

        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path().join("progress.malla"));

        let progress = CompletionSet::from_codes([CourseCode::new("TTS101")]);
        store.save(&progress).expect("save");

        let loaded = store.load().expect("load").expect("present");
        assert_eq!(loaded, progress);
    }

    #[test]
    fn clear_removes_the_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileStore::new(dir.path().join("progress.malla"));

        store
            .save(&CompletionSet::from_codes([CourseCode::new("A")]))
            .expect("save");
        store.clear().expect("clear");

        assert!(store.load().expect("load").is_none());
        // Clearing an already-absent snapshot is a no-op.
        store.clear().expect("clear again");
    }

    #[test]
    fn corrupted_snapshot_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("progress.malla");
        std::fs::write(&path, b"XXXX\x01garbage").expect("write");

        let store = FileStore::new(path);
        assert!(store.load().is_err());
    }
}
