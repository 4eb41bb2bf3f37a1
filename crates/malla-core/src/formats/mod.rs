//! # Formats Module
//!
//! Pure byte-level serialization for the persisted completion set.
//! File I/O lives in the storage backends and the app layer.

pub mod persistence;

pub use persistence::{ProgressHeader, progress_from_bytes, progress_to_bytes};
