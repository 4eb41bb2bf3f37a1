//! # Persistence Format
//!
//! Binary serialization for the completion set.
//!
//! Format: Header (5 bytes) + postcard-serialized code list.
//! - 4 bytes: Magic ("MLLA")
//! - 1 byte: Version
//!
//! Pre-deserialization validation: minimum size, maximum payload size, and
//! header magic/version are all checked BEFORE the payload is parsed, so
//! corrupted or oversized data fails with a descriptive error instead of an
//! allocation blowup.

use crate::progress::CompletionSet;
use crate::types::{CourseCode, MallaError};
use crate::primitives;
use serde::{Deserialize, Serialize};

/// Minimum valid snapshot size (header only).
const MIN_SNAPSHOT_SIZE: usize = 5;

// =============================================================================
// FILE HEADER
// =============================================================================

/// The snapshot header precedes the persisted completion set.
#[derive(Debug, Clone, Copy)]
pub struct ProgressHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl ProgressHeader {
    /// Create a new header with the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), MallaError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(MallaError::DeserializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(MallaError::DeserializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 5] {
        let mut bytes = [0u8; 5];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MallaError> {
        if bytes.len() < MIN_SNAPSHOT_SIZE {
            return Err(MallaError::DeserializationError(
                "Header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for ProgressHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serializable representation of the completion set.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableProgress {
    codes: Vec<CourseCode>,
}

/// Serialize a completion set to bytes (header + payload).
///
/// This is a pure transformation - no file I/O.
pub fn progress_to_bytes(progress: &CompletionSet) -> Result<Vec<u8>, MallaError> {
    let header = ProgressHeader::new();
    let serializable = SerializableProgress {
        codes: progress.iter().cloned().collect(),
    };

    let payload = postcard::to_stdvec(&serializable)
        .map_err(|e| MallaError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(MIN_SNAPSHOT_SIZE + payload.len());
    result.extend_from_slice(&header.to_bytes());
    result.extend_from_slice(&payload);

    Ok(result)
}

/// Deserialize a completion set from bytes.
///
/// This is a pure transformation - no file I/O. Validates minimum size,
/// maximum payload size, and the header before parsing the payload.
pub fn progress_from_bytes(bytes: &[u8]) -> Result<CompletionSet, MallaError> {
    if bytes.len() < MIN_SNAPSHOT_SIZE {
        return Err(MallaError::DeserializationError(
            "Data too short: minimum 5 bytes required".to_string(),
        ));
    }

    if bytes.len() > primitives::MAX_PERSISTENCE_PAYLOAD_SIZE {
        return Err(MallaError::DeserializationError(format!(
            "Data size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            primitives::MAX_PERSISTENCE_PAYLOAD_SIZE
        )));
    }

    let header = ProgressHeader::from_bytes(bytes)?;
    header.validate()?;

    let payload = &bytes[MIN_SNAPSHOT_SIZE..];
    let serializable: SerializableProgress = postcard::from_bytes(payload).map_err(|e| {
        MallaError::DeserializationError(format!("Failed to deserialize progress data: {}", e))
    })?;

    Ok(CompletionSet::from_codes(serializable.codes))
}

// =============================================================================
// TESTS
// =============================================================================
