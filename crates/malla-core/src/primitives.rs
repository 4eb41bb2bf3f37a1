//! # Compiled-In Constants
//!
//! Hardcoded runtime constants for the Malla core.
//!
//! These are compiled into the binary and are immutable at runtime. They
//! bound every input surface (catalog construction, persistence parsing) so
//! that all operations stay computationally bounded.

/// Magic bytes for the Malla binary progress-snapshot header.
///
/// - File Header = Magic Bytes ("MLLA") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"MLLA";

/// Current serialization format version.
///
/// Increment this when making breaking changes to the snapshot format.
pub const FORMAT_VERSION: u8 = 1;

/// Maximum allowed payload size for the progress snapshot.
///
/// A completion set holds at most one code per catalog course, so 1 MiB is
/// far above any legitimate snapshot. The limit is validated BEFORE
/// attempting deserialization.
pub const MAX_PERSISTENCE_PAYLOAD_SIZE: usize = 1024 * 1024;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of courses accepted in a single catalog.
pub const MAX_CATALOG_COURSES: usize = 4096;

/// Maximum length for course codes.
///
/// Codes longer than this are rejected at catalog construction.
pub const MAX_CODE_LENGTH: usize = 32;

/// Maximum length for course display names.
///
/// Names longer than this are rejected at catalog construction.
pub const MAX_NAME_LENGTH: usize = 256;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_bytes_correct() {
        assert_eq!(MAGIC_BYTES, b"MLLA");
    }

    #[test]
    fn snapshot_limit_bounds_a_full_catalog() {
        // Every course code persisted at maximum length must fit.
        assert!(MAX_CATALOG_COURSES * MAX_CODE_LENGTH < MAX_PERSISTENCE_PAYLOAD_SIZE);
    }
}
