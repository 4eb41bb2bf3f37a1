//! # Catalog File Loading
//!
//! TOML catalog definitions and the embedded default curriculum.
//!
//! The file format uses `[[course]]` tables with `code`, `name`, `semester`
//! and `requires` — either an array of course codes or the keyword `"ALL"`
//! for the single requires-everything course. The keyword is mapped to
//! `Requirements::All` here, at the parsing boundary; past this module only
//! the tagged form exists.

use malla_core::{Catalog, Course, CourseCode, MallaError, Requirements};
use serde::Deserialize;
use std::path::Path;

/// The `requires` keyword meaning "every other course in the catalog".
pub const ALL_KEYWORD: &str = "ALL";

/// Maximum file size for catalog definitions (1 MiB).
const MAX_CATALOG_FILE_SIZE: u64 = 1024 * 1024;

/// The built-in default curriculum (five semesters, requires-all practicum).
const DEFAULT_CATALOG_TOML: &str = include_str!("default_catalog.toml");

// =============================================================================
// RAW FILE REPRESENTATION
// =============================================================================

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    course: Vec<RawCourse>,
}

#[derive(Debug, Deserialize)]
struct RawCourse {
    code: String,
    name: String,
    semester: u32,
    #[serde(default)]
    requires: RawRequires,
}

/// `requires` accepts a list of codes or a bare keyword string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRequires {
    Keyword(String),
    Codes(Vec<String>),
}

impl Default for RawRequires {
    fn default() -> Self {
        Self::Codes(Vec::new())
    }
}

impl RawRequires {
    fn into_requirements(self, course: &str) -> Result<Requirements, MallaError> {
        match self {
            Self::Codes(codes) => Ok(Requirements::of(codes.into_iter().map(CourseCode::new))),
            Self::Keyword(word) if word == ALL_KEYWORD => Ok(Requirements::All),
            Self::Keyword(word) => Err(MallaError::DeserializationError(format!(
                "course {course}: unknown requires keyword '{word}' (expected \"{ALL_KEYWORD}\" or a list of codes)"
            ))),
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Parse a TOML catalog definition into a validated `Catalog`.
pub fn parse_catalog(text: &str) -> Result<Catalog, MallaError> {
    let file: CatalogFile =
        toml::from_str(text).map_err(|e| MallaError::DeserializationError(e.to_string()))?;

    let mut courses = Vec::with_capacity(file.course.len());
    for raw in file.course {
        let requirements = raw.requires.into_requirements(&raw.code)?;
        courses.push(Course::new(
            CourseCode::new(raw.code),
            raw.name,
            raw.semester,
            requirements,
        ));
    }

    Catalog::new(courses)
}

/// The built-in default curriculum.
pub fn default_catalog() -> Result<Catalog, MallaError> {
    parse_catalog(DEFAULT_CATALOG_TOML)
}

/// Load a catalog from a TOML file, or the built-in default when no path is
/// given.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, MallaError> {
    match path {
        None => default_catalog(),
        Some(path) => {
            let metadata = std::fs::metadata(path)
                .map_err(|e| MallaError::IoError(format!("Cannot read catalog metadata: {}", e)))?;
            if metadata.len() > MAX_CATALOG_FILE_SIZE {
                return Err(MallaError::CatalogLimit(format!(
                    "Catalog file size {} bytes exceeds maximum allowed {} bytes",
                    metadata.len(),
                    MAX_CATALOG_FILE_SIZE
                )));
            }

            let text = std::fs::read_to_string(path).map_err(|e| {
                MallaError::IoError(format!("Cannot read catalog '{}': {}", path.display(), e))
            })?;
            parse_catalog(&text)
        }
    }
}
