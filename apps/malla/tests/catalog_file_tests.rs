//! Unit tests for catalog TOML loading and the embedded default curriculum.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use malla::catalog_file::{default_catalog, load_catalog, parse_catalog};
use malla_core::{CourseCode, MallaError, Requirements};
use std::io::Write;

// =============================================================================
// DEFAULT CATALOG TESTS
// =============================================================================

#[test]
fn default_catalog_is_valid() {
    let catalog = default_catalog().unwrap();
    assert_eq!(catalog.len(), 25);
    assert_eq!(catalog.by_semester().len(), 5);
}

#[test]
fn default_catalog_practicum_requires_all() {
    let catalog = default_catalog().unwrap();
    let practicum = catalog.requires_all_course().unwrap();
    assert_eq!(practicum.code, CourseCode::new("LAB001"));
    assert_eq!(practicum.semester, 5);
}

#[test]
fn default_catalog_preserves_declaration_order() {
    let catalog = default_catalog().unwrap();
    let first = catalog.courses().next().unwrap();
    assert_eq!(first.code, CourseCode::new("TTS101"));
}

// =============================================================================
// PARSING TESTS
// =============================================================================

#[test]
fn parse_explicit_requirements() {
    let catalog = parse_catalog(
        r#"
        [[course]]
        code = "A"
        name = "Alpha"
        semester = 1
        requires = []

        [[course]]
        code = "B"
        name = "Beta"
        semester = 2
        requires = ["A"]
        "#,
    )
    .unwrap();

    let beta = catalog.get(&CourseCode::new("B")).unwrap();
    assert_eq!(
        beta.requirements,
        Requirements::of([CourseCode::new("A")])
    );
}

#[test]
fn parse_all_keyword_maps_to_the_tagged_form() {
    let catalog = parse_catalog(
        r#"
        [[course]]
        code = "A"
        name = "Alpha"
        semester = 1

        [[course]]
        code = "LAB"
        name = "Practicum"
        semester = 2
        requires = "ALL"
        "#,
    )
    .unwrap();

    let lab = catalog.get(&CourseCode::new("LAB")).unwrap();
    assert_eq!(lab.requirements, Requirements::All);
}

#[test]
fn missing_requires_field_defaults_to_no_prerequisites() {
    let catalog = parse_catalog(
        r#"
        [[course]]
        code = "A"
        name = "Alpha"
        semester = 1
        "#,
    )
    .unwrap();

    let alpha = catalog.get(&CourseCode::new("A")).unwrap();
    assert_eq!(alpha.requirements, Requirements::none());
}

#[test]
fn unknown_requires_keyword_rejected() {
    let result = parse_catalog(
        r#"
        [[course]]
        code = "A"
        name = "Alpha"
        semester = 1
        requires = "EVERYTHING"
        "#,
    );
    assert!(matches!(result, Err(MallaError::DeserializationError(_))));
}

#[test]
fn dangling_requirement_rejected_at_load_time() {
    let result = parse_catalog(
        r#"
        [[course]]
        code = "A"
        name = "Alpha"
        semester = 1
        requires = ["GHOST"]
        "#,
    );
    assert!(matches!(result, Err(MallaError::DanglingRequirement { .. })));
}

#[test]
fn malformed_toml_rejected() {
    let result = parse_catalog("[[course]\ncode = ");
    assert!(matches!(result, Err(MallaError::DeserializationError(_))));
}

// =============================================================================
// FILE LOADING TESTS
// =============================================================================

#[test]
fn load_catalog_without_path_uses_the_default() {
    let catalog = load_catalog(None).unwrap();
    assert_eq!(catalog.len(), 25);
}

#[test]
fn load_catalog_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"
        [[course]]
        code = "A"
        name = "Alpha"
        semester = 1
        "#
    )
    .unwrap();

    let catalog = load_catalog(Some(&path)).unwrap();
    assert_eq!(catalog.len(), 1);
}

#[test]
fn load_catalog_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_catalog(Some(&dir.path().join("absent.toml")));
    assert!(matches!(result, Err(MallaError::IoError(_))));
}
