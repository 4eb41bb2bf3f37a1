//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Every command loads the catalog, opens the progress backend, runs one
//! query or transition against the tracker, and renders the result — text
//! by default, JSON with `--json-mode`.

use crate::catalog_file;
use crate::store_file::FileStore;
use malla_core::{
    Catalog, CompletionSet, CourseCode, CourseState, MallaError, Outcome, ProgressStore,
    RedbStore, Tracker,
};
use std::path::{Path, PathBuf};

// =============================================================================
// BACKEND PLUMBING
// =============================================================================

/// Open a tracker over the requested backend.
///
/// The redb backend persists inside the tracker after every mutation. The
/// file backend loads here and saves once after the command, via the
/// returned store — one CLI invocation is one transition, so the cadence is
/// the same at process granularity.
fn open_tracker(
    db_path: &Path,
    backend: &str,
    catalog: Catalog,
) -> Result<(Tracker, Option<FileStore>), MallaError> {
    match backend {
        "redb" => Ok((Tracker::with_redb(catalog, db_path)?, None)),
        "file" => {
            let store = FileStore::new(db_path);
            let progress = store.load()?.unwrap_or_default();
            Ok((Tracker::with_progress(catalog, progress), Some(store)))
        }
        other => Err(MallaError::IoError(format!(
            "Unknown backend '{}' (expected \"redb\" or \"file\")",
            other
        ))),
    }
}

/// Persist file-backend progress, fail-soft: the in-memory transition
/// already happened and storage must not retract it.
fn save_progress(store: Option<&mut FileStore>, tracker: &Tracker) {
    if let Some(store) = store {
        if let Err(e) = store.save(tracker.progress()) {
            tracing::warn!("progress not persisted: {}", e);
        }
    }
}

/// `CODE - Display Name` line for a blocking-list entry.
fn course_line(catalog: &Catalog, code: &CourseCode) -> String {
    match catalog.get(code) {
        Some(course) => format!("{} - {}", course.code, course.name),
        None => code.to_string(),
    }
}

fn blocking_json(catalog: &Catalog, codes: &[CourseCode]) -> Vec<serde_json::Value> {
    codes
        .iter()
        .map(|code| {
            serde_json::json!({
                "code": code.as_str(),
                "name": catalog.get(code).map(|c| c.name.as_str()).unwrap_or_default(),
            })
        })
        .collect()
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show the curriculum grid with per-course states.
pub fn cmd_status(
    db_path: &PathBuf,
    backend: &str,
    catalog_path: Option<&Path>,
    json_mode: bool,
) -> Result<(), MallaError> {
    let catalog = catalog_file::load_catalog(catalog_path)?;
    let (tracker, _) = open_tracker(db_path, backend, catalog)?;

    let total = tracker.catalog().len();
    let completed = tracker.completed_count();
    // Integer percent; no floats in this workspace.
    let percent = if total == 0 { 0 } else { completed * 100 / total };

    if json_mode {
        let mut courses = Vec::with_capacity(total);
        for course in tracker.catalog().courses() {
            let state = tracker.state(&course.code)?;
            let missing = match state {
                CourseState::Completed => Vec::new(),
                CourseState::NotStarted => tracker.missing_prerequisites(&course.code)?,
            };
            courses.push(serde_json::json!({
                "code": course.code.as_str(),
                "name": course.name,
                "semester": course.semester,
                "state": state.name(),
                "missing": missing.iter().map(CourseCode::as_str).collect::<Vec<_>>(),
            }));
        }
        let output = serde_json::json!({
            "database": db_path.to_string_lossy(),
            "backend": backend,
            "completed": completed,
            "total": total,
            "percent": percent,
            "courses": courses,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Malla Curriculum Status");
    println!("=======================");
    println!("Database: {:?}", db_path);
    println!("Backend:  {}", backend);
    println!();
    println!("Progress: {} / {} completed ({}%)", completed, total, percent);

    for (semester, courses) in tracker.catalog().by_semester() {
        println!();
        println!("Semester {}", semester);
        for course in courses {
            let marker = match tracker.state(&course.code)? {
                CourseState::Completed => "[x]",
                CourseState::NotStarted => {
                    if tracker.missing_prerequisites(&course.code)?.is_empty() {
                        "[ ]"
                    } else {
                        "[!]"
                    }
                }
            };
            println!("  {} {:<8} {}", marker, course.code, course.name);
        }
    }

    println!();
    println!("[x] completed   [ ] available   [!] blocked");
    Ok(())
}

// =============================================================================
// TRANSITION COMMANDS
// =============================================================================

/// Mark a course complete.
pub fn cmd_complete(
    db_path: &PathBuf,
    backend: &str,
    catalog_path: Option<&Path>,
    json_mode: bool,
    code: &str,
) -> Result<(), MallaError> {
    let catalog = catalog_file::load_catalog(catalog_path)?;
    let (mut tracker, mut store) = open_tracker(db_path, backend, catalog)?;

    let code = CourseCode::new(code);
    let outcome = tracker.request_completion(&code)?;
    if !outcome.is_blocked() {
        save_progress(store.as_mut(), &tracker);
    }

    let name = course_line(tracker.catalog(), &code);
    match &outcome {
        Outcome::Success => {
            if json_mode {
                let output = serde_json::json!({
                    "course": code.as_str(),
                    "outcome": "success",
                });
                println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
            } else {
                println!("Completed: {}", name);
            }
        }
        Outcome::Blocked(missing) => {
            if json_mode {
                let output = serde_json::json!({
                    "course": code.as_str(),
                    "outcome": "blocked",
                    "missing": blocking_json(tracker.catalog(), missing),
                });
                println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
            } else {
                println!("Cannot complete {} yet.", name);
                println!("Missing prerequisites:");
                for req in missing {
                    println!("  - {}", course_line(tracker.catalog(), req));
                }
            }
        }
    }
    Ok(())
}

/// Unmark a completed course.
pub fn cmd_revert(
    db_path: &PathBuf,
    backend: &str,
    catalog_path: Option<&Path>,
    json_mode: bool,
    code: &str,
) -> Result<(), MallaError> {
    let catalog = catalog_file::load_catalog(catalog_path)?;
    let (mut tracker, mut store) = open_tracker(db_path, backend, catalog)?;

    let code = CourseCode::new(code);
    let outcome = tracker.request_reversion(&code)?;
    if !outcome.is_blocked() {
        save_progress(store.as_mut(), &tracker);
    }

    let name = course_line(tracker.catalog(), &code);
    match &outcome {
        Outcome::Success => {
            if json_mode {
                let output = serde_json::json!({
                    "course": code.as_str(),
                    "outcome": "success",
                });
                println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
            } else {
                println!("Reverted: {}", name);
            }
        }
        Outcome::Blocked(dependents) => {
            if json_mode {
                let output = serde_json::json!({
                    "course": code.as_str(),
                    "outcome": "blocked",
                    "dependents": blocking_json(tracker.catalog(), dependents),
                });
                println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
            } else {
                println!("Cannot revert {}.", name);
                println!("These completed courses depend on it:");
                for dep in dependents {
                    println!("  - {}", course_line(tracker.catalog(), dep));
                }
                println!("Revert the listed courses first.");
            }
        }
    }
    Ok(())
}

/// Clear all progress.
pub fn cmd_reset(
    db_path: &PathBuf,
    backend: &str,
    catalog_path: Option<&Path>,
    json_mode: bool,
) -> Result<(), MallaError> {
    let catalog = catalog_file::load_catalog(catalog_path)?;
    let (mut tracker, mut store) = open_tracker(db_path, backend, catalog)?;

    tracker.reset();
    if let Some(store) = store.as_mut() {
        if let Err(e) = store.clear() {
            tracing::warn!("stored progress not cleared: {}", e);
        }
    }

    if json_mode {
        let output = serde_json::json!({ "reset": true });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
    } else {
        println!("Progress cleared. Every course is back to not started.");
    }
    Ok(())
}

// =============================================================================
// QUERY COMMANDS
// =============================================================================

/// List missing prerequisites for a course.
pub fn cmd_missing(
    db_path: &PathBuf,
    backend: &str,
    catalog_path: Option<&Path>,
    json_mode: bool,
    code: &str,
) -> Result<(), MallaError> {
    let catalog = catalog_file::load_catalog(catalog_path)?;
    let (tracker, _) = open_tracker(db_path, backend, catalog)?;

    let code = CourseCode::new(code);
    let missing = tracker.missing_prerequisites(&code)?;

    if json_mode {
        let output = serde_json::json!({
            "course": code.as_str(),
            "missing": blocking_json(tracker.catalog(), &missing),
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return Ok(());
    }

    if missing.is_empty() {
        println!(
            "{} has no missing prerequisites.",
            course_line(tracker.catalog(), &code)
        );
    } else {
        println!(
            "Missing prerequisites for {}:",
            course_line(tracker.catalog(), &code)
        );
        for req in &missing {
            println!("  - {}", course_line(tracker.catalog(), req));
        }
    }
    Ok(())
}

/// List completed courses that depend on a course.
pub fn cmd_dependents(
    db_path: &PathBuf,
    backend: &str,
    catalog_path: Option<&Path>,
    json_mode: bool,
    code: &str,
) -> Result<(), MallaError> {
    let catalog = catalog_file::load_catalog(catalog_path)?;
    let (tracker, _) = open_tracker(db_path, backend, catalog)?;

    let code = CourseCode::new(code);
    let dependents: Vec<CourseCode> = tracker.completed_dependents(&code)?.into_iter().collect();

    if json_mode {
        let output = serde_json::json!({
            "course": code.as_str(),
            "dependents": blocking_json(tracker.catalog(), &dependents),
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return Ok(());
    }

    if dependents.is_empty() {
        println!(
            "No completed course depends on {}.",
            course_line(tracker.catalog(), &code)
        );
    } else {
        println!(
            "Completed courses depending on {}:",
            course_line(tracker.catalog(), &code)
        );
        for dep in &dependents {
            println!("  - {}", course_line(tracker.catalog(), dep));
        }
    }
    Ok(())
}

// =============================================================================
// CATALOG & DATABASE COMMANDS
// =============================================================================

/// Validate a catalog TOML file and report its shape.
pub fn cmd_check(file: &Path, json_mode: bool) -> Result<(), MallaError> {
    let catalog = catalog_file::load_catalog(Some(file))?;
    let semesters = catalog.by_semester().len();
    let requires_all = catalog
        .requires_all_course()
        .map(|c| c.code.as_str().to_string());

    if json_mode {
        let output = serde_json::json!({
            "file": file.to_string_lossy(),
            "valid": true,
            "courses": catalog.len(),
            "semesters": semesters,
            "requires_all": requires_all,
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return Ok(());
    }

    println!("Catalog OK: {:?}", file);
    println!("  Courses:   {}", catalog.len());
    println!("  Semesters: {}", semesters);
    match requires_all {
        Some(code) => println!("  Requires-all course: {}", code),
        None => println!("  Requires-all course: none"),
    }
    Ok(())
}

/// Initialize a new empty progress database.
pub fn cmd_init(db_path: &PathBuf, backend: &str, force: bool) -> Result<(), MallaError> {
    if db_path.exists() {
        if !force {
            return Err(MallaError::IoError(format!(
                "Database '{}' already exists (use --force to overwrite)",
                db_path.display()
            )));
        }
        std::fs::remove_file(db_path)
            .map_err(|e| MallaError::IoError(format!("Cannot remove existing database: {}", e)))?;
    }

    match backend {
        "redb" => {
            let _ = RedbStore::open(db_path)?;
        }
        "file" => {
            FileStore::new(db_path).save(&CompletionSet::new())?;
        }
        other => {
            return Err(MallaError::IoError(format!(
                "Unknown backend '{}' (expected \"redb\" or \"file\")",
                other
            )));
        }
    }

    println!("Initialized empty progress database at {:?}", db_path);
    Ok(())
}
