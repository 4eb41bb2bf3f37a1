//! # Malla CLI Module
//!
//! This module implements the CLI interface for Malla.
//!
//! ## Available Commands
//!
//! - `status` - Show the curriculum grid with per-course states
//! - `complete` - Mark a course complete (forward check applies)
//! - `revert` - Unmark a completed course (backward check applies)
//! - `missing` - List missing prerequisites for a course
//! - `dependents` - List completed courses depending on a course
//! - `reset` - Clear all progress
//! - `check` - Validate a catalog TOML file
//! - `init` - Initialize a new progress database

mod commands;

use clap::{Parser, Subcommand};
use malla_core::MallaError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Malla - Curriculum Progress Tracker
///
/// Tracks completion of a fixed curriculum, enforcing prerequisites in both
/// directions: a course cannot be completed before its prerequisites, and a
/// completed course cannot be reverted while completed courses depend on it.
#[derive(Parser, Debug)]
#[command(name = "malla")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the progress database
    #[arg(short = 'D', long, global = true, default_value = "malla.db")]
    pub database: PathBuf,

    /// Storage backend: "redb" (ACID database) or "file" (single snapshot file)
    #[arg(short = 'B', long, global = true, default_value = "redb")]
    pub backend: String,

    /// Path to a catalog TOML file (built-in curriculum if omitted)
    #[arg(short = 'C', long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the curriculum grid with per-course states
    Status,

    /// Mark a course complete
    Complete {
        /// Course code
        code: String,
    },

    /// Unmark a completed course
    Revert {
        /// Course code
        code: String,
    },

    /// List missing prerequisites for a course
    Missing {
        /// Course code
        code: String,
    },

    /// List completed courses that depend on a course
    Dependents {
        /// Course code
        code: String,
    },

    /// Clear all progress
    Reset,

    /// Validate a catalog TOML file
    Check {
        /// Catalog file path
        file: PathBuf,
    },

    /// Initialize a new empty progress database
    Init {
        /// Force initialization even if the database exists
        #[arg(short, long)]
        force: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), MallaError> {
    let backend = cli.backend.as_str();
    let json_mode = cli.json_mode;
    let catalog = cli.catalog.as_deref();

    match cli.command {
        Some(Commands::Complete { code }) => {
            cmd_complete(&cli.database, backend, catalog, json_mode, &code)
        }
        Some(Commands::Revert { code }) => {
            cmd_revert(&cli.database, backend, catalog, json_mode, &code)
        }
        Some(Commands::Missing { code }) => {
            cmd_missing(&cli.database, backend, catalog, json_mode, &code)
        }
        Some(Commands::Dependents { code }) => {
            cmd_dependents(&cli.database, backend, catalog, json_mode, &code)
        }
        Some(Commands::Reset) => cmd_reset(&cli.database, backend, catalog, json_mode),
        Some(Commands::Check { file }) => cmd_check(&file, json_mode),
        Some(Commands::Init { force }) => cmd_init(&cli.database, backend, force),
        Some(Commands::Status) | None => {
            // No subcommand - show status by default
            cmd_status(&cli.database, backend, catalog, json_mode)
        }
    }
}
