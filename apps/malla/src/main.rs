//! # Malla - Curriculum Progress Tracker
//!
//! The main binary for the Malla curriculum-consistency engine.
//!
//! This application provides:
//! - CLI interface for progress transitions and queries
//! - Catalog loading from TOML definitions
//! - redb- or file-backed progress persistence
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                apps/malla (THE BINARY)                │
//! │                                                       │
//! │  ┌───────────┐   ┌───────────────┐   ┌────────────┐  │
//! │  │   CLI     │   │ Catalog files │   │ FileStore  │  │
//! │  │  (clap)   │   │    (toml)     │   │ (snapshot) │  │
//! │  └─────┬─────┘   └───────┬───────┘   └─────┬──────┘  │
//! │        │                 │                 │         │
//! │        └─────────────────┼─────────────────┘         │
//! │                          ▼                           │
//! │                  ┌───────────────┐                   │
//! │                  │  malla-core   │                   │
//! │                  │  (THE LOGIC)  │                   │
//! │                  └───────────────┘                   │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Show the curriculum grid
//! malla status
//!
//! # Transitions
//! malla complete TTS101
//! malla revert TTS101
//!
//! # Queries
//! malla missing LAB001
//! malla dependents TTS101
//! ```

use clap::Parser;
use malla::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — MALLA_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("MALLA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "malla=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Malla startup banner.
fn print_banner() {
    println!(
        r#"
  ███╗   ███╗ █████╗ ██╗     ██╗      █████╗
  ████╗ ████║██╔══██╗██║     ██║     ██╔══██╗
  ██╔████╔██║███████║██║     ██║     ███████║
  ██║╚██╔╝██║██╔══██║██║     ██║     ██╔══██║
  ██║ ╚═╝ ██║██║  ██║███████╗███████╗██║  ██║
  ╚═╝     ╚═╝╚═╝  ╚═╝╚══════╝╚══════╝╚═╝  ╚═╝

  Curriculum Progress Tracker v{}

  Consistent • Deterministic • Prerequisite-aware
"#,
        env!("CARGO_PKG_VERSION")
    );
}
