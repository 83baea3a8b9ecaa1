//! # Partsbin CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/partsbinapp/`: core library with UI-agnostic catalog logic
//! - `crates/partsbin/`: this CLI tool, depends on the `partsbinapp` library
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/partsbin/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Dispatch + context wiring (commands.rs)                  │
//! │  - Colored terminal output (print.rs)                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/partsbinapp/src/api.rs)                  │
//! │  - Dispatches to command modules                            │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logging goes to stderr through `tracing-subscriber`; `--verbose` turns on debug output.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
