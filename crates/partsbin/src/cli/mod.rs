//! # CLI Behavior
//!
//! This is **one possible UI client** for partsbin, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Naked Execution (`partsbin`)
//!
//! Running `partsbin` with no arguments shows the first browse page with default filters.
//!
//! ## Browsing
//!
//! `partsbin browse` takes the storefront filters as flags. Price bounds are passed through
//! as typed: `--min-price abc` is ignored rather than rejected. Asking for a page past the
//! end prints an empty page with a warning instead of jumping to the last page.
//!
//! ## Favorites and Recents
//!
//! `partsbin view <id>` prints a listing and records it as recently viewed. Recents belong
//! to the browsing session (`session_id` in config) and are cleared by `partsbin session end`.
//! Favorites persist in the data directory.
//!
//! ## Admin
//!
//! `partsbin login admin admin123` unlocks the `admin` subcommands until `partsbin logout`.
//! `admin create` validates every field at once and lists each failure.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch and per-command handlers that call the API and print results
//! - `print`: Output formatting (rows, detail view, stats, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod print;
pub mod setup;

pub use commands::run;
