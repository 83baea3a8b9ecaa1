//! # Partsbin Architecture
//!
//! Partsbin is a **UI-agnostic parts catalog library**: browsing, favorites, recently viewed
//! listings and an admin area over a pluggable listing store. The `partsbin` binary is one
//! client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (partsbin crate)                                 │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the store, the tracker and the auth gate            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, returns CmdResult                        │
//! │  - Browsing is delegated to the pure query engine (query/)  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer                                              │
//! │  - store/: ListingStore (memory, file, http)                │
//! │  - state/: KeyValueStore with persistent/session lifetimes  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr (diagnostics go through `tracing`)
//! - **Never** calls `std::process::exit`
//!
//! ## Testing Strategy
//!
//! 1. **Query engine** (`query/`): property and scenario tests of the pure pipeline.
//! 2. **Commands** (`commands/*.rs`): the lion's share, against `InMemoryStore` and
//!    `MemoryKv`.
//! 3. **API** (`api.rs`): dispatch and wiring.
//! 4. **Stores** (`tests/`): file and HTTP backends against temp dirs and a local server.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`query`]: Filter, sort and page listings
//! - [`tracker`]: Favorites and recently viewed
//! - [`auth`]: Admin login gate
//! - [`store`]: Listing store abstraction and implementations
//! - [`state`]: Key-value storage for client-side state
//! - [`model`]: Core data types (`Listing`, `ListingDraft`, `Category`)
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context setup
//! - [`error`]: Error types

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod query;
pub mod state;
pub mod store;
pub mod tracker;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
