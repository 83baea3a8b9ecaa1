//! # Command Layer
//!
//! This module contains the **core business logic** of partsbin. Each command lives in its
//! own submodule as plain functions over the store, the tracker and the auth gate.
//!
//! ## Role and Responsibilities
//!
//! - Implement the actual logic for each operation
//! - Operate on `Listing`, `ListingDraft` and `QueryParams`
//! - Return structured `CmdResult` with listings, pages, stats and messages
//! - Stay UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout, stderr or formatting
//! - **Argument parsing**: that's the CLI layer's job
//! - **Exit codes**: return `Result`, let the caller decide
//! - **Retries**: store failures are returned as they happen
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `affected_listings`: listings created, updated, deleted or (un)favorited
//! - `listed_listings`: listings to display (favorites, recents, admin table, detail)
//! - `page`: a browse result with its pagination and category choices
//! - `stats`: dashboard numbers
//! - `favorites`: the favorite ids at the time of the call, for marking listings
//! - `messages`: structured messages with levels (info, success, warning); failures are `Err` values
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests run against
//! `InMemoryStore` and `MemoryKv`.
//!
//! ## Command Modules
//!
//! - [`browse`]: Filtered, sorted, paged storefront listing
//! - [`view`]: Listing detail, recorded as recently viewed
//! - [`favorites`]: Toggle and list favorites, list recents, end the session
//! - [`session`]: Admin login and logout
//! - [`admin`]: Admin search, create, update and delete
//! - [`dashboard`]: Catalog statistics

use crate::model::Listing;
use crate::query::QueryPage;
use serde::Serialize;

pub mod admin;
pub mod browse;
pub mod dashboard;
pub mod favorites;
pub mod session;
pub mod view;

pub use dashboard::CatalogStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_listings: Vec<Listing>,
    pub listed_listings: Vec<Listing>,
    pub page: Option<QueryPage>,
    pub stats: Option<CatalogStats>,
    pub favorites: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_listings(mut self, listings: Vec<Listing>) -> Self {
        self.affected_listings = listings;
        self
    }

    pub fn with_listed_listings(mut self, listings: Vec<Listing>) -> Self {
        self.listed_listings = listings;
        self
    }

    pub fn with_favorites(mut self, favorites: &[String]) -> Self {
        self.favorites = favorites.to_vec();
        self
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f == id)
    }
}
