//! # Listing Stores
//!
//! The [`ListingStore`] trait is the only way the rest of the crate reaches the listing
//! collection. The storefront reads through `fetch_all`; the admin area uses the
//! single-record operations.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: no persistence, for tests and demos.
//! - [`fs::FileStore`]: one JSON document (`listings.json`) rewritten atomically on change.
//! - [`http::HttpStore`]: a REST collection served at `{base}/items`.
//!
//! ## Contract
//!
//! - The store assigns `id` and `created_at`. Neither ever changes afterwards; `update`
//!   replaces the editable fields only.
//! - Drafts are validated on `create` and `update` before anything is written.
//! - Failures are returned as-is. Nothing here retries.

use crate::error::Result;
use crate::model::{Listing, ListingDraft};

pub mod fs;
pub mod http;
pub mod memory;

pub trait ListingStore {
    /// Every listing, in store order
    fn fetch_all(&self) -> Result<Vec<Listing>>;

    fn fetch_by_id(&self, id: &str) -> Result<Listing>;

    /// Validate and persist a draft, returning the stored listing
    fn create(&mut self, draft: ListingDraft) -> Result<Listing>;

    /// Validate and replace the editable fields of an existing listing
    fn update(&mut self, id: &str, draft: ListingDraft) -> Result<Listing>;

    fn delete(&mut self, id: &str) -> Result<()>;
}

/// The store selected by the `backend` config key.
pub enum BackendStore {
    File(fs::FileStore),
    Http(http::HttpStore),
}

impl ListingStore for BackendStore {
    fn fetch_all(&self) -> Result<Vec<Listing>> {
        match self {
            BackendStore::File(s) => s.fetch_all(),
            BackendStore::Http(s) => s.fetch_all(),
        }
    }

    fn fetch_by_id(&self, id: &str) -> Result<Listing> {
        match self {
            BackendStore::File(s) => s.fetch_by_id(id),
            BackendStore::Http(s) => s.fetch_by_id(id),
        }
    }

    fn create(&mut self, draft: ListingDraft) -> Result<Listing> {
        match self {
            BackendStore::File(s) => s.create(draft),
            BackendStore::Http(s) => s.create(draft),
        }
    }

    fn update(&mut self, id: &str, draft: ListingDraft) -> Result<Listing> {
        match self {
            BackendStore::File(s) => s.update(id, draft),
            BackendStore::Http(s) => s.update(id, draft),
        }
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        match self {
            BackendStore::File(s) => s.delete(id),
            BackendStore::Http(s) => s.delete(id),
        }
    }
}

/// Next id for stores that hand out sequential numeric ids.
/// Non-numeric ids are ignored when looking for the current maximum.
pub(crate) fn next_id(listings: &[Listing]) -> String {
    let max = listings
        .iter()
        .filter_map(|l| l.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::listing;

    #[test]
    fn next_id_follows_numeric_maximum() {
        assert_eq!(next_id(&[]), "1");
        let listings = vec![
            listing("3", 1.0, "Body", 1),
            listing("abc", 1.0, "Body", 2),
            listing("10", 1.0, "Body", 3),
        ];
        assert_eq!(next_id(&listings), "11");
    }
}
