use super::{next_id, ListingStore};
use crate::error::{CatalogError, Result};
use crate::model::{Listing, ListingDraft};
use chrono::Utc;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    listings: Vec<Listing>,
    unreachable: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed listing as-is, bypassing validation.
    pub fn insert(&mut self, listing: Listing) {
        self.listings.push(listing);
    }

    /// Make every operation fail with `FetchFailed`, as if the store were offline.
    pub fn set_unreachable(&mut self, unreachable: bool) {
        self.unreachable = unreachable;
    }

    fn check_reachable(&self) -> Result<()> {
        if self.unreachable {
            return Err(CatalogError::FetchFailed("store is offline".to_string()));
        }
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.listings
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}

impl ListingStore for InMemoryStore {
    fn fetch_all(&self) -> Result<Vec<Listing>> {
        self.check_reachable()?;
        Ok(self.listings.clone())
    }

    fn fetch_by_id(&self, id: &str) -> Result<Listing> {
        self.check_reachable()?;
        let pos = self.position(id)?;
        Ok(self.listings[pos].clone())
    }

    fn create(&mut self, draft: ListingDraft) -> Result<Listing> {
        self.check_reachable()?;
        draft.validate().map_err(CatalogError::ValidationFailed)?;
        let listing = Listing::from_draft(next_id(&self.listings), draft, Utc::now());
        self.listings.push(listing.clone());
        Ok(listing)
    }

    fn update(&mut self, id: &str, draft: ListingDraft) -> Result<Listing> {
        self.check_reachable()?;
        let pos = self.position(id)?;
        draft.validate().map_err(CatalogError::ValidationFailed)?;
        let existing = &self.listings[pos];
        let updated = Listing::from_draft(existing.id.clone(), draft, existing.created_at);
        self.listings[pos] = updated.clone();
        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.check_reachable()?;
        let pos = self.position(id)?;
        self.listings.remove(pos);
        Ok(())
    }
}
