use super::{next_id, ListingStore};
use crate::error::{CatalogError, Result};
use crate::model::{Listing, ListingDraft};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const LISTINGS_FILE: &str = "listings.json";

/// File-backed listing store.
///
/// The whole collection lives in `listings.json` as a JSON array in store order. Every
/// mutation reads the file, applies the change and writes it back through a temp file and a
/// rename, so a crash mid-write leaves the previous version in place.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(LISTINGS_FILE)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(CatalogError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Vec<Listing>> {
        let data_file = self.path();
        if !data_file.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&data_file).map_err(CatalogError::Io)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let listings: Vec<Listing> = serde_json::from_str(&content).map_err(|e| {
            CatalogError::Store(format!("{} is not a valid listing file: {}", data_file.display(), e))
        })?;
        Ok(listings)
    }

    fn save(&self, listings: &[Listing]) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let content = serde_json::to_string_pretty(listings).map_err(CatalogError::Serialization)?;

        let tmp_file = self.root.join(format!(".listings-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(CatalogError::Io)?;
        fs::rename(&tmp_file, self.path()).map_err(CatalogError::Io)?;
        tracing::debug!(count = listings.len(), path = %self.path().display(), "listings saved");
        Ok(())
    }
}

impl ListingStore for FileStore {
    fn fetch_all(&self) -> Result<Vec<Listing>> {
        self.load()
    }

    fn fetch_by_id(&self, id: &str) -> Result<Listing> {
        self.load()?
            .into_iter()
            .find(|l| l.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    fn create(&mut self, draft: ListingDraft) -> Result<Listing> {
        draft.validate().map_err(CatalogError::ValidationFailed)?;
        let mut listings = self.load()?;
        let listing = Listing::from_draft(next_id(&listings), draft, Utc::now());
        listings.push(listing.clone());
        self.save(&listings)?;
        Ok(listing)
    }

    fn update(&mut self, id: &str, draft: ListingDraft) -> Result<Listing> {
        let mut listings = self.load()?;
        let slot = listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        draft.validate().map_err(CatalogError::ValidationFailed)?;

        let updated = Listing::from_draft(slot.id.clone(), draft, slot.created_at);
        *slot = updated.clone();
        self.save(&listings)?;
        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let mut listings = self.load()?;
        let before = listings.len();
        listings.retain(|l| l.id != id);
        if listings.len() == before {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        self.save(&listings)
    }
}
