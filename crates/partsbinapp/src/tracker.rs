//! # Favorites and Recently Viewed
//!
//! [`Tracker`] owns two ordered id sequences:
//!
//! - **Favorites**: insertion order, no duplicates, kept in the persistent lifetime under
//!   `favorites`.
//! - **Recently viewed**: most recent first, no duplicates, at most `recent_limit` entries
//!   (10 by default), kept in the session lifetime under `recentlyViewed`.
//!
//! Both are stored as JSON arrays of ids. Every mutation writes through to the
//! [`KeyValueStore`] before returning.
//!
//! ## Recovering from bad state
//!
//! State that is missing, or that does not decode as an array of strings, starts out empty.
//! Undecodable state is logged at warn level and never surfaced to callers; the next
//! mutation overwrites it.
//!
//! ## Change notification
//!
//! [`Tracker::revision`] increases by one on every mutation that changes state, so views can
//! poll for staleness. [`Tracker::subscribe`] registers callbacks run after each such
//! mutation.

use crate::error::{CatalogError, Result};
use crate::model::Listing;
use crate::state::{KeyValueStore, Lifetime};

pub const FAVORITES_KEY: &str = "favorites";
pub const RECENTLY_VIEWED_KEY: &str = "recentlyViewed";
pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerChange {
    Favorites,
    RecentlyViewed,
}

type Subscriber = Box<dyn FnMut(TrackerChange, u64)>;

pub struct Tracker<K: KeyValueStore> {
    kv: K,
    favorites: Vec<String>,
    recently_viewed: Vec<String>,
    recent_limit: usize,
    revision: u64,
    subscribers: Vec<Subscriber>,
}

impl<K: KeyValueStore> Tracker<K> {
    /// Loads both sequences from `kv`. Only storage failures are errors; bad contents are not.
    pub fn load(kv: K, recent_limit: usize) -> Result<Self> {
        let recent_limit = recent_limit.max(1);
        let favorites = dedup(read_ids(&kv, FAVORITES_KEY, Lifetime::Persistent)?);
        let mut recently_viewed = dedup(read_ids(&kv, RECENTLY_VIEWED_KEY, Lifetime::Session)?);
        recently_viewed.truncate(recent_limit);

        tracing::debug!(
            favorites = favorites.len(),
            recently_viewed = recently_viewed.len(),
            "tracker loaded"
        );

        Ok(Self {
            kv,
            favorites,
            recently_viewed,
            recent_limit,
            revision: 0,
            subscribers: Vec::new(),
        })
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, callback: impl FnMut(TrackerChange, u64) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn recently_viewed(&self) -> &[String] {
        &self.recently_viewed
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f == id)
    }

    /// Flips membership and returns the new status (`true` = now a favorite).
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        if self.is_favorite(id) {
            self.remove_favorite(id)?;
            Ok(false)
        } else {
            self.add_favorite(id)?;
            Ok(true)
        }
    }

    pub fn add_favorite(&mut self, id: &str) -> Result<()> {
        if self.is_favorite(id) {
            return Ok(());
        }
        let mut next = self.favorites.clone();
        next.push(id.to_string());
        self.commit_favorites(next)
    }

    pub fn remove_favorite(&mut self, id: &str) -> Result<()> {
        if !self.is_favorite(id) {
            return Ok(());
        }
        let next = self.favorites.iter().filter(|f| *f != id).cloned().collect();
        self.commit_favorites(next)
    }

    /// Moves `id` to the front of the recently viewed list, dropping the oldest entries
    /// past the limit.
    pub fn record_view(&mut self, id: &str) -> Result<()> {
        if self.recently_viewed.first().map(String::as_str) == Some(id) {
            return Ok(());
        }
        let mut next = Vec::with_capacity(self.recent_limit);
        next.push(id.to_string());
        next.extend(self.recently_viewed.iter().filter(|r| *r != id).cloned());
        next.truncate(self.recent_limit);
        self.commit_recent(next)
    }

    /// Forgets the session lifetime, which holds the recently viewed list.
    pub fn end_session(&mut self) -> Result<()> {
        self.kv.clear(Lifetime::Session)?;
        let was_empty = self.recently_viewed.is_empty();
        self.recently_viewed.clear();
        tracing::info!("session ended");
        if !was_empty {
            self.notify(TrackerChange::RecentlyViewed);
        }
        Ok(())
    }

    /// Favorite listings in favorites order. Ids no longer in `listings` are skipped.
    pub fn favorite_listings<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        resolve(&self.favorites, listings)
    }

    /// Recently viewed listings, most recent first. Ids no longer in `listings` are skipped.
    pub fn recent_listings<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        resolve(&self.recently_viewed, listings)
    }

    fn commit_favorites(&mut self, next: Vec<String>) -> Result<()> {
        write_ids(&mut self.kv, FAVORITES_KEY, Lifetime::Persistent, &next)?;
        self.favorites = next;
        self.notify(TrackerChange::Favorites);
        Ok(())
    }

    fn commit_recent(&mut self, next: Vec<String>) -> Result<()> {
        write_ids(&mut self.kv, RECENTLY_VIEWED_KEY, Lifetime::Session, &next)?;
        self.recently_viewed = next;
        self.notify(TrackerChange::RecentlyViewed);
        Ok(())
    }

    fn notify(&mut self, change: TrackerChange) {
        self.revision += 1;
        let revision = self.revision;
        for subscriber in self.subscribers.iter_mut() {
            subscriber(change, revision);
        }
    }
}

fn read_ids<K: KeyValueStore>(kv: &K, key: &str, lifetime: Lifetime) -> Result<Vec<String>> {
    let Some(raw) = kv.get(key, lifetime)? else {
        return Ok(Vec::new());
    };
    match decode_ids(key, &raw) {
        Ok(ids) => Ok(ids),
        Err(e) => {
            tracing::warn!(%lifetime, "{}; starting empty", e);
            Ok(Vec::new())
        }
    }
}

fn decode_ids(key: &str, raw: &str) -> Result<Vec<String>> {
    serde_json::from_str::<Vec<String>>(raw).map_err(|e| CatalogError::MalformedPersistedState {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn write_ids<K: KeyValueStore>(
    kv: &mut K,
    key: &str,
    lifetime: Lifetime,
    ids: &[String],
) -> Result<()> {
    let raw = serde_json::to_string(ids).map_err(CatalogError::Serialization)?;
    kv.set(key, &raw, lifetime)
}

fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

fn resolve<'a>(ids: &[String], listings: &'a [Listing]) -> Vec<&'a Listing> {
    ids.iter()
        .filter_map(|id| listings.iter().find(|l| &l.id == id))
        .collect()
}
