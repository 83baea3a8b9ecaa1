use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CatalogError, Result};
use crate::state::KeyValueStore;
use crate::store::ListingStore;
use crate::tracker::Tracker;

/// Adds or removes a favorite.
///
/// Adding needs the listing to exist. Removing does not, so a favorite whose listing
/// has since been deleted can still be dropped.
pub fn toggle<S: ListingStore, K: KeyValueStore>(
    store: &S,
    tracker: &mut Tracker<K>,
    id: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if tracker.is_favorite(id) {
        let listing = match store.fetch_by_id(id) {
            Ok(listing) => Some(listing),
            Err(CatalogError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };
        tracker.remove_favorite(id)?;
        let name = listing.as_ref().map_or(id, |l| l.title.as_str());
        result.add_message(CmdMessage::success(format!(
            "Removed {} from favorites",
            name
        )));
        result.affected_listings = listing.into_iter().collect();
    } else {
        let listing = store.fetch_by_id(id)?;
        tracker.add_favorite(&listing.id)?;
        result.add_message(CmdMessage::success(format!(
            "Added {} to favorites",
            listing.title
        )));
        result.affected_listings = vec![listing];
    }

    Ok(result.with_favorites(tracker.favorites()))
}

pub fn list<S: ListingStore, K: KeyValueStore>(
    store: &S,
    tracker: &Tracker<K>,
) -> Result<CmdResult> {
    let listings = store.fetch_all()?;
    let favorites: Vec<_> = tracker
        .favorite_listings(&listings)
        .into_iter()
        .cloned()
        .collect();

    let mut result = CmdResult::default().with_favorites(tracker.favorites());
    if favorites.is_empty() {
        result.add_message(CmdMessage::info("No favorites yet"));
    }
    Ok(result.with_listed_listings(favorites))
}

pub fn recent<S: ListingStore, K: KeyValueStore>(
    store: &S,
    tracker: &Tracker<K>,
) -> Result<CmdResult> {
    let listings = store.fetch_all()?;
    let recent: Vec<_> = tracker
        .recent_listings(&listings)
        .into_iter()
        .cloned()
        .collect();

    let mut result = CmdResult::default().with_favorites(tracker.favorites());
    if recent.is_empty() {
        result.add_message(CmdMessage::info("Nothing viewed yet this session"));
    }
    Ok(result.with_listed_listings(recent))
}

pub fn end_session<K: KeyValueStore>(tracker: &mut Tracker<K>) -> Result<CmdResult> {
    tracker.end_session()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(
        "Session ended, recently viewed cleared",
    ));
    Ok(result)
}
