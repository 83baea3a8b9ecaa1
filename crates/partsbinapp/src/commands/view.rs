use crate::commands::CmdResult;
use crate::error::Result;
use crate::state::KeyValueStore;
use crate::store::ListingStore;
use crate::tracker::Tracker;

/// Fetches one listing and records it as recently viewed. A failed fetch records nothing.
pub fn run<S: ListingStore, K: KeyValueStore>(
    store: &S,
    tracker: &mut Tracker<K>,
    id: &str,
) -> Result<CmdResult> {
    let listing = store.fetch_by_id(id)?;
    tracker.record_view(&listing.id)?;
    Ok(CmdResult::default()
        .with_favorites(tracker.favorites())
        .with_listed_listings(vec![listing]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::test_utils::{listing, CatalogFixture};
    use crate::tracker::DEFAULT_RECENT_LIMIT;

    #[test]
    fn view_returns_listing_and_records_it() {
        let f = CatalogFixture::new().with_listings(vec![
            listing("1", 10.0, "Engine", 1),
            listing("2", 20.0, "Brakes", 2),
        ]);
        let mut tracker = Tracker::load(f.kv.clone(), DEFAULT_RECENT_LIMIT).unwrap();

        let result = run(&f.store, &mut tracker, "2").unwrap();
        assert_eq!(result.listed_listings[0].id, "2");
        run(&f.store, &mut tracker, "1").unwrap();
        assert_eq!(tracker.recently_viewed(), ["1", "2"]);
    }

    #[test]
    fn missing_listing_is_not_recorded() {
        let f = CatalogFixture::new();
        let mut tracker = Tracker::load(f.kv.clone(), DEFAULT_RECENT_LIMIT).unwrap();
        let err = run(&f.store, &mut tracker, "42").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        assert!(tracker.recently_viewed().is_empty());
    }
}
