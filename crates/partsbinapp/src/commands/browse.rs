use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::query::{self, QueryParams};
use crate::state::KeyValueStore;
use crate::store::ListingStore;
use crate::tracker::Tracker;

pub fn run<S: ListingStore, K: KeyValueStore>(
    store: &S,
    tracker: &Tracker<K>,
    params: &QueryParams,
) -> Result<CmdResult> {
    let listings = store.fetch_all()?;
    let page = query::query(&listings, params);

    let mut result = CmdResult::default().with_favorites(tracker.favorites());
    if page.filtered_count == 0 {
        result.add_message(CmdMessage::info("No listings match your filters"));
    } else if page.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "Page {} is past the last page ({})",
            page.page, page.total_pages
        )));
    }
    result.page = Some(page);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::query::{CategoryFilter, SortMode};
    use crate::test_utils::{listing, CatalogFixture};
    use crate::tracker::DEFAULT_RECENT_LIMIT;

    fn fixture() -> CatalogFixture {
        CatalogFixture::new().with_listings(vec![
            listing("1", 10.0, "Engine", 1),
            listing("2", 30.0, "Brakes", 2),
            listing("3", 20.0, "Engine", 3),
        ])
    }

    #[test]
    fn default_browse_is_newest_first() {
        let f = fixture();
        let tracker = Tracker::load(f.kv.clone(), DEFAULT_RECENT_LIMIT).unwrap();
        let result = run(&f.store, &tracker, &QueryParams::default()).unwrap();

        let page = result.page.unwrap();
        let ids: Vec<_> = page.items.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["3", "2", "1"]);
        assert_eq!(page.available_categories, ["Engine", "Brakes"]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn browse_applies_category_and_sort() {
        let f = fixture();
        let tracker = Tracker::load(f.kv.clone(), DEFAULT_RECENT_LIMIT).unwrap();
        let params = QueryParams {
            category: CategoryFilter::only("Engine"),
            sort: SortMode::PriceHigh,
            ..Default::default()
        };
        let page = run(&f.store, &tracker, &params).unwrap().page.unwrap();
        let ids: Vec<_> = page.items.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["3", "1"]);
    }

    #[test]
    fn empty_result_reports_info() {
        let f = fixture();
        let tracker = Tracker::load(f.kv.clone(), DEFAULT_RECENT_LIMIT).unwrap();
        let params = QueryParams {
            min_price: "1000".into(),
            ..Default::default()
        };
        let result = run(&f.store, &tracker, &params).unwrap();
        assert_eq!(result.page.as_ref().unwrap().total_pages, 1);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn page_past_the_end_warns_without_clamping() {
        let f = fixture();
        let tracker = Tracker::load(f.kv.clone(), DEFAULT_RECENT_LIMIT).unwrap();
        let params = QueryParams {
            page: 4,
            page_size: 2,
            ..Default::default()
        };
        let result = run(&f.store, &tracker, &params).unwrap();
        let page = result.page.as_ref().unwrap();
        assert!(page.is_empty());
        assert_eq!(page.page, 4);
        assert_eq!(page.total_pages, 2);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn browse_marks_favorites() {
        let f = fixture();
        let mut tracker = Tracker::load(f.kv.clone(), DEFAULT_RECENT_LIMIT).unwrap();
        tracker.add_favorite("2").unwrap();
        let result = run(&f.store, &tracker, &QueryParams::default()).unwrap();
        assert!(result.is_favorite("2"));
        assert!(!result.is_favorite("1"));
    }

    #[test]
    fn offline_store_propagates_fetch_failed() {
        let mut f = fixture();
        f.store.set_unreachable(true);
        let tracker = Tracker::load(f.kv.clone(), DEFAULT_RECENT_LIMIT).unwrap();
        let err = run(&f.store, &tracker, &QueryParams::default()).unwrap_err();
        assert!(err.is_retryable());
    }
}
