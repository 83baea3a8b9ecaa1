//! # Listing Query Engine
//!
//! [`query`] is the storefront's whole browse pipeline: it takes a snapshot of every listing
//! and a fresh [`QueryParams`] and produces the [`QueryPage`] to render.
//!
//! ```text
//!  listings ──┬──────────────────────────────► available categories (unfiltered)
//!             │
//!             └─► ListingFilter ─► SortMode ─► page slice ─► QueryPage
//! ```
//!
//! The category list is computed in its own pass over the unfiltered snapshot. Deriving it
//! from the filtered set instead would make a category vanish from the choices the moment it
//! is selected away.
//!
//! The function is pure: it never mutates the snapshot, performs no I/O, and returns the same
//! page for the same inputs. Stable sorting keeps ties in store order, which is what makes the
//! output repeatable.
//!
//! ## Paging
//!
//! `total_pages` is `ceil(filtered / page_size)` but never less than 1, so an empty result
//! still reports a single (empty) page. Out-of-range pages are **not** clamped: asking for
//! page 5 of 2 returns no items and the caller decides what to show. Page 0 is read as page 1,
//! and a page size of 0 is read as 1.
//!
//! Slicing happens entirely client-side. That is fine for a browsing catalog; a much larger
//! collection would need offset or cursor queries pushed down to the store.

pub mod filter;
pub mod sort;

pub use filter::{parse_bound, CategoryFilter, ListingFilter};
pub use sort::SortMode;

use crate::model::Listing;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Everything one browse request asks for.
///
/// Price bounds stay textual, exactly as typed; see [`parse_bound`] for how they are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryParams {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortMode,
    pub min_price: String,
    pub max_price: String,
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            sort: SortMode::Newest,
            min_price: String::new(),
            max_price: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryParams {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage {
    pub items: Vec<Listing>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub available_categories: Vec<String>,
}

impl QueryPage {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Distinct categories in first-occurrence order.
pub fn available_categories(listings: &[Listing]) -> Vec<String> {
    let mut seen = HashSet::new();
    listings
        .iter()
        .filter(|l| seen.insert(l.category.as_str()))
        .map(|l| l.category.clone())
        .collect()
}

/// Filters and sorts without paging. Order is the final display order.
pub fn filter_and_sort<'a>(listings: &'a [Listing], params: &QueryParams) -> Vec<&'a Listing> {
    let filter = ListingFilter::from_params(params);
    let mut matched: Vec<&Listing> = listings.iter().filter(|l| filter.matches(l)).collect();
    params.sort.sort(&mut matched);
    matched
}

pub fn query(listings: &[Listing], params: &QueryParams) -> QueryPage {
    let available_categories = available_categories(listings);
    let matched = filter_and_sort(listings, params);

    let page = params.page();
    let page_size = params.page_size();
    let filtered_count = matched.len();
    let total_pages = filtered_count.div_ceil(page_size).max(1);

    let start = (page - 1).saturating_mul(page_size);
    let items: Vec<Listing> = matched
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    tracing::debug!(
        total = listings.len(),
        filtered = filtered_count,
        page,
        total_pages,
        returned = items.len(),
        "query evaluated"
    );

    QueryPage {
        items,
        page,
        page_size,
        total_pages,
        filtered_count,
        available_categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::listing;

    fn ids(page: &QueryPage) -> Vec<&str> {
        page.items.iter().map(|l| l.id.as_str()).collect()
    }

    fn two_listings() -> Vec<Listing> {
        vec![
            listing("1", 10.0, "Engine", 1),
            listing("2", 30.0, "Brakes", 2),
        ]
    }

    #[test]
    fn default_params_list_newest_first() {
        let page = query(&two_listings(), &QueryParams::default());
        assert_eq!(ids(&page), vec!["2", "1"]);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.filtered_count, 2);
    }

    #[test]
    fn category_filter_keeps_unfiltered_category_list() {
        let params = QueryParams {
            category: CategoryFilter::only("Brakes"),
            ..Default::default()
        };
        let page = query(&two_listings(), &params);
        assert_eq!(ids(&page), vec!["2"]);
        assert_eq!(page.available_categories, vec!["Engine", "Brakes"]);
    }

    #[test]
    fn min_price_narrows_and_empty_result_still_has_one_page() {
        let params = QueryParams {
            min_price: "20".into(),
            ..Default::default()
        };
        assert_eq!(ids(&query(&two_listings(), &params)), vec!["2"]);

        let params = QueryParams {
            min_price: "100".into(),
            ..Default::default()
        };
        let page = query(&two_listings(), &params);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.filtered_count, 0);
    }

    #[test]
    fn second_page_of_size_one() {
        let params = QueryParams {
            page: 2,
            page_size: 1,
            ..Default::default()
        };
        let page = query(&two_listings(), &params);
        assert_eq!(ids(&page), vec!["1"]);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn out_of_range_page_is_empty_not_clamped() {
        let params = QueryParams {
            page: 5,
            page_size: 1,
            ..Default::default()
        };
        let page = query(&two_listings(), &params);
        assert!(page.is_empty());
        assert_eq!(page.page, 5);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn zero_page_and_page_size_are_normalized() {
        let params = QueryParams {
            page: 0,
            page_size: 0,
            ..Default::default()
        };
        let page = query(&two_listings(), &params);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(ids(&page), vec!["2"]);
    }

    #[test]
    fn total_pages_rounds_up() {
        let listings: Vec<Listing> = (0..25)
            .map(|i| listing(&i.to_string(), i as f64, "Body", i))
            .collect();
        let page = query(&listings, &QueryParams::default());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 12);

        let last = query(
            &listings,
            &QueryParams {
                page: 3,
                ..Default::default()
            },
        );
        assert_eq!(last.items.len(), 1);
    }

    #[test]
    fn query_is_deterministic_and_leaves_input_untouched() {
        let listings = vec![
            listing("a", 5.0, "Wheels", 1),
            listing("b", 5.0, "Wheels", 1),
            listing("c", 7.0, "Body", 3),
        ];
        let snapshot = listings.clone();
        let params = QueryParams {
            sort: SortMode::PriceLow,
            ..Default::default()
        };
        let first = query(&listings, &params);
        let second = query(&listings, &params);
        assert_eq!(first, second);
        assert_eq!(listings, snapshot);
        assert_eq!(ids(&first), vec!["a", "b", "c"]);
    }

    #[test]
    fn filtered_set_is_a_subset() {
        let listings: Vec<Listing> = (0..10)
            .map(|i| listing(&i.to_string(), (i * 10) as f64, "Engine", i))
            .collect();
        let params = QueryParams {
            max_price: "45".into(),
            ..Default::default()
        };
        let page = query(&listings, &params);
        assert_eq!(page.filtered_count, 5);
        assert!(page.items.iter().all(|item| listings.contains(item)));
    }

    #[test]
    fn price_low_and_high_are_reversed_for_distinct_prices() {
        let listings = vec![
            listing("a", 40.0, "Engine", 1),
            listing("b", 10.0, "Engine", 2),
            listing("c", 25.0, "Engine", 3),
        ];
        let low = query(
            &listings,
            &QueryParams {
                sort: SortMode::PriceLow,
                ..Default::default()
            },
        );
        let high = query(
            &listings,
            &QueryParams {
                sort: SortMode::PriceHigh,
                ..Default::default()
            },
        );
        let mut reversed = ids(&high);
        reversed.reverse();
        assert_eq!(ids(&low), reversed);
    }

    #[test]
    fn available_categories_first_occurrence_order() {
        let listings = vec![
            listing("1", 1.0, "Wheels", 1),
            listing("2", 1.0, "Body", 2),
            listing("3", 1.0, "Wheels", 3),
            listing("4", 1.0, "Engine", 4),
        ];
        assert_eq!(
            available_categories(&listings),
            vec!["Wheels", "Body", "Engine"]
        );
    }

    #[test]
    fn params_deserialize_from_partial_json() {
        let params: QueryParams =
            serde_json::from_str(r#"{"search":"brake","sort":"price-high","minPrice":"5"}"#)
                .unwrap();
        assert_eq!(params.search, "brake");
        assert_eq!(params.sort, SortMode::PriceHigh);
        assert_eq!(params.category, CategoryFilter::All);
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, DEFAULT_PAGE_SIZE);
    }
}
