//! Listing filtering.
//!
//! [`ListingFilter`] turns the filter half of [`QueryParams`] into a single predicate.
//! Each rule is independent and they combine with AND; an inactive rule (empty search,
//! `all` category, unset bound) always passes.

use super::QueryParams;
use crate::model::Listing;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Category selection: the `all` sentinel or one exact category name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn only(category: impl Into<String>) -> Self {
        CategoryFilter::Only(category.into())
    }

    /// Exact, case-sensitive comparison.
    pub fn accepts(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "all" {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(s.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(c) => f.write_str(c),
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse::<CategoryFilter>().unwrap_or_default())
    }
}

/// Parses a textual price bound.
///
/// Empty input is unbounded. Input that is not a number is also treated as unbounded
/// rather than rejected, so a stray character in a price box never empties the results.
/// Parsing is whole-string: `"12abc"` is unbounded, not a bound of 12.
pub fn parse_bound(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// The compiled predicate for one query.
#[derive(Debug, Clone)]
pub struct ListingFilter<'a> {
    search: Option<String>,
    category: &'a CategoryFilter,
    min_price: Option<f64>,
    max_price: Option<f64>,
}

impl<'a> ListingFilter<'a> {
    pub fn from_params(params: &'a QueryParams) -> Self {
        let search = if params.search.is_empty() {
            None
        } else {
            Some(params.search.to_lowercase())
        };

        Self {
            search,
            category: &params.category,
            min_price: parse_bound(&params.min_price),
            max_price: parse_bound(&params.max_price),
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_search(listing)
            && self.category.accepts(&listing.category)
            && self.min_price.is_none_or(|min| listing.price >= min)
            && self.max_price.is_none_or(|max| listing.price <= max)
    }

    fn matches_search(&self, listing: &Listing) -> bool {
        let Some(term) = &self.search else {
            return true;
        };

        listing.title.to_lowercase().contains(term)
            || listing.description.to_lowercase().contains(term)
            || listing
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(term))
    }

    /// True when no rule is active and every listing passes.
    pub fn is_open(&self) -> bool {
        self.search.is_none()
            && *self.category == CategoryFilter::All
            && self.min_price.is_none()
            && self.max_price.is_none()
    }
}
