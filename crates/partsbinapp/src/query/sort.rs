use crate::model::Listing;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
}

impl SortMode {
    /// Maps a sort key to a mode. Unknown or empty keys fall back to [`SortMode::Newest`].
    pub fn from_key(key: &str) -> Self {
        match key {
            "price-low" => SortMode::PriceLow,
            "price-high" => SortMode::PriceHigh,
            _ => SortMode::Newest,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SortMode::Newest => "newest",
            SortMode::PriceLow => "price-low",
            SortMode::PriceHigh => "price-high",
        }
    }

    pub fn compare(&self, a: &Listing, b: &Listing) -> Ordering {
        match self {
            SortMode::Newest => b.created_at.cmp(&a.created_at),
            SortMode::PriceLow => a.price.total_cmp(&b.price),
            SortMode::PriceHigh => b.price.total_cmp(&a.price),
        }
    }

    /// Stable sort: listings with equal keys keep their incoming order.
    pub fn sort(&self, listings: &mut [&Listing]) {
        listings.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl<'de> Deserialize<'de> for SortMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(SortMode::from_key(&raw))
    }
}
