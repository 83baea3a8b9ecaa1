use crate::model::{Condition, Listing, ListingDraft};
use crate::state::memory::MemoryKv;
use crate::store::memory::InMemoryStore;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Fixed epoch so `created_at` ordering in tests never depends on the clock.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A listing created `offset` seconds after [`base_time`].
pub fn listing(id: &str, price: f64, category: &str, offset: i64) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Part {}", id),
        description: format!("Description for part {}", id),
        price,
        category: category.to_string(),
        condition: Condition::New,
        quantity: 1,
        tags: Vec::new(),
        location: None,
        coordinates: None,
        image: format!("https://example.com/{}.jpg", id),
        created_at: base_time() + Duration::seconds(offset),
    }
}

pub fn draft(title: &str, price: f64, category: &str) -> ListingDraft {
    ListingDraft {
        title: title.to_string(),
        description: format!("{} in excellent shape", title),
        price,
        category: category.to_string(),
        image: "https://example.com/part.jpg".to_string(),
        ..Default::default()
    }
}

pub struct CatalogFixture {
    pub store: InMemoryStore,
    pub kv: MemoryKv,
}

impl Default for CatalogFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogFixture {
    pub fn new() -> Self {
        Self {
            store: InMemoryStore::new(),
            kv: MemoryKv::new(),
        }
    }

    pub fn with_listings(mut self, listings: Vec<Listing>) -> Self {
        for l in listings {
            self.store.insert(l);
        }
        self
    }
}
