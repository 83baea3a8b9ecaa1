use crate::auth::AdminAuth;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Listing;
use crate::query::available_categories;
use crate::state::KeyValueStore;
use crate::store::ListingStore;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_items: usize,
    pub category_count: usize,
    /// Most recently created listing; the earliest in store order wins a tie
    pub newest: Option<Listing>,
}

pub fn stats(listings: &[Listing]) -> CatalogStats {
    let newest = listings.iter().fold(None::<&Listing>, |best, l| match best {
        Some(b) if b.created_at >= l.created_at => Some(b),
        _ => Some(l),
    });
    CatalogStats {
        total_items: listings.len(),
        category_count: available_categories(listings).len(),
        newest: newest.cloned(),
    }
}

pub fn run<S: ListingStore, K: KeyValueStore>(store: &S, auth: &AdminAuth<K>) -> Result<CmdResult> {
    auth.require_admin("view the dashboard")?;
    let listings = store.fetch_all()?;
    Ok(CmdResult {
        stats: Some(stats(&listings)),
        ..Default::default()
    })
}
