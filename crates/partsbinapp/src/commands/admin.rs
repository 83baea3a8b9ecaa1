//! Admin catalog management.
//!
//! Every operation here requires a logged-in admin and fails with `Unauthorized` otherwise.
//! Drafts are validated by the store, which reports every failing field at once.

use crate::auth::AdminAuth;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{parse_tags, Condition, Coordinates, Listing, ListingDraft};
use crate::state::KeyValueStore;
use crate::store::ListingStore;

/// Form-style field values for creating or editing a listing.
///
/// `None` leaves a field as it is (on edit) or at its default (on create). Tags are
/// comma-separated. Coordinates are kept only when both halves parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub condition: Option<Condition>,
    pub quantity: Option<u32>,
    pub tags: Option<String>,
    pub location: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub image: Option<String>,
}

impl ListingEdit {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn into_draft(self) -> ListingDraft {
        self.apply(ListingDraft::default())
    }

    pub fn apply(self, mut draft: ListingDraft) -> ListingDraft {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(condition) = self.condition {
            draft.condition = condition;
        }
        if let Some(quantity) = self.quantity {
            draft.quantity = quantity;
        }
        if let Some(tags) = self.tags {
            draft.tags = parse_tags(&tags);
        }
        if let Some(location) = self.location {
            let location = location.trim().to_string();
            draft.location = (!location.is_empty()).then_some(location);
        }
        if self.lat.is_some() || self.lng.is_some() {
            let current = draft.coordinates;
            let lat = self
                .lat
                .or_else(|| current.map(|c| c.lat.to_string()))
                .unwrap_or_default();
            let lng = self
                .lng
                .or_else(|| current.map(|c| c.lng.to_string()))
                .unwrap_or_default();
            draft.coordinates = Coordinates::from_input(&lat, &lng);
        }
        if let Some(image) = self.image {
            draft.image = image;
        }
        draft
    }
}

/// Case-insensitive substring match on title or category. An empty term matches everything.
pub fn search<'a>(listings: &'a [Listing], term: &str) -> Vec<&'a Listing> {
    let needle = term.trim().to_lowercase();
    listings
        .iter()
        .filter(|l| {
            needle.is_empty()
                || l.title.to_lowercase().contains(&needle)
                || l.category.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn list<S: ListingStore, K: KeyValueStore>(
    store: &S,
    auth: &AdminAuth<K>,
    term: &str,
) -> Result<CmdResult> {
    auth.require_admin("manage listings")?;
    let listings = store.fetch_all()?;
    let matched: Vec<Listing> = search(&listings, term).into_iter().cloned().collect();

    let mut result = CmdResult::default();
    if matched.is_empty() {
        result.add_message(CmdMessage::info("No listings found"));
    }
    Ok(result.with_listed_listings(matched))
}

pub fn create<S: ListingStore, K: KeyValueStore>(
    store: &mut S,
    auth: &AdminAuth<K>,
    draft: ListingDraft,
) -> Result<CmdResult> {
    auth.require_admin("create listings")?;
    let listing = store.create(draft)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Created listing {}: {}",
        listing.id, listing.title
    )));
    Ok(result.with_affected_listings(vec![listing]))
}

/// Applies `edit` on top of the stored listing and saves the result.
pub fn update<S: ListingStore, K: KeyValueStore>(
    store: &mut S,
    auth: &AdminAuth<K>,
    id: &str,
    edit: ListingEdit,
) -> Result<CmdResult> {
    auth.require_admin("edit listings")?;
    let existing = store.fetch_by_id(id)?;
    let mut result = CmdResult::default();

    if edit.is_empty() {
        result.add_message(CmdMessage::info("Nothing to change"));
        return Ok(result.with_affected_listings(vec![existing]));
    }

    let listing = store.update(id, edit.apply(existing.to_draft()))?;
    result.add_message(CmdMessage::success(format!(
        "Updated listing {}: {}",
        listing.id, listing.title
    )));
    Ok(result.with_affected_listings(vec![listing]))
}

pub fn delete<S: ListingStore, K: KeyValueStore>(
    store: &mut S,
    auth: &AdminAuth<K>,
    id: &str,
) -> Result<CmdResult> {
    auth.require_admin("delete listings")?;
    let listing = store.fetch_by_id(id)?;
    store.delete(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted listing {}: {}",
        listing.id, listing.title
    )));
    Ok(result.with_affected_listings(vec![listing]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::error::CatalogError;
    use crate::state::memory::MemoryKv;
    use crate::test_utils::{draft, listing, CatalogFixture};

    fn admin(kv: &MemoryKv) -> AdminAuth<MemoryKv> {
        let mut auth = AdminAuth::new(kv.clone(), Credentials::default());
        auth.login("admin", "admin123").unwrap();
        auth
    }

    fn fixture() -> CatalogFixture {
        let mut engine = listing("1", 10.0, "Engine", 1);
        engine.title = "Turbo Charger".into();
        let mut brakes = listing("2", 20.0, "Brakes", 2);
        brakes.title = "Brake Caliper".into();
        CatalogFixture::new().with_listings(vec![engine, brakes])
    }

    #[test]
    fn search_matches_title_or_category_case_insensitively() {
        let f = fixture();
        let listings = f.store.fetch_all().unwrap();

        let ids = |term: &str| -> Vec<String> {
            search(&listings, term).iter().map(|l| l.id.clone()).collect()
        };
        assert_eq!(ids("turbo"), ["1"]);
        assert_eq!(ids("BRAKE"), ["2"]);
        assert_eq!(ids("engine"), ["1"]);
        assert_eq!(ids("  "), ["1", "2"]);
        assert!(ids("exhaust").is_empty());
    }

    #[test]
    fn admin_operations_need_login() {
        let mut f = fixture();
        let auth = AdminAuth::new(f.kv.clone(), Credentials::default());

        assert!(matches!(
            list(&f.store, &auth, ""),
            Err(CatalogError::Unauthorized(_))
        ));
        assert!(matches!(
            create(&mut f.store, &auth, draft("Intake Manifold", 50.0, "Engine")),
            Err(CatalogError::Unauthorized(_))
        ));
        assert!(matches!(
            delete(&mut f.store, &auth, "1"),
            Err(CatalogError::Unauthorized(_))
        ));
        assert_eq!(f.store.fetch_all().unwrap().len(), 2);
    }

    #[test]
    fn create_reports_new_listing() {
        let mut f = fixture();
        let auth = admin(&f.kv);
        let result = create(&mut f.store, &auth, draft("Intake Manifold", 50.0, "Engine")).unwrap();
        assert_eq!(result.affected_listings[0].id, "3");
        assert_eq!(
            result.messages[0].content,
            "Created listing 3: Intake Manifold"
        );
    }

    #[test]
    fn create_surfaces_field_errors() {
        let mut f = fixture();
        let auth = admin(&f.kv);
        let errors = match create(&mut f.store, &auth, draft("", 0.0, "Engine")) {
            Err(CatalogError::ValidationFailed(errors)) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        };
        assert!(errors.get("title").is_some());
        assert!(errors.get("price").is_some());
    }

    #[test]
    fn update_applies_only_given_fields() {
        let mut f = fixture();
        let auth = admin(&f.kv);
        let before = f.store.fetch_by_id("2").unwrap();

        let edit = ListingEdit {
            price: Some(25.5),
            tags: Some("oem, front".into()),
            ..Default::default()
        };
        let result = update(&mut f.store, &auth, "2", edit).unwrap();
        let after = &result.affected_listings[0];
        assert_eq!(after.price, 25.5);
        assert_eq!(after.tags, ["oem", "front"]);
        assert_eq!(after.title, before.title);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn empty_edit_changes_nothing() {
        let mut f = fixture();
        let auth = admin(&f.kv);
        let result = update(&mut f.store, &auth, "1", ListingEdit::default()).unwrap();
        assert_eq!(result.messages[0].content, "Nothing to change");
    }

    #[test]
    fn update_and_delete_unknown_id_are_not_found() {
        let mut f = fixture();
        let auth = admin(&f.kv);
        let edit = ListingEdit {
            price: Some(1.0),
            ..Default::default()
        };
        assert!(matches!(
            update(&mut f.store, &auth, "9", edit),
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(
            delete(&mut f.store, &auth, "9"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn delete_removes_listing() {
        let mut f = fixture();
        let auth = admin(&f.kv);
        let result = delete(&mut f.store, &auth, "1").unwrap();
        assert_eq!(result.affected_listings[0].title, "Turbo Charger");
        assert_eq!(f.store.fetch_all().unwrap().len(), 1);
    }

    #[test]
    fn edit_coordinates_merge_with_existing_half() {
        let base = ListingDraft {
            coordinates: Some(Coordinates { lat: 10.0, lng: 20.0 }),
            ..Default::default()
        };
        let edit = ListingEdit {
            lat: Some("45.5".into()),
            ..Default::default()
        };
        assert_eq!(
            edit.apply(base).coordinates,
            Some(Coordinates { lat: 45.5, lng: 20.0 })
        );

        let edit = ListingEdit {
            lat: Some("45.5".into()),
            ..Default::default()
        };
        assert_eq!(edit.into_draft().coordinates, None);
    }

    #[test]
    fn blank_location_clears_it() {
        let base = ListingDraft {
            location: Some("Garage 4".into()),
            ..Default::default()
        };
        let edit = ListingEdit {
            location: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(edit.apply(base).location, None);
    }
}
