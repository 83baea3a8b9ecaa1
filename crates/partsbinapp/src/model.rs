//! # Catalog Data Model
//!
//! A [`Listing`] is the immutable record delivered by a store. Admin flows edit a
//! [`ListingDraft`], which carries every listing field except the two the store assigns
//! (`id` and `created_at`).
//!
//! Categories form a fixed set ([`Category`]), but [`Listing::category`] is kept as a plain
//! string: the set is enforced when a draft is validated, never when a listing is read back.
//! A store that already holds an out-of-set category still round-trips it untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Engine,
    Brakes,
    Lighting,
    Wheels,
    Exhaust,
    Electrical,
    Suspension,
    Body,
    Interior,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Engine,
        Category::Brakes,
        Category::Lighting,
        Category::Wheels,
        Category::Exhaust,
        Category::Electrical,
        Category::Suspension,
        Category::Body,
        Category::Interior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Engine => "Engine",
            Category::Brakes => "Brakes",
            Category::Lighting => "Lighting",
            Category::Wheels => "Wheels",
            Category::Exhaust => "Exhaust",
            Category::Electrical => "Electrical",
            Category::Suspension => "Suspension",
            Category::Body => "Body",
            Category::Interior => "Interior",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Exact, case-sensitive match against the category names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    #[default]
    New,
    Used,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::New => f.write_str("new"),
            Condition::Used => f.write_str("used"),
        }
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Condition::New),
            "used" => Ok(Condition::Used),
            other => Err(format!("Unknown condition: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Builds coordinates from raw form input. Both values must parse, otherwise there are
    /// no coordinates at all.
    pub fn from_input(lat: &str, lng: &str) -> Option<Self> {
        let lat = lat.trim().parse::<f64>().ok()?;
        let lng = lng.trim().parse::<f64>().ok()?;
        Some(Self { lat, lng })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn from_draft(id: impl Into<String>, draft: ListingDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            condition: draft.condition,
            quantity: draft.quantity,
            tags: draft.tags,
            location: draft.location,
            coordinates: draft.coordinates,
            image: draft.image,
            created_at,
        }
    }

    /// The editable part of this listing, as loaded into an edit form.
    pub fn to_draft(&self) -> ListingDraft {
        ListingDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price,
            category: self.category.clone(),
            condition: self.condition,
            quantity: self.quantity,
            tags: self.tags.clone(),
            location: self.location.clone(),
            coordinates: self.coordinates,
            image: self.image.clone(),
        }
    }
}

/// Stores such as json-server hand out numeric ids; everything downstream treats ids as
/// opaque strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub image: String,
}

fn default_quantity() -> u32 {
    1
}

impl Default for ListingDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: 0.0,
            category: String::new(),
            condition: Condition::New,
            quantity: default_quantity(),
            tags: Vec::new(),
            location: None,
            coordinates: None,
            image: String::new(),
        }
    }
}

const MIN_DESCRIPTION_LEN: usize = 10;

impl ListingDraft {
    /// Checks every field and reports all failures at once, keyed by field name.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.title.trim().is_empty() {
            errors.insert("title", "Title is required");
        }

        if self.price.is_nan() || self.price <= 0.0 {
            errors.insert("price", "Price must be greater than 0");
        }

        if self.category.trim().is_empty() {
            errors.insert("category", "Category is required");
        } else if Category::from_str(&self.category).is_err() {
            errors.insert("category", "Unknown category");
        }

        if self.description.trim().is_empty()
            || self.description.chars().count() < MIN_DESCRIPTION_LEN
        {
            errors.insert(
                "description",
                "Description must be at least 10 characters",
            );
        }

        if self.image.trim().is_empty() {
            errors.insert("image", "Image URL is required");
        } else if url::Url::parse(self.image.trim()).is_err() {
            errors.insert("image", "Must be a valid URL");
        }

        if let Some(coords) = &self.coordinates {
            if !(-90.0..=90.0).contains(&coords.lat) || !(-180.0..=180.0).contains(&coords.lng) {
                errors.insert("coordinates", "Coordinates are out of range");
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Splits comma-separated tag input, trimming each entry and dropping empties.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ListingDraft {
        ListingDraft {
            title: "Brake Caliper".into(),
            description: "High-performance brake caliper".into(),
            price: 199.99,
            category: "Brakes".into(),
            image: "https://example.com/caliper.jpg".into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let errors = ListingDraft::default().validate().unwrap_err();
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("price"), Some("Price must be greater than 0"));
        assert_eq!(errors.get("category"), Some("Category is required"));
        assert_eq!(
            errors.get("description"),
            Some("Description must be at least 10 characters")
        );
        assert_eq!(errors.get("image"), Some("Image URL is required"));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn rejects_unknown_category_case_sensitively() {
        let draft = ListingDraft {
            category: "brakes".into(),
            ..valid_draft()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.get("category"), Some("Unknown category"));
    }

    #[test]
    fn rejects_relative_image_url() {
        let draft = ListingDraft {
            image: "images/caliper.jpg".into(),
            ..valid_draft()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.get("image"), Some("Must be a valid URL"));
    }

    #[test]
    fn rejects_short_description() {
        let draft = ListingDraft {
            description: "too short".into(),
            ..valid_draft()
        };
        assert!(draft.validate().unwrap_err().get("description").is_some());
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let draft = ListingDraft {
            coordinates: Some(Coordinates { lat: 91.0, lng: 0.0 }),
            ..valid_draft()
        };
        assert!(draft.validate().unwrap_err().get("coordinates").is_some());
    }

    #[test]
    fn parse_tags_trims_and_drops_empties() {
        assert_eq!(
            parse_tags(" performance, brakes,, racing ,"),
            vec!["performance", "brakes", "racing"]
        );
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn coordinates_need_both_halves() {
        assert_eq!(
            Coordinates::from_input("40.7", "-74.0"),
            Some(Coordinates { lat: 40.7, lng: -74.0 })
        );
        assert_eq!(Coordinates::from_input("40.7", ""), None);
        assert_eq!(Coordinates::from_input("north", "-74.0"), None);
    }

    #[test]
    fn listing_accepts_numeric_ids_and_missing_optionals() {
        let json = r#"{
            "id": 7,
            "title": "Headlight",
            "description": "LED headlight assembly",
            "price": 89.5,
            "category": "Lighting",
            "condition": "used",
            "quantity": 2,
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.id, "7");
        assert_eq!(listing.condition, Condition::Used);
        assert!(listing.tags.is_empty());
        assert!(listing.coordinates.is_none());
    }

    #[test]
    fn listing_accepts_large_and_fractional_numeric_ids() {
        let base = r#""title": "Headlight", "description": "LED headlight assembly",
            "price": 89.5, "category": "Lighting", "createdAt": "2024-03-01T10:00:00Z""#;

        let big: Listing =
            serde_json::from_str(&format!(r#"{{"id": 18446744073709551615, {}}}"#, base))
                .unwrap();
        assert_eq!(big.id, "18446744073709551615");

        let fractional: Listing =
            serde_json::from_str(&format!(r#"{{"id": 3.5, {}}}"#, base)).unwrap();
        assert_eq!(fractional.id, "3.5");
    }

    #[test]
    fn listing_keeps_out_of_set_category_on_read() {
        let json = r#"{
            "id": "a1",
            "title": "Turbo",
            "description": "Twin scroll turbo",
            "price": 1200,
            "category": "Forced Induction",
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.category, "Forced Induction");
    }

    #[test]
    fn category_parses_exact_names_only() {
        assert_eq!("Engine".parse::<Category>(), Ok(Category::Engine));
        assert!("engine".parse::<Category>().is_err());
    }
}
