//! REST-backed listing store.
//!
//! Talks to a json-server style collection:
//!
//! | Operation     | Request              |
//! |---------------|----------------------|
//! | `fetch_all`   | `GET {base}/items`        |
//! | `fetch_by_id` | `GET {base}/items/{id}`   |
//! | `create`      | `POST {base}/items`       |
//! | `update`      | `PUT {base}/items/{id}`   |
//! | `delete`      | `DELETE {base}/items/{id}` |
//!
//! Such servers neither stamp `createdAt` nor keep fields missing from a `PUT`, so the client
//! sends `createdAt` on create and carries the existing value forward on update.

use super::ListingStore;
use crate::error::{CatalogError, Result};
use crate::model::{FieldErrors, Listing, ListingDraft};
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

const COLLECTION: &str = "items";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingPayload<'a> {
    #[serde(flatten)]
    draft: &'a ListingDraft,
    created_at: DateTime<Utc>,
}

pub struct HttpStore {
    base: Url,
    client: Client,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| CatalogError::Config(format!("Invalid api_url '{}': {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(CatalogError::Config(format!(
                "api_url '{}' cannot be used as a base URL",
                base_url
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("partsbin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub(crate) fn collection_url(&self) -> Url {
        self.url_for(None)
    }

    pub(crate) fn item_url(&self, id: &str) -> Url {
        self.url_for(Some(id))
    }

    fn url_for(&self, id: Option<&str>) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in `new`, so segments are always available
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(COLLECTION);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<Response> {
        request
            .send()
            .map_err(|e| CatalogError::FetchFailed(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let url = response.url().clone();
        response
            .json::<T>()
            .map_err(|e| CatalogError::Store(format!("Invalid response from {}: {}", url, e)))
    }

    fn fetch_existing(&self, id: &str) -> Result<Listing> {
        let response = self.send(self.client.get(self.item_url(id)))?;
        let response = check_status(response, Some(id))?;
        Self::decode(response)
    }
}

/// Maps non-success statuses onto catalog errors.
fn check_status(response: Response, id: Option<&str>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    match status {
        StatusCode::NOT_FOUND => Err(CatalogError::NotFound(
            id.map(str::to_string).unwrap_or(url),
        )),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let body = response.text().unwrap_or_default();
            Err(CatalogError::ValidationFailed(server_field_errors(&body)))
        }
        _ => Err(CatalogError::FetchFailed(format!(
            "{} responded with {}",
            url, status
        ))),
    }
}

/// Servers that report validation problems as a `{field: message}` object keep their
/// per-field detail; anything else lands under `server`.
pub(crate) fn server_field_errors(body: &str) -> FieldErrors {
    if let Ok(errors) = serde_json::from_str::<FieldErrors>(body) {
        if !errors.is_empty() {
            return errors;
        }
    }
    let mut errors = FieldErrors::default();
    let message = body.trim();
    errors.insert(
        "server",
        if message.is_empty() {
            "Rejected by server"
        } else {
            message
        },
    );
    errors
}

impl ListingStore for HttpStore {
    fn fetch_all(&self) -> Result<Vec<Listing>> {
        let url = self.collection_url();
        tracing::debug!(%url, "fetching listings");
        let response = self.send(self.client.get(url))?;
        let response = check_status(response, None)?;
        let listings: Vec<Listing> = Self::decode(response)?;
        tracing::debug!(count = listings.len(), "listings fetched");
        Ok(listings)
    }

    fn fetch_by_id(&self, id: &str) -> Result<Listing> {
        self.fetch_existing(id)
    }

    fn create(&mut self, draft: ListingDraft) -> Result<Listing> {
        draft.validate().map_err(CatalogError::ValidationFailed)?;
        let payload = ListingPayload {
            draft: &draft,
            created_at: Utc::now(),
        };
        let response = self.send(self.client.post(self.collection_url()).json(&payload))?;
        let response = check_status(response, None)?;
        let listing: Listing = Self::decode(response)?;
        tracing::info!(id = %listing.id, "listing created");
        Ok(listing)
    }

    fn update(&mut self, id: &str, draft: ListingDraft) -> Result<Listing> {
        let existing = self.fetch_existing(id)?;
        draft.validate().map_err(CatalogError::ValidationFailed)?;
        let payload = ListingPayload {
            draft: &draft,
            created_at: existing.created_at,
        };
        let response = self.send(self.client.put(self.item_url(id)).json(&payload))?;
        let response = check_status(response, Some(id))?;
        let listing: Listing = Self::decode(response)?;
        tracing::info!(id = %listing.id, "listing updated");
        Ok(listing)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let response = self.send(self.client.delete(self.item_url(id)))?;
        check_status(response, Some(id))?;
        tracing::info!(id, "listing deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base: &str) -> HttpStore {
        HttpStore::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn builds_collection_and_item_urls() {
        let s = store("http://localhost:3001");
        assert_eq!(s.collection_url().as_str(), "http://localhost:3001/items");
        assert_eq!(s.item_url("7").as_str(), "http://localhost:3001/items/7");
    }

    #[test]
    fn keeps_base_path_prefix() {
        let s = store("http://example.com/api/");
        assert_eq!(s.collection_url().as_str(), "http://example.com/api/items");
        let s = store("http://example.com/api");
        assert_eq!(s.item_url("a b").as_str(), "http://example.com/api/items/a%20b");
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(matches!(
            HttpStore::new("not a url", Duration::from_secs(1)),
            Err(CatalogError::Config(_))
        ));
        assert!(matches!(
            HttpStore::new("mailto:admin@example.com", Duration::from_secs(1)),
            Err(CatalogError::Config(_))
        ));
    }

    #[test]
    fn server_errors_keep_field_detail_when_structured() {
        let errors = server_field_errors(r#"{"price":"must be positive"}"#);
        assert_eq!(errors.get("price"), Some("must be positive"));

        let errors = server_field_errors("bad payload");
        assert_eq!(errors.get("server"), Some("bad payload"));

        let errors = server_field_errors("");
        assert_eq!(errors.get("server"), Some("Rejected by server"));
    }

    #[test]
    fn payload_flattens_draft_with_created_at() {
        let draft = ListingDraft {
            title: "Caliper".into(),
            ..Default::default()
        };
        let payload = ListingPayload {
            draft: &draft,
            created_at: crate::test_utils::base_time(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["title"], "Caliper");
        assert_eq!(value["createdAt"], "2024-01-01T00:00:00Z");
        assert!(value.get("id").is_none());
    }
}
