//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry point
//! for every partsbin operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the listing store, the [`Tracker`] and the [`AdminAuth`] gate
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (the configured page size applies when a request has none)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O**: no stdout, stderr or formatting
//!
//! ## Generic Over Stores
//!
//! `CatalogApi<S: ListingStore, K: KeyValueStore>`:
//! - Production: `CatalogApi<BackendStore, FileKv>`
//! - Testing: `CatalogApi<InMemoryStore, MemoryKv>`
//!
//! The tracker and the auth gate each hold a clone of the same key-value handle.

use crate::auth::AdminAuth;
use crate::commands::{self, admin::ListingEdit, CmdResult};
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::model::ListingDraft;
use crate::query::QueryParams;
use crate::state::KeyValueStore;
use crate::store::ListingStore;
use crate::tracker::Tracker;

pub struct CatalogApi<S: ListingStore, K: KeyValueStore> {
    store: S,
    tracker: Tracker<K>,
    auth: AdminAuth<K>,
    page_size: usize,
}

impl<S: ListingStore, K: KeyValueStore + Clone> CatalogApi<S, K> {
    pub fn new(store: S, kv: K, config: &CatalogConfig) -> Result<Self> {
        let tracker = Tracker::load(kv.clone(), config.recent_limit)?;
        let auth = AdminAuth::new(kv, config.credentials());
        Ok(Self {
            store,
            tracker,
            auth,
            page_size: config.page_size.max(1),
        })
    }
}

impl<S: ListingStore, K: KeyValueStore> CatalogApi<S, K> {
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tracker(&self) -> &Tracker<K> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut Tracker<K> {
        &mut self.tracker
    }

    pub fn auth(&self) -> &AdminAuth<K> {
        &self.auth
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// A request with `page_size == 0` gets the configured page size.
    pub fn browse(&self, mut params: QueryParams) -> Result<CmdResult> {
        if params.page_size == 0 {
            params.page_size = self.page_size;
        }
        commands::browse::run(&self.store, &self.tracker, &params)
    }

    pub fn view(&mut self, id: &str) -> Result<CmdResult> {
        commands::view::run(&self.store, &mut self.tracker, id)
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Result<CmdResult> {
        commands::favorites::toggle(&self.store, &mut self.tracker, id)
    }

    pub fn favorites(&self) -> Result<CmdResult> {
        commands::favorites::list(&self.store, &self.tracker)
    }

    pub fn recent(&self) -> Result<CmdResult> {
        commands::favorites::recent(&self.store, &self.tracker)
    }

    pub fn end_session(&mut self) -> Result<CmdResult> {
        commands::favorites::end_session(&mut self.tracker)
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<CmdResult> {
        commands::session::login(&mut self.auth, username, password)
    }

    pub fn logout(&mut self) -> Result<CmdResult> {
        commands::session::logout(&mut self.auth)
    }

    pub fn admin_list(&self, term: &str) -> Result<CmdResult> {
        commands::admin::list(&self.store, &self.auth, term)
    }

    pub fn create(&mut self, draft: ListingDraft) -> Result<CmdResult> {
        commands::admin::create(&mut self.store, &self.auth, draft)
    }

    pub fn update(&mut self, id: &str, edit: ListingEdit) -> Result<CmdResult> {
        commands::admin::update(&mut self.store, &self.auth, id, edit)
    }

    pub fn delete(&mut self, id: &str) -> Result<CmdResult> {
        commands::admin::delete(&mut self.store, &self.auth, id)
    }

    pub fn dashboard(&self) -> Result<CmdResult> {
        commands::dashboard::run(&self.store, &self.auth)
    }
}
