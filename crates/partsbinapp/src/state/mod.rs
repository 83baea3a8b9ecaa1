//! # Client-Side State
//!
//! Favorites, recently viewed listings and the admin token are small string values kept
//! outside the listing store. [`KeyValueStore`] is the seam for that storage, split into two
//! [`Lifetime`]s:
//!
//! - [`Lifetime::Persistent`]: survives across runs (favorites, `adminToken`).
//! - [`Lifetime::Session`]: lives until the browsing session ends (recently viewed).
//!
//! Values are opaque strings. Callers own their encoding (the tracker stores JSON arrays).
//!
//! ## Implementations
//!
//! - [`memory::MemoryKv`]: in-process maps, for tests.
//! - [`fs::FileKv`]: one JSON document per lifetime, replaced atomically on every write.
//!
//! Implementations are cheap handles: clones address the same underlying storage, so the
//! tracker and the auth gate can each hold one.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod fs;
pub mod memory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
    Persistent,
    Session,
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifetime::Persistent => f.write_str("persistent"),
            Lifetime::Session => f.write_str("session"),
        }
    }
}

pub trait KeyValueStore {
    fn get(&self, key: &str, lifetime: Lifetime) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str, lifetime: Lifetime) -> Result<()>;

    /// Removing an absent key is not an error
    fn remove(&mut self, key: &str, lifetime: Lifetime) -> Result<()>;

    /// Drop every key in one lifetime, leaving the other untouched
    fn clear(&mut self, lifetime: Lifetime) -> Result<()>;
}
