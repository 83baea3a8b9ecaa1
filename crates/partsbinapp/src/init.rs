//! # Context Setup
//!
//! [`initialize`] resolves where partsbin keeps its data, loads configuration from there and
//! wires the configured listing store and the file-backed state into a [`CatalogApi`].
//!
//! ## Data Directory
//!
//! Resolved in priority order:
//! 1. An explicit override (the CLI's `--data` flag).
//! 2. The `PARTSBIN_DATA` environment variable (primarily for testing).
//! 3. The OS-appropriate data directory, via the `directories` crate.
//!
//! The data directory holds `partsbin.toml`, `listings.json` (file backend) and
//! `state.json` (favorites and the admin token). Session state goes to the OS temp dir,
//! named by `session_id`.

use crate::api::CatalogApi;
use crate::config::{Backend, CatalogConfig};
use crate::error::{CatalogError, Result};
use crate::state::fs::FileKv;
use crate::store::fs::FileStore;
use crate::store::http::HttpStore;
use crate::store::BackendStore;
use directories::ProjectDirs;
use std::path::PathBuf;

pub const DATA_ENV: &str = "PARTSBIN_DATA";

pub struct CatalogContext {
    pub api: CatalogApi<BackendStore, FileKv>,
    pub config: CatalogConfig,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "partsbin", "partsbin")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CatalogError::Config("Could not determine a data directory".to_string()))
}

pub fn build_store(config: &CatalogConfig, data_dir: PathBuf) -> Result<BackendStore> {
    match config.backend {
        Backend::File => Ok(BackendStore::File(FileStore::new(data_dir))),
        Backend::Http => {
            let store = HttpStore::new(config.api_url()?, config.http_timeout())?;
            Ok(BackendStore::Http(store))
        }
    }
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<CatalogContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = CatalogConfig::load(&data_dir)?;

    let store = build_store(&config, data_dir.clone())?;
    let kv = FileKv::in_data_dir(data_dir.clone(), config.session_id.clone());
    let api = CatalogApi::new(store, kv, &config)?;

    tracing::debug!(data_dir = %data_dir.display(), backend = %config.backend, "catalog initialized");
    Ok(CatalogContext {
        api,
        config,
        data_dir,
    })
}
