//! # Configuration
//!
//! Partsbin configuration is managed by [`confique`], which layers environment variables
//! over a TOML file over compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `PARTSBIN_BACKEND`, `PARTSBIN_API_URL`, etc.
//! 2. **Config file**: `partsbin.toml` in the data directory.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `backend` | `PARTSBIN_BACKEND` | `file` | Listing store: `file` or `http` |
//! | `api_url` | `PARTSBIN_API_URL` | none | Base URL of the REST store (`http` backend) |
//! | `page_size` | `PARTSBIN_PAGE_SIZE` | `12` | Listings per browse page |
//! | `recent_limit` | `PARTSBIN_RECENT_LIMIT` | `10` | Recently viewed entries kept |
//! | `admin_user` | `PARTSBIN_ADMIN_USER` | `admin` | Admin login name |
//! | `admin_pass` | `PARTSBIN_ADMIN_PASS` | `admin123` | Admin password |
//! | `session_id` | `PARTSBIN_SESSION_ID` | `default` | Names the session state file |
//! | `http_timeout_secs` | `PARTSBIN_HTTP_TIMEOUT_SECS` | `10` | Per-request timeout |

use crate::auth::Credentials;
use crate::error::{CatalogError, Result};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE: &str = "partsbin.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    File,
    Http,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::File => f.write_str("file"),
            Backend::Http => f.write_str("http"),
        }
    }
}

/// Configuration for partsbin, stored in `partsbin.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Where listings live: "file" (listings.json in the data dir) or "http"
    #[config(default = "file", env = "PARTSBIN_BACKEND")]
    pub backend: Backend,

    /// Base URL of a json-server style API, e.g. "http://localhost:3001"
    #[config(env = "PARTSBIN_API_URL")]
    pub api_url: Option<String>,

    #[config(default = 12, env = "PARTSBIN_PAGE_SIZE")]
    pub page_size: usize,

    #[config(default = 10, env = "PARTSBIN_RECENT_LIMIT")]
    pub recent_limit: usize,

    #[config(default = "admin", env = "PARTSBIN_ADMIN_USER")]
    pub admin_user: String,

    #[config(default = "admin123", env = "PARTSBIN_ADMIN_PASS")]
    pub admin_pass: String,

    /// Browsing sessions with different ids keep separate recently viewed lists
    #[config(default = "default", env = "PARTSBIN_SESSION_ID")]
    pub session_id: String,

    #[config(default = 10, env = "PARTSBIN_HTTP_TIMEOUT_SECS")]
    pub http_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: Backend::File,
            api_url: None,
            page_size: crate::query::DEFAULT_PAGE_SIZE,
            recent_limit: crate::tracker::DEFAULT_RECENT_LIMIT,
            admin_user: "admin".to_string(),
            admin_pass: "admin123".to_string(),
            session_id: "default".to_string(),
            http_timeout_secs: 10,
        }
    }
}

impl CatalogConfig {
    /// Loads env vars over `{data_dir}/partsbin.toml` over defaults. A missing file is fine.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let file = data_dir.join(CONFIG_FILE);
        let config = CatalogConfig::builder()
            .env()
            .file(&file)
            .load()
            .map_err(|e| CatalogError::Config(e.to_string()))?;
        tracing::debug!(backend = %config.backend, path = %file.display(), "config loaded");
        Ok(config)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.admin_user.clone(),
            password: self.admin_pass.clone(),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }

    /// The REST base URL, required when the backend is `http`.
    pub fn api_url(&self) -> Result<&str> {
        self.api_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                CatalogError::Config("api_url must be set when backend = \"http\"".to_string())
            })
    }
}
