use super::{KeyValueStore, Lifetime};
use crate::error::{CatalogError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const PERSISTENT_FILE: &str = "state.json";

/// File-backed key-value storage.
///
/// Each lifetime is one JSON object of string values:
/// - persistent: `{persistent_dir}/state.json`
/// - session: `{session_dir}/partsbin-session-{session_id}.json`
///
/// The session document normally lives in the OS temp dir, so it disappears with the
/// machine's temp files even if the session is never ended explicitly.
///
/// A document that is not UTF-8 JSON is treated as empty (and logged), so the next write
/// replaces it instead of failing forever.
#[derive(Debug, Clone)]
pub struct FileKv {
    persistent_dir: PathBuf,
    session_dir: PathBuf,
    session_id: String,
}

impl FileKv {
    pub fn new(persistent_dir: PathBuf, session_dir: PathBuf, session_id: impl Into<String>) -> Self {
        Self {
            persistent_dir,
            session_dir,
            session_id: session_id.into(),
        }
    }

    /// Session documents go to the OS temp dir.
    pub fn in_data_dir(data_dir: PathBuf, session_id: impl Into<String>) -> Self {
        Self::new(data_dir, std::env::temp_dir(), session_id)
    }

    pub fn path(&self, lifetime: Lifetime) -> PathBuf {
        match lifetime {
            Lifetime::Persistent => self.persistent_dir.join(PERSISTENT_FILE),
            Lifetime::Session => self
                .session_dir
                .join(format!("partsbin-session-{}.json", sanitize(&self.session_id))),
        }
    }

    fn dir(&self, lifetime: Lifetime) -> &Path {
        match lifetime {
            Lifetime::Persistent => &self.persistent_dir,
            Lifetime::Session => &self.session_dir,
        }
    }

    fn load(&self, lifetime: Lifetime) -> Result<BTreeMap<String, String>> {
        let path = self.path(lifetime);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let decoded = match fs::read(&path) {
            Ok(bytes) => decode_document(&bytes),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => Err(e.to_string()),
            Err(e) => return Err(CatalogError::Io(e)),
        };
        match decoded {
            Ok(map) => Ok(map),
            Err(reason) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %reason,
                    "ignoring unreadable {} state",
                    lifetime
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn save(&self, lifetime: Lifetime, map: &BTreeMap<String, String>) -> Result<()> {
        let dir = self.dir(lifetime);
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(CatalogError::Io)?;
        }
        let content = serde_json::to_string_pretty(map).map_err(CatalogError::Serialization)?;

        let tmp_file = dir.join(format!(".state-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(CatalogError::Io)?;
        fs::rename(&tmp_file, self.path(lifetime)).map_err(CatalogError::Io)?;
        Ok(())
    }
}

/// Blank documents are empty; anything that is not UTF-8 JSON is an error string.
fn decode_document(bytes: &[u8]) -> std::result::Result<BTreeMap<String, String>, String> {
    let content = std::str::from_utf8(bytes).map_err(|e| e.to_string())?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(content).map_err(|e| e.to_string())
}

/// Session ids come from config; keep them to a safe file-name alphabet.
fn sanitize(session_id: &str) -> String {
    session_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl KeyValueStore for FileKv {
    fn get(&self, key: &str, lifetime: Lifetime) -> Result<Option<String>> {
        Ok(self.load(lifetime)?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str, lifetime: Lifetime) -> Result<()> {
        let mut map = self.load(lifetime)?;
        map.insert(key.to_string(), value.to_string());
        self.save(lifetime, &map)
    }

    fn remove(&mut self, key: &str, lifetime: Lifetime) -> Result<()> {
        let mut map = self.load(lifetime)?;
        if map.remove(key).is_some() {
            self.save(lifetime, &map)?;
        }
        Ok(())
    }

    fn clear(&mut self, lifetime: Lifetime) -> Result<()> {
        let path = self.path(lifetime);
        if path.exists() {
            fs::remove_file(&path).map_err(CatalogError::Io)?;
        }
        Ok(())
    }
}
