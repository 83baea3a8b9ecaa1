//! Admin authentication gate.
//!
//! Credentials come from config. A successful login stores a fresh opaque token under
//! `adminToken` in the persistent lifetime; being an admin means that token is present.

use crate::error::{CatalogError, Result};
use crate::state::{KeyValueStore, Lifetime};
use uuid::Uuid;

pub const ADMIN_TOKEN_KEY: &str = "adminToken";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

pub struct AdminAuth<K: KeyValueStore> {
    kv: K,
    credentials: Credentials,
    revision: u64,
}

impl<K: KeyValueStore> AdminAuth<K> {
    pub fn new(kv: K, credentials: Credentials) -> Self {
        Self {
            kv,
            credentials,
            revision: 0,
        }
    }

    /// Returns `false` on a credential mismatch. Only storage failures are errors.
    pub fn login(&mut self, username: &str, password: &str) -> Result<bool> {
        if username != self.credentials.username || password != self.credentials.password {
            tracing::warn!(username, "admin login rejected");
            return Ok(false);
        }
        let token = Uuid::new_v4().to_string();
        self.kv.set(ADMIN_TOKEN_KEY, &token, Lifetime::Persistent)?;
        self.revision += 1;
        tracing::info!(username, "admin logged in");
        Ok(true)
    }

    pub fn logout(&mut self) -> Result<()> {
        let was_admin = self.is_admin()?;
        self.kv.remove(ADMIN_TOKEN_KEY, Lifetime::Persistent)?;
        if was_admin {
            self.revision += 1;
            tracing::info!("admin logged out");
        }
        Ok(())
    }

    pub fn is_admin(&self) -> Result<bool> {
        Ok(self
            .kv
            .get(ADMIN_TOKEN_KEY, Lifetime::Persistent)?
            .is_some_and(|token| !token.trim().is_empty()))
    }

    /// Fails with `Unauthorized` unless an admin is logged in.
    pub fn require_admin(&self, action: &str) -> Result<()> {
        if self.is_admin()? {
            Ok(())
        } else {
            Err(CatalogError::Unauthorized(format!(
                "log in as admin to {}",
                action
            )))
        }
    }

    /// Bumped on every login and effective logout.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::memory::MemoryKv;

    fn auth() -> (AdminAuth<MemoryKv>, MemoryKv) {
        let kv = MemoryKv::new();
        (AdminAuth::new(kv.clone(), Credentials::default()), kv)
    }

    #[test]
    fn login_with_default_credentials_stores_token() {
        let (mut auth, kv) = auth();
        assert!(!auth.is_admin().unwrap());
        assert!(auth.login("admin", "admin123").unwrap());
        assert!(auth.is_admin().unwrap());

        let token = kv.get(ADMIN_TOKEN_KEY, Lifetime::Persistent).unwrap().unwrap();
        assert!(Uuid::parse_str(&token).is_ok());
        assert_eq!(auth.revision(), 1);
    }

    #[test]
    fn wrong_credentials_are_rejected_without_error() {
        let (mut auth, _) = auth();
        assert!(!auth.login("admin", "nope").unwrap());
        assert!(!auth.login("root", "admin123").unwrap());
        assert!(!auth.is_admin().unwrap());
        assert_eq!(auth.revision(), 0);
    }

    #[test]
    fn logout_clears_token() {
        let (mut auth, _) = auth();
        auth.login("admin", "admin123").unwrap();
        auth.logout().unwrap();
        assert!(!auth.is_admin().unwrap());
        assert!(matches!(
            auth.require_admin("delete listings"),
            Err(CatalogError::Unauthorized(_))
        ));
    }

    #[test]
    fn tokens_survive_a_new_gate_on_the_same_storage() {
        let (mut auth, kv) = auth();
        auth.login("admin", "admin123").unwrap();
        let again = AdminAuth::new(kv, Credentials::default());
        assert!(again.require_admin("edit listings").is_ok());
    }

    #[test]
    fn configured_credentials_replace_defaults() {
        let creds = Credentials {
            username: "ops".into(),
            password: "s3cret".into(),
        };
        let mut auth = AdminAuth::new(MemoryKv::new(), creds);
        assert!(!auth.login("admin", "admin123").unwrap());
        assert!(auth.login("ops", "s3cret").unwrap());
    }
}
