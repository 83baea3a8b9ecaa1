use super::{KeyValueStore, Lifetime};
use crate::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
struct Maps {
    persistent: HashMap<String, String>,
    session: HashMap<String, String>,
}

impl Maps {
    fn for_lifetime(&mut self, lifetime: Lifetime) -> &mut HashMap<String, String> {
        match lifetime {
            Lifetime::Persistent => &mut self.persistent,
            Lifetime::Session => &mut self.session,
        }
    }
}

/// In-memory key-value storage for testing.
/// Clones share the same maps.
#[derive(Clone, Default)]
pub struct MemoryKv {
    maps: Rc<RefCell<Maps>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held in one lifetime.
    pub fn len(&self, lifetime: Lifetime) -> usize {
        self.maps.borrow_mut().for_lifetime(lifetime).len()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str, lifetime: Lifetime) -> Result<Option<String>> {
        Ok(self.maps.borrow_mut().for_lifetime(lifetime).get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str, lifetime: Lifetime) -> Result<()> {
        self.maps
            .borrow_mut()
            .for_lifetime(lifetime)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str, lifetime: Lifetime) -> Result<()> {
        self.maps.borrow_mut().for_lifetime(lifetime).remove(key);
        Ok(())
    }

    fn clear(&mut self, lifetime: Lifetime) -> Result<()> {
        self.maps.borrow_mut().for_lifetime(lifetime).clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetimes_are_separate() {
        let mut kv = MemoryKv::new();
        kv.set("k", "forever", Lifetime::Persistent).unwrap();
        kv.set("k", "for now", Lifetime::Session).unwrap();

        assert_eq!(kv.get("k", Lifetime::Persistent).unwrap().as_deref(), Some("forever"));
        assert_eq!(kv.get("k", Lifetime::Session).unwrap().as_deref(), Some("for now"));

        kv.clear(Lifetime::Session).unwrap();
        assert_eq!(kv.get("k", Lifetime::Session).unwrap(), None);
        assert_eq!(kv.len(Lifetime::Persistent), 1);
    }

    #[test]
    fn clones_share_storage() {
        let mut kv = MemoryKv::new();
        let other = kv.clone();
        kv.set("adminToken", "abc", Lifetime::Persistent).unwrap();
        assert_eq!(
            other.get("adminToken", Lifetime::Persistent).unwrap().as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn removing_absent_key_is_ok() {
        let mut kv = MemoryKv::new();
        assert!(kv.remove("missing", Lifetime::Persistent).is_ok());
    }
}
