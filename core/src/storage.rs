//! Key-value storage seam.
//!
//! RULE: the metrics store, panel, and toggle only reach persisted state
//! through `KeyValueStorage`. Backends report failures; callers decide
//! whether to swallow them.

use crate::error::{PanelError, PanelResult};
use std::collections::BTreeMap;

/// The contract every local-storage backend must fulfill.
pub trait KeyValueStorage {
    /// Returns `None` when the key is absent.
    fn get_item(&self, key: &str) -> PanelResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> PanelResult<()>;

    /// Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> PanelResult<()>;

    /// Drop every key, including ones this crate does not own.
    fn clear_all(&mut self) -> PanelResult<()>;
}

/// Process-local storage, used in tests and as the runner's fallback.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items:       BTreeMap<String, String>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key directly, bypassing the availability switch.
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }

    /// Simulate disabled storage (private browsing, quota exceeded).
    /// Every call fails until switched back.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check(&self) -> PanelResult<()> {
        if self.unavailable {
            return Err(PanelError::StorageUnavailable {
                reason: "memory storage switched off".into(),
            });
        }
        Ok(())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> PanelResult<Option<String>> {
        self.check()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> PanelResult<()> {
        self.check()?;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> PanelResult<()> {
        self.check()?;
        self.items.remove(key);
        Ok(())
    }

    fn clear_all(&mut self) -> PanelResult<()> {
        self.check()?;
        self.items.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut s = MemoryStorage::new();
        s.set_item("k", "v").unwrap();
        assert_eq!(s.get_item("k").unwrap().as_deref(), Some("v"));
        s.remove_item("k").unwrap();
        assert_eq!(s.get_item("k").unwrap(), None);
        s.remove_item("k").unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn clear_all_drops_everything() {
        let mut s = MemoryStorage::new().with_item("a", "1").with_item("b", "2");
        s.clear_all().unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn unavailable_storage_fails_every_call() {
        let mut s = MemoryStorage::new().with_item("k", "v");
        s.set_unavailable(true);
        assert!(s.get_item("k").is_err());
        assert!(s.set_item("k", "w").is_err());
        assert!(s.remove_item("k").is_err());
        assert!(s.clear_all().is_err());

        s.set_unavailable(false);
        assert_eq!(s.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
