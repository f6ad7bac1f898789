use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::{Result, RigviewError};

/// Persistent blob store backing viewer settings and cached assets.
///
/// Keys are opaque strings; values are raw bytes. Implementations are shared
/// with loaders running outside the frame loop, hence `Send + Sync`.
pub trait AssetStore: Send + Sync {
    /// Returns the blob stored under `key`, or [`RigviewError::AssetNotFound`].
    fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Stores `bytes` under `key`, replacing any previous value.
    fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Removes `key`. Returns whether it existed.
    fn delete(&self, key: &str) -> Result<bool>;

    /// All keys, sorted.
    fn list(&self) -> Result<Vec<String>>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|k| k == key))
    }
}

/// In-memory [`AssetStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<FxHashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl AssetStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let guard = self.inner.read();
        guard
            .get(key)
            .cloned()
            .ok_or_else(|| RigviewError::AssetNotFound(key.to_string()))
    }

    fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        if key.is_empty() {
            return Err(RigviewError::Storage("empty key".to_string()));
        }
        self.inner.write().insert(key.to_string(), bytes);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.inner.write().remove(key).is_some())
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.inner.read().keys().cloned().collect();
        keys.sort_unstable();
        Ok(keys)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.inner.read().contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_key() {
        let store = MemoryStore::new();
        assert!(matches!(store.put("", vec![1]), Err(RigviewError::Storage(_))));
        assert!(store.is_empty());
    }
}
