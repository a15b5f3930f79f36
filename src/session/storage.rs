//! Key-value storage port for persisted statistics.
//!
//! The engine treats the store as an opaque blob map. Hosts plug in their
//! own backend (browser local storage, a file, a database row);
//! `MemoryStore` is the in-process implementation used by default and in
//! tests.

use rustc_hash::FxHashMap;

use super::error::StoreError;

/// Opaque key-value blob store.
pub trait KeyValueStore {
    /// Read a blob. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write (overwrite) a blob.
    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}

/// In-memory store.
///
/// `fail_writes` makes every `set` fail, for exercising best-effort paths.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, Vec<u8>>,
    fail_writes: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            entries: FxHashMap::default(),
            fail_writes: true,
        }
    }

    /// Insert a raw blob directly (fixture setup).
    pub fn insert(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.entries.insert(key.into(), value);
    }

    /// Raw blob for a key.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::new(format!("write rejected for {key}")));
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", vec![1, 2, 3]).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(vec![1, 2, 3]));

        store.set("k", vec![4]).unwrap();
        assert_eq!(store.raw("k"), Some(&[4u8][..]));
    }

    #[test]
    fn test_failing_store() {
        let mut store = MemoryStore::failing();
        assert!(store.set("k", vec![1]).is_err());
        assert_eq!(store.get("k").unwrap(), None);
    }
}
