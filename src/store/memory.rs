//! In-memory persistence backend for tests and ephemeral runs

use super::{KeyValueBackend, StoreError};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Keeps all keys in a process-local map; nothing survives a restart.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        self.entries.write().insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let backend = MemoryBackend::new();

        backend.write("stations", b"[]").unwrap();
        assert_eq!(backend.read("stations").unwrap().unwrap(), b"[]");

        backend.delete("stations").unwrap();
        assert!(backend.read("stations").unwrap().is_none());
    }
}
