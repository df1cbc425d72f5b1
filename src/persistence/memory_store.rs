use std::collections::HashMap;

use super::KeyValueStore;
use crate::core::VokabelError;

/// In-process store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), VokabelError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), VokabelError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Memory store whose writes to one key always fail.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingKeyValueStore {
    pub inner: MemoryKeyValueStore,
    failing_key: String,
}

#[cfg(test)]
impl FailingKeyValueStore {
    pub fn failing_on(key: &str) -> Self {
        Self { inner: MemoryKeyValueStore::new(), failing_key: key.to_string() }
    }
}

#[cfg(test)]
impl KeyValueStore for FailingKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), VokabelError> {
        if key == self.failing_key {
            return Err(VokabelError::Custom(format!("write to {} refused", key)));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), VokabelError> {
        self.inner.remove(key)
    }
}
