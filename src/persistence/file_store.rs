use std::{
    collections::BTreeMap,
    path::{
        Path,
        PathBuf,
    },
};

use super::{
    delete_data_file,
    get_data_file_path,
    load_json_or_default,
    save_json,
    KeyValueStore,
};
use crate::core::VokabelError;

pub const STORAGE_FILE: &str = "storage.json";

/// All keys live in one JSON document, rewritten on every write.
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileKeyValueStore {
    /// Opens the store in `dir`. A missing or corrupt file opens empty.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let entries = load_json_or_default(&dir, STORAGE_FILE);
        Self { dir, entries }
    }

    pub fn file_path(&self) -> PathBuf {
        get_data_file_path(&self.dir, STORAGE_FILE)
    }

    /// Removes the backing file. This is the "external reset" of all progress.
    pub fn destroy(dir: &Path) -> Result<bool, VokabelError> {
        delete_data_file(dir, STORAGE_FILE)
    }

    fn flush(&self) -> Result<(), VokabelError> {
        save_json(&self.dir, &self.entries, STORAGE_FILE)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), VokabelError> {
        let previous = self.entries.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), VokabelError> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.flush() {
            self.entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }
}
