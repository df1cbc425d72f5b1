use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::VokabelError;

pub mod file_store;
pub mod memory_store;

pub use file_store::FileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;

const APP_NAME: &str = "vokabel";

/// Durable string-keyed storage, shaped like browser local storage.
///
/// Reads never fail: a missing or unreadable key is simply absent. Writes
/// report errors, and on error the previous value is kept.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<(), VokabelError>;

    fn remove(&mut self, key: &str) -> Result<(), VokabelError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), VokabelError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), VokabelError> {
        (**self).remove(key)
    }
}

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(dir: &Path, filename: &str) -> PathBuf {
    dir.join(filename)
}

pub fn save_json<T: Serialize>(dir: &Path, data: &T, filename: &str) -> Result<(), VokabelError> {
    let file_path = get_data_file_path(dir, filename);
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&file_path, json)?;
    tracing::debug!("Data saved to: {}", file_path.display());
    Ok(())
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(
    dir: &Path,
    filename: &str,
) -> Result<T, VokabelError> {
    let file_path = get_data_file_path(dir, filename);

    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(&file_path)?;
    let data: T = serde_json::from_str(&json)?;
    tracing::debug!("Data loaded from: {}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(dir: &Path, filename: &str) -> T {
    match load_json::<T>(dir, filename) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}

pub fn delete_data_file(dir: &Path, filename: &str) -> Result<bool, VokabelError> {
    let file_path = get_data_file_path(dir, filename);
    if file_path.exists() {
        fs::remove_file(&file_path)?;
        tracing::info!("Deleted: {}", file_path.display());
        return Ok(true);
    }
    Ok(false)
}

pub fn data_file_exists(dir: &Path, filename: &str) -> bool {
    get_data_file_path(dir, filename).exists()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_load_json_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let data: BTreeMap<String, i64> = load_json(dir.path(), "absent.json").unwrap();
        assert!(data.is_empty());
        assert!(!data_file_exists(dir.path(), "absent.json"));
    }

    #[test]
    fn test_save_then_load_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut data = BTreeMap::new();
        data.insert("Hund".to_string(), 3_i64);

        save_json(dir.path(), &data, "counts.json").unwrap();
        assert!(data_file_exists(dir.path(), "counts.json"));

        let loaded: BTreeMap<String, i64> = load_json(dir.path(), "counts.json").unwrap();
        assert_eq!(loaded, data);

        assert!(delete_data_file(dir.path(), "counts.json").unwrap());
        assert!(!delete_data_file(dir.path(), "counts.json").unwrap());
    }

    #[test]
    fn test_corrupt_json_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        assert!(load_json::<BTreeMap<String, i64>>(dir.path(), "broken.json").is_err());
        let data: BTreeMap<String, i64> = load_json_or_default(dir.path(), "broken.json");
        assert!(data.is_empty());
    }
}
