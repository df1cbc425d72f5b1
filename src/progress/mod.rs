use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{
    de::DeserializeOwned,
    Serialize,
};

use crate::{
    core::{
        date_key,
        ItemProgress,
        ItemState,
        VokabelError,
    },
    persistence::KeyValueStore,
};

pub mod stats;

pub use stats::StudyStats;

pub const CARD_PROGRESS_KEY: &str = "cardProgress";
pub const TOTAL_CARDS_SHOWN_KEY: &str = "totalCardsShown";
pub const DAILY_PROGRESS_KEY: &str = "dailyProgress";

pub type CardProgressMap = BTreeMap<String, ItemProgress>;
pub type DailyProgressMap = BTreeMap<String, i64>;

/// Typed view over the three persisted entries.
///
/// Every read goes back to the backend so state written by someone else
/// (a restore, a manual edit) is picked up on the next call. Reads fail
/// closed to empty values. Single-entry setters log a failed write and keep
/// going; `commit` reports it.
#[derive(Debug)]
pub struct ProgressStore<S> {
    backend: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    pub fn card_progress(&self) -> CardProgressMap {
        self.read_json(CARD_PROGRESS_KEY)
    }

    pub fn save_card_progress(&mut self, progress: &CardProgressMap) {
        self.write_json(CARD_PROGRESS_KEY, progress);
    }

    pub fn item_progress(&self, word: &str) -> Option<ItemProgress> {
        self.card_progress().get(word).copied()
    }

    pub fn item_state(&self, word: &str) -> ItemState {
        ItemState::from_entry(self.card_progress().get(word))
    }

    pub fn set_item_progress(&mut self, word: &str, progress: ItemProgress) {
        let mut all = self.card_progress();
        all.insert(word.to_string(), progress);
        self.save_card_progress(&all);
    }

    pub fn has_any_progress(&self) -> bool {
        !self.card_progress().is_empty()
    }

    pub fn total_shown(&self) -> i64 {
        let Some(raw) = self.backend.get(TOTAL_CARDS_SHOWN_KEY) else {
            return 0;
        };
        match raw.trim().parse::<i64>() {
            Ok(total) => total,
            Err(e) => {
                tracing::warn!("Ignoring unreadable {} value {:?}: {}", TOTAL_CARDS_SHOWN_KEY, raw, e);
                0
            }
        }
    }

    pub fn set_total_shown(&mut self, total: i64) {
        self.write(TOTAL_CARDS_SHOWN_KEY, total.to_string());
    }

    pub fn daily_progress(&self) -> DailyProgressMap {
        self.read_json(DAILY_PROGRESS_KEY)
    }

    pub fn daily_count(&self, date: NaiveDate) -> i64 {
        self.daily_progress().get(&date_key(date)).copied().unwrap_or(0)
    }

    pub fn set_daily_count(&mut self, date: NaiveDate, count: i64) {
        let mut daily = self.daily_progress();
        daily.insert(date_key(date), count);
        self.write_json(DAILY_PROGRESS_KEY, &daily);
    }

    /// Writes `entries` in order as one unit. When a write fails, the
    /// entries already written get their previous values back and the
    /// error is returned, so the store reads as before the call.
    pub fn commit(&mut self, entries: Vec<(&str, String)>) -> Result<(), VokabelError> {
        let mut written: Vec<(&str, Option<String>)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let previous = self.backend.get(key);
            if let Err(e) = self.backend.set(key, value) {
                tracing::warn!("Failed to persist {}: {}", key, e);
                self.restore(written);
                return Err(e);
            }
            written.push((key, previous));
        }
        Ok(())
    }

    fn restore(&mut self, written: Vec<(&str, Option<String>)>) {
        for (key, previous) in written.into_iter().rev() {
            let restored = match previous {
                Some(value) => self.backend.set(key, value),
                None => self.backend.remove(key),
            };
            if let Err(e) = restored {
                tracing::error!("Failed to restore {} after an aborted write: {}", key, e);
            }
        }
    }

    fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Some(raw) = self.backend.get(key) else {
            return T::default();
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Ignoring malformed {}: {}", key, e);
                T::default()
            }
        }
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.write(key, json),
            Err(e) => tracing::warn!("Failed to serialize {}: {}", key, e),
        }
    }

    fn write(&mut self, key: &str, value: String) {
        if let Err(e) = self.backend.set(key, value) {
            tracing::warn!("Failed to persist {}: {}", key, e);
        }
    }
}
