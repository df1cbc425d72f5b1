use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::VokabelError,
    persistence::{
        load_json,
        save_json,
    },
    quota::{
        QuotaTarget,
        DEFAULT_DAILY_TARGET,
        DEFAULT_SEGMENT_SIZE,
    },
};

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub daily_target: i64,
    pub segment_size: i64,
    pub catalog_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_target: DEFAULT_DAILY_TARGET,
            segment_size: DEFAULT_SEGMENT_SIZE,
            catalog_path: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// A missing file gives the defaults. An unreadable one is an error, the
    /// caller decides whether to fall back.
    pub fn load(dir: &Path) -> Result<Self, VokabelError> {
        load_json(dir, SETTINGS_FILE)
    }

    pub fn save(&self, dir: &Path) -> Result<(), VokabelError> {
        save_json(dir, self, SETTINGS_FILE)
    }

    pub fn quota_target(&self) -> Result<QuotaTarget, VokabelError> {
        QuotaTarget::new(self.daily_target, self.segment_size)
    }
}
