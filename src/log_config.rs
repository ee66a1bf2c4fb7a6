//! Construction-time configuration for a log instance.
//!
//! Nothing in the crate reads process-wide constants: the database name, the
//! storage key and the seed collection are all carried by a [`LogConfig`] that
//! is handed to the store when it is built. Tests rely on this to run many
//! isolated logs side by side.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry_model::{Entry, MediaType};

pub const DEFAULT_DB_NAME: &str = "seen_read";
pub const DEFAULT_STORAGE_KEY: &str = "seen-read-entries";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Base name of the LMDB environment; data lives in `{db_name}.lmdb/`.
    pub db_name: String,

    /// Key the serialized entry array is stored under.
    pub storage_key: String,

    /// Collection used when nothing readable is stored yet.
    pub seed: Vec<Entry>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            db_name: DEFAULT_DB_NAME.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed: default_seed(),
        }
    }
}

impl LogConfig {
    pub fn with_db_name(db_name: impl Into<String>) -> Self {
        LogConfig {
            db_name: db_name.into(),
            ..LogConfig::default()
        }
    }

    /// Directory holding the LMDB environment for this log.
    pub fn lmdb_dir(&self) -> String {
        format!("{}.lmdb", self.db_name)
    }
}

/// The built-in starting collection.
pub fn default_seed() -> Vec<Entry> {
    match NaiveDate::from_ymd_opt(2026, 2, 13) {
        Some(date) => vec![Entry::new("seed-1", date, MediaType::Movie, "Is This Thing On?")],
        None => Vec::new(),
    }
}
