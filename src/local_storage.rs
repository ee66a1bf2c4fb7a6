//! Local key-value storage backends.
//!
//! The log persists exactly one value: the serialized entry collection under
//! a fixed key. [`KeyValueStorage`] captures that string-to-string contract,
//! [`LmdbStorage`] implements it on disk and [`MemoryStorage`] keeps it in
//! process for tests and for hosts that persist on their own.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lmdb::{Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::{debug, info};

use crate::app_response::AppResponse;

/// Name of the LMDB sub-database holding the log's keys.
const STORAGE_DB: &str = "storage";

/// Upper bound on the environment size (10 MiB).
const MAP_SIZE: usize = 10 * 1024 * 1024;

pub trait KeyValueStorage {
    /// Returns the value stored under `key`, or `None` when the key is unset.
    fn get_item(&self, key: &str) -> Result<Option<String>, AppResponse>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), AppResponse>;
}

/// LMDB-backed storage living in a `{name}.lmdb` directory.
pub struct LmdbStorage {
    env: Environment,
    db: Database,
    path: PathBuf,
}

impl LmdbStorage {
    /// Opens (or creates) the environment at `{name}.lmdb`.
    ///
    /// # Errors
    ///
    /// Returns [`AppResponse::DatabaseError`] when the directory cannot be
    /// created or LMDB refuses to open the environment.
    pub fn init(name: &str) -> Result<Self, AppResponse> {
        let path = PathBuf::from(format!("{name}.lmdb"));
        std::fs::create_dir_all(&path)?;

        let env = Environment::new()
            .set_max_dbs(1)
            .set_map_size(MAP_SIZE)
            .open(&path)?;
        let db = env.create_db(Some(STORAGE_DB), DatabaseFlags::empty())?;

        info!("Opened LMDB storage at {}", path.display());
        Ok(Self { env, db, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes buffers to disk and releases the environment.
    pub fn close(self) -> Result<(), AppResponse> {
        self.env.sync(true)?;
        info!("Closed LMDB storage at {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStorage for LmdbStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppResponse> {
        let txn = self.env.begin_ro_txn()?;

        let value = match txn.get(self.db, &key) {
            Ok(bytes) => {
                let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    AppResponse::SerializationError(format!("Stored value for '{key}' is not UTF-8: {e}"))
                })?;
                Some(text)
            }
            Err(lmdb::Error::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        txn.abort();

        debug!("Read key '{}' (present: {})", key, value.is_some());
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), AppResponse> {
        let mut txn = self.env.begin_rw_txn()?;
        txn.put(self.db, &key, &value, WriteFlags::empty())?;
        txn.commit()?;

        debug!("Wrote {} bytes under key '{}'", value.len(), key);
        Ok(())
    }
}

/// In-process storage with no persistence beyond its own lifetime.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one raw value, as if a previous session wrote it.
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut items = HashMap::new();
        items.insert(key.to_string(), value.to_string());
        Self { items }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppResponse> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), AppResponse> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
