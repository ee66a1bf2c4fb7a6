//! The authoritative entry collection and its write-through persistence.
//!
//! [`EntryStore`] keeps the collection in memory and mirrors it to a
//! [`KeyValueStorage`] as one JSON array after every mutation. Storage is a
//! best-effort cache: a failed read falls back to the configured seed, a
//! failed write is logged and ignored, and neither ever reaches the caller.

use log::{debug, info, warn};
use serde_json::Value;
use uuid::Uuid;

use crate::app_response::AppResponse;
use crate::entry_form::EntryForm;
use crate::entry_model::Entry;
use crate::log_config::LogConfig;
use crate::local_storage::KeyValueStorage;
use crate::view_projection::{group_by_month, MonthGroup, TypeFilter};

pub struct EntryStore<S: KeyValueStorage> {
    storage: S,
    storage_key: String,
    entries: Vec<Entry>,
}

impl<S: KeyValueStorage> EntryStore<S> {
    /// Loads the persisted collection, or the seed when none is readable.
    ///
    /// This never fails: a missing key, an empty value, a storage error or
    /// a value that is not a JSON array all resolve to `config.seed`.
    /// Individual records that do not parse are skipped. Nothing is written.
    pub fn initialize(config: &LogConfig, storage: S) -> Self {
        let entries = match load_entries(&storage, &config.storage_key) {
            Some(entries) => {
                info!("Loaded {} entries from '{}'", entries.len(), config.storage_key);
                entries
            }
            None => {
                info!("Starting from {} seed entries", config.seed.len());
                config.seed.clone()
            }
        };

        Self {
            storage,
            storage_key: config.storage_key.clone(),
            entries,
        }
    }

    /// Current collection, most recently added first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Creates an entry from the form and prepends it.
    ///
    /// # Errors
    ///
    /// [`AppResponse::ValidationError`] when the form is rejected (blank
    /// title or invalid date); the collection is left untouched.
    pub fn add(&mut self, form: &EntryForm) -> Result<Entry, AppResponse> {
        let entry = form.to_entry(self.fresh_id()).map_err(|e| {
            debug!("Rejected entry submission: {e}");
            e
        })?;

        self.entries.insert(0, entry.clone());
        self.persist();
        info!("Logged {} '{}' on {}", entry.media_type, entry.title, entry.date_key());
        Ok(entry)
    }

    /// Removes the entry with `id`. Returns `false` (and writes nothing) if absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);

        if self.entries.len() == before {
            debug!("No entry with id '{id}' to remove");
            return false;
        }

        self.persist();
        info!("Removed entry '{id}'");
        true
    }

    /// Month/day grouping of the current collection.
    pub fn grouped(&self, filter: TypeFilter) -> Vec<MonthGroup> {
        group_by_month(&self.entries, filter)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get_by_id(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not serialize entries, keeping them in memory only: {e}");
                return;
            }
        };

        if let Err(e) = self.storage.set_item(&self.storage_key, &json) {
            warn!("Could not persist entries under '{}': {e}", self.storage_key);
        }
    }
}

fn load_entries<S: KeyValueStorage>(storage: &S, key: &str) -> Option<Vec<Entry>> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return None,
        Err(e) => {
            warn!("Could not read stored entries: {e}");
            return None;
        }
    };

    let records = match serde_json::from_str::<Vec<Value>>(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!("Stored entries under '{key}' are malformed, using seed: {e}");
            return None;
        }
    };

    // One unreadable record must not cost the rest of the history.
    let entries = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Entry>(record) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping stored record #{index} under '{key}': {e}");
                None
            }
        })
        .collect();

    Some(entries)
}
