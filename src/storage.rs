use std::collections::BTreeMap;
use std::fmt::Debug;
use std::path::PathBuf;

use crate::utils::error_chain_fmt;

/// Stand-in for the browser's `localStorage`: string keys, string values,
/// persisted as a single JSON object in one file. A missing file is an empty
/// store.
///
/// Nothing here is durable in any serious sense; every call re-reads (and
/// `set_item` rewrites) the whole file.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    path: PathBuf,
}

#[derive(thiserror::Error)]
pub enum StorageError {
    #[error("Could not access local storage")]
    Io(#[from] std::io::Error),
    #[error("Local storage is not a JSON object of strings")]
    Corrupt(#[from] serde_json::Error),
}

impl Debug for StorageError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl LocalStorage {
    pub fn new(path: PathBuf) -> Self { Self { path } }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read(&self.path) {
            Ok(raw) => Ok(serde_json::from_slice(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(
        &self,
        items: &BTreeMap<String, String>,
    ) -> Result<(), StorageError> {
        std::fs::write(&self.path, serde_json::to_vec(items)?)?;
        Ok(())
    }

    pub fn get_item(
        &self,
        key: &str,
    ) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    pub fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    pub fn remove_item(
        &self,
        key: &str,
    ) -> Result<(), StorageError> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}

/// The "N+ people on the waitlist" figure. Reads the cached list of emails
/// under `key` and never reports less than `floor`; it is a cosmetic lower
/// bound, not a live count (the real list lives with the form service).
#[derive(Clone, Debug)]
pub struct SubscriberCounter {
    storage: LocalStorage,
    key: String,
    floor: usize,
}

impl SubscriberCounter {
    pub fn new(
        storage: LocalStorage,
        key: String,
        floor: usize,
    ) -> Self {
        Self {
            storage,
            key,
            floor,
        }
    }

    fn stored_subscribers(&self) -> Result<Vec<String>, StorageError> {
        match self.storage.get_item(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// max(stored list length, floor). Unreadable storage counts as empty.
    pub fn count(&self) -> usize {
        let stored = match self.stored_subscribers() {
            Ok(list) => list.len(),
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "falling back to subscriber floor");
                0
            }
        };
        stored.max(self.floor)
    }

    /// Text for the counter nodes, e.g. `247+`
    pub fn display(&self) -> String { format!("{}+", self.count()) }
}
