//! Name cache: remote resolutions kept in memory and mirrored to a durable store.
//!
//! The in-memory map is authoritative for the session. Every `put` also
//! merges the pair into whatever the store currently holds and writes the
//! whole map back. Concurrent writers are last-writer-wins; the cache is
//! best-effort and never size-bounded.
//!
//! The persisted map is read loosely: entries that are not a hex key with a
//! string name are skipped on load and carried through untouched on write.

use crate::color::HexColor;
use crate::error::SwatchError;
use crate::store::DurableStore;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

type PersistedMap = Map<String, Value>;

/// Hex-to-name cache for names obtained from the remote resolver.
pub struct NameCache {
    entries: RwLock<HashMap<HexColor, String>>,
    store: Mutex<Box<dyn DurableStore>>,
}

impl NameCache {
    /// Builds the cache from whatever `store` holds.
    ///
    /// A missing or unreadable store yields an empty cache, as does a store
    /// that is not a JSON object. Individual malformed entries are logged and
    /// skipped; loading never fails.
    pub fn load(store: impl DurableStore + 'static) -> Self {
        let entries = match read_persisted(&store) {
            Ok(map) => {
                let entries = valid_entries(&map);
                log::debug!("loaded {} cached names", entries.len());
                entries
            }
            Err(e) => {
                log::warn!("starting with an empty name cache: {e}");
                HashMap::new()
            }
        };
        Self {
            entries: RwLock::new(entries),
            store: Mutex::new(Box::new(store)),
        }
    }

    /// Looks up a cached name.
    pub fn get(&self, hex: &HexColor) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(hex)
            .cloned()
    }

    /// Records a name and merges it into the durable store.
    ///
    /// The in-memory entry is updated even when persisting fails; the
    /// persistence error is returned for the caller to report.
    pub fn put(&self, hex: HexColor, name: &str) -> Result<(), SwatchError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(hex, name.to_string());

        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        let mut persisted = match read_persisted(&**store) {
            Ok(map) => map,
            Err(e @ SwatchError::CacheCorrupt(_)) => {
                log::warn!("replacing persisted name cache: {e}");
                PersistedMap::new()
            }
            Err(e) => return Err(e),
        };
        persisted.insert(hex.to_string(), Value::String(name.to_string()));
        let json = serde_json::to_string(&persisted)
            .map_err(|e| SwatchError::CacheCorrupt(e.to_string()))?;
        store.write(&json)
    }

    /// Returns the number of cached names.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_persisted(store: &dyn DurableStore) -> Result<PersistedMap, SwatchError> {
    match store.read()? {
        Some(text) => {
            serde_json::from_str(&text).map_err(|e| SwatchError::CacheCorrupt(e.to_string()))
        }
        None => Ok(PersistedMap::new()),
    }
}

fn valid_entries(map: &PersistedMap) -> HashMap<HexColor, String> {
    let mut entries = HashMap::with_capacity(map.len());
    for (key, value) in map {
        match (HexColor::parse(key), value.as_str()) {
            (Ok(hex), Some(name)) => {
                entries.insert(hex, name.to_string());
            }
            _ => log::warn!("skipping malformed cache entry {key:?}: {value}"),
        }
    }
    entries
}
