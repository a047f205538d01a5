//! Key-value persistence for the option list and settings
//!
//! Features:
//! - JSON values under fixed keys
//! - LocalStorage backend on web, in-memory backend elsewhere
//! - Every failure is logged and falls back to defaults; nothing here can
//!   stop the wheel from working

pub mod store;

pub use store::{KeyValueStore, MemoryStore, StorageError};

#[cfg(target_arch = "wasm32")]
pub use store::LocalStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::consts::OPTIONS_STORAGE_KEY;
use crate::wheel::OptionList;

/// Read and decode a JSON value. `Ok(None)` means the key is absent.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// Load the option list, falling back to the default seed list when the key
/// is missing or unreadable.
pub fn load_options(store: &dyn KeyValueStore) -> OptionList {
    match load_json::<Vec<String>>(store, OPTIONS_STORAGE_KEY) {
        Ok(Some(labels)) => {
            // Re-validate: the stored array may predate the uniqueness rules
            let options = OptionList::from_labels(&labels);
            if options.len() != labels.len() {
                log::warn!(
                    "Dropped {} invalid stored options",
                    labels.len() - options.len()
                );
            }
            log::info!("Loaded {} options", options.len());
            options
        }
        Ok(None) => {
            log::info!("No stored options, using defaults");
            OptionList::defaults()
        }
        Err(e) => {
            log::warn!("Could not read key \"{}\": {}", OPTIONS_STORAGE_KEY, e);
            OptionList::defaults()
        }
    }
}

/// Persist the option list. Returns whether the write succeeded.
pub fn save_options(store: &mut dyn KeyValueStore, options: &OptionList) -> bool {
    match save_json(store, OPTIONS_STORAGE_KEY, options) {
        Ok(()) => {
            log::debug!("Saved {} options", options.len());
            true
        }
        Err(e) => {
            log::warn!("Could not write key \"{}\": {}", OPTIONS_STORAGE_KEY, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose every operation fails, like blocked storage in private mode
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("quota exceeded".into()))
        }
        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_missing_key_gives_defaults() {
        let store = MemoryStore::default();
        assert_eq!(load_options(&store), OptionList::defaults());
    }

    #[test]
    fn test_corrupt_value_gives_defaults() {
        let mut store = MemoryStore::default();
        store.set(OPTIONS_STORAGE_KEY, "[\"Pizza\",").unwrap();
        assert_eq!(load_options(&store), OptionList::defaults());

        store.set(OPTIONS_STORAGE_KEY, r#"{"not":"a list"}"#).unwrap();
        assert_eq!(load_options(&store), OptionList::defaults());
    }

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::default();
        let options = OptionList::from_labels(["Ramen", "Pho"]);
        assert!(save_options(&mut store, &options));
        assert_eq!(store.get(OPTIONS_STORAGE_KEY).unwrap().as_deref(), Some(r#"["Ramen","Pho"]"#));
        assert_eq!(load_options(&store), options);
    }

    #[test]
    fn test_stored_empty_list_is_kept() {
        let mut store = MemoryStore::default();
        save_options(&mut store, &OptionList::new());
        assert!(load_options(&store).is_empty());
    }

    #[test]
    fn test_stored_duplicates_are_dropped() {
        let mut store = MemoryStore::default();
        store.set(OPTIONS_STORAGE_KEY, r#"["Tacos","tacos"," ","Sushi"]"#).unwrap();
        let options = load_options(&store);
        assert_eq!(options.as_slice(), ["Tacos", "Sushi"]);
    }

    #[test]
    fn test_broken_store_is_not_fatal() {
        let mut store = BrokenStore;
        assert_eq!(load_options(&store), OptionList::defaults());
        assert!(!save_options(&mut store, &OptionList::defaults()));
    }
}
