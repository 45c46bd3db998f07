//! Ordered list of saved readings, persisted as one JSON array under a single key.

use crate::{
    error::{PersistenceError, StoreError},
    model::WeatherReading,
    storage::KeyValueStorage,
};

pub const ENTRIES_KEY: &str = "@weatherApp:weatherEntries";

/// In-memory entries plus their persisted copy.
///
/// Every successful [`append`](EntryStore::append) or [`remove`](EntryStore::remove)
/// leaves the two identical. A failed write leaves both unchanged.
#[derive(Debug)]
pub struct EntryStore<S> {
    storage: S,
    entries: Vec<WeatherReading>,
}

impl<S: KeyValueStorage> EntryStore<S> {
    /// Creates an empty store; call [`load`](EntryStore::load) to read persisted entries.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            entries: Vec::new(),
        }
    }

    /// Replaces the in-memory entries with the persisted ones.
    ///
    /// A missing key, an unreadable value or a corrupt blob all yield an empty list;
    /// the last two are logged.
    pub fn load(&mut self) -> &[WeatherReading] {
        self.entries = match self.read_persisted() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    key = ENTRIES_KEY,
                    "Error loading saved entries, starting empty"
                );
                Vec::new()
            }
        };

        tracing::debug!(count = self.entries.len(), "loaded saved entries");
        &self.entries
    }

    /// Strict variant of [`load`](EntryStore::load) that reports why nothing was loaded.
    pub fn read_persisted(&self) -> Result<Vec<WeatherReading>, PersistenceError> {
        match self.storage.get(ENTRIES_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(PersistenceError::Deserialize),
        }
    }

    pub fn append(&mut self, reading: WeatherReading) -> Result<&[WeatherReading], StoreError> {
        if self.get(&reading.id).is_some() {
            return Err(StoreError::DuplicateId(reading.id));
        }

        let mut updated = self.entries.clone();
        updated.push(reading);
        self.commit(updated)?;

        Ok(&self.entries)
    }

    /// Drops the entry with `id`. Unknown ids are a no-op and do not touch storage.
    pub fn remove(&mut self, id: &str) -> Result<&[WeatherReading], StoreError> {
        if self.get(id).is_none() {
            return Ok(&self.entries);
        }

        let updated: Vec<WeatherReading> = self
            .entries
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.commit(updated)?;

        Ok(&self.entries)
    }

    /// Deletes every entry, including the persisted key.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.storage.remove(ENTRIES_KEY)?;
        self.entries.clear();
        Ok(())
    }

    pub fn entries(&self) -> &[WeatherReading] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&WeatherReading> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn commit(&mut self, updated: Vec<WeatherReading>) -> Result<(), PersistenceError> {
        let blob = serde_json::to_string(&updated).map_err(PersistenceError::Serialize)?;
        self.storage.set(ENTRIES_KEY, &blob)?;
        self.entries = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{io, path::PathBuf};

    use super::*;
    use crate::{model::UnitSystem, storage::MemoryStorage};

    fn reading(id: &str, city: &str) -> WeatherReading {
        WeatherReading {
            id: id.to_string(),
            city: city.to_string(),
            temperature: 70,
            description: "clear sky".to_string(),
            units: UnitSystem::Imperial,
            humidity: None,
            pressure: None,
            wind_speed: None,
        }
    }

    fn ids(entries: &[WeatherReading]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    /// Reads succeed with whatever was seeded; every write fails.
    #[derive(Default)]
    struct ReadOnlyStorage {
        inner: MemoryStorage,
    }

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
            self.inner.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Io {
                path: PathBuf::from("readonly"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn remove(&self, key: &str) -> Result<(), PersistenceError> {
            self.set(key, "")
        }
    }

    #[test]
    fn load_without_key_is_empty() {
        let mut store = EntryStore::new(MemoryStorage::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn append_then_reload_preserves_fields() {
        let storage = MemoryStorage::new();
        let mut saved = reading("a", "Boston");
        saved.units = UnitSystem::Metric;
        saved.humidity = Some(81.0);
        saved.pressure = Some(1009.0);
        saved.wind_speed = Some(3.6);

        {
            let mut store = EntryStore::new(&storage);
            store.load();
            store.append(saved.clone()).unwrap();
        }

        let mut restarted = EntryStore::new(&storage);
        assert_eq!(restarted.load(), [saved]);
    }

    #[test]
    fn append_remove_keeps_order() {
        let storage = MemoryStorage::new();
        let mut store = EntryStore::new(&storage);
        store.load();

        store.append(reading("A", "Austin")).unwrap();
        store.append(reading("B", "Boston")).unwrap();
        store.append(reading("C", "Chicago")).unwrap();

        let mut reloaded = EntryStore::new(&storage);
        assert_eq!(ids(reloaded.load()), ["A", "B", "C"]);

        store.remove("B").unwrap();
        let mut reloaded = EntryStore::new(&storage);
        assert_eq!(ids(reloaded.load()), ["A", "C"]);
        assert_eq!(ids(store.entries()), ["A", "C"]);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut store = EntryStore::new(MemoryStorage::new());
        store.append(reading("A", "Austin")).unwrap();

        let entries = store.remove("missing").unwrap();
        assert_eq!(ids(entries), ["A"]);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut store = EntryStore::new(MemoryStorage::new());
        store.append(reading("A", "Austin")).unwrap();

        let err = store.append(reading("A", "Boston")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(id) if id == "A"));
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn corrupt_blob_degrades_to_empty() {
        let storage = MemoryStorage::new();
        storage.set(ENTRIES_KEY, "{not json").unwrap();

        let mut store = EntryStore::new(&storage);
        assert!(store.load().is_empty());
        assert!(matches!(
            store.read_persisted(),
            Err(PersistenceError::Deserialize(_))
        ));
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let storage = ReadOnlyStorage::default();
        let seeded = serde_json::to_string(&[reading("A", "Austin")]).unwrap();
        storage.inner.set(ENTRIES_KEY, &seeded).unwrap();

        let mut store = EntryStore::new(storage);
        store.load();

        let err = store.append(reading("B", "Boston")).unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
        assert_eq!(ids(store.entries()), ["A"]);

        assert!(store.remove("A").is_err());
        assert_eq!(ids(store.entries()), ["A"]);
        assert_eq!(store.read_persisted().unwrap().len(), 1);
    }

    #[test]
    fn clear_removes_persisted_key() {
        let storage = MemoryStorage::new();
        let mut store = EntryStore::new(&storage);
        store.append(reading("A", "Austin")).unwrap();

        store.clear().unwrap();
        assert!(store.entries().is_empty());
        assert_eq!(storage.get(ENTRIES_KEY).unwrap(), None);
    }
}
