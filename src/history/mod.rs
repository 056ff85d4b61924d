//! Search history storage
//!
//! Keeps the places a user committed from search, deduplicated by name, in
//! a blob handed to a [`HistoryStorage`] backend. By default the blob lives
//! in the XDG data directory (~/.local/share/pinpoint/history.json).

pub mod record;
pub mod storage;

use crate::error::{Error, Result};
use crate::place::Place;
use record::HistoryRecord;
use serde_json::Value;
use tracing::{debug, warn};

pub use storage::{FileStorage, HistoryStorage, MemoryStorage};

/// Ordered, name-deduplicated list of previously selected places
pub struct HistoryStore {
    storage: Box<dyn HistoryStorage>,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore").finish_non_exhaustive()
    }
}

impl HistoryStore {
    /// Create a store over the given backend
    pub fn new(storage: impl HistoryStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// Store backed by the default history file
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(FileStorage::new(FileStorage::default_path()?)))
    }

    /// Store with nothing persisted (in-memory only)
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Load all readable entries in storage order
    ///
    /// Records missing their coordinate or address are skipped. An
    /// unreadable blob yields an empty history.
    pub fn load(&self) -> Vec<Place> {
        let records = match self.raw_records() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Failed to read history");
                return Vec::new();
            }
        };

        records
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match HistoryRecord::from_value(value) {
                Ok(place) => Some(place),
                Err(e) => {
                    debug!(index, error = %e, "Dropping malformed history record");
                    None
                }
            })
            .collect()
    }

    /// Append a place unless an entry with the same name already exists
    ///
    /// Unnamed places are always appended. Returns whether anything was
    /// written. Nothing is written when the existing history cannot be
    /// read from storage.
    pub fn append(&mut self, place: &Place) -> Result<bool> {
        let mut records = self.raw_records()?;

        if let Some(name) = place.name() {
            let exists = records
                .iter()
                .filter_map(HistoryRecord::name_of)
                .any(|existing| existing == name);
            if exists {
                debug!(name, "Place already in history");
                return Ok(false);
            }
        }

        records.push(HistoryRecord::to_value(place)?);
        self.write(&records)?;
        debug!(title = %place.title(), "Added place to history");
        Ok(true)
    }

    /// Remove every entry
    pub fn clear(&mut self) -> Result<()> {
        self.write(&[])
    }

    /// Number of readable entries
    pub fn len(&self) -> usize {
        self.load().len()
    }

    /// Check if history has no readable entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw records as stored, including ones that do not parse
    ///
    /// Storage errors are returned. A blob that is not a list of records
    /// reads as empty and is replaced on the next write.
    fn raw_records(&self) -> Result<Vec<Value>> {
        let Some(bytes) = self.storage.load()? else {
            return Ok(Vec::new());
        };

        match serde_json::from_slice::<Vec<Value>>(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(error = %e, "History is not a list of records, ignoring it");
                Ok(Vec::new())
            }
        }
    }

    fn write(&mut self, records: &[Value]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|e| Error::History(format!("Failed to serialize history: {}", e)))?;
        self.storage.save(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::place::{address, AddressComponents, Placemark};
    use tempfile::TempDir;

    fn place(name: Option<&str>, lat: f64, lng: f64, street: &str) -> Place {
        let mut components = AddressComponents::new();
        components.insert(address::STREET, street);
        components.insert(address::CITY, "Springfield");
        let placemark = Placemark::new(Coordinates::new(lat, lng), components);
        Place::new(name.map(str::to_string), placemark)
    }

    fn create_test_history() -> (HistoryStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        (HistoryStore::new(FileStorage::new(path)), temp_dir)
    }

    #[test]
    fn test_empty_history() {
        let (history, _temp) = create_test_history();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn test_append_and_load_round_trip() {
        let (mut history, _temp) = create_test_history();
        let cafe = place(Some("Cafe"), 43.25, 76.95, "1 Main St");

        assert!(history.append(&cafe).unwrap());

        let loaded = history.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name(), Some("Cafe"));
        assert_eq!(loaded[0].coordinate(), cafe.coordinate());
        assert_eq!(loaded[0].address(), cafe.address());
    }

    #[test]
    fn test_round_trip_keeps_chosen_point() {
        let (mut history, _temp) = create_test_history();
        let tapped = Coordinates::new(1.0005, 2.0005);
        let placemark = place(None, 1.0, 2.0, "1 Main St").placemark().clone();
        let chosen = Place::at(None, tapped, placemark);

        history.append(&chosen).unwrap();

        let loaded = history.load();
        assert_eq!(loaded[0].coordinate(), tapped);
        assert_eq!(loaded[0].placemark().coordinate, Coordinates::new(1.0, 2.0));
    }

    #[test]
    fn test_duplicate_name_is_ignored() {
        let (mut history, _temp) = create_test_history();

        assert!(history.append(&place(Some("Cafe"), 1.0, 2.0, "1 Main St")).unwrap());
        assert!(!history.append(&place(Some("Cafe"), 3.0, 4.0, "9 Side St")).unwrap());

        let loaded = history.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].coordinate(), Coordinates::new(1.0, 2.0));
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        let (mut history, _temp) = create_test_history();

        history.append(&place(Some("Cafe"), 1.0, 2.0, "1 Main St")).unwrap();
        history.append(&place(Some("cafe"), 1.0, 2.0, "1 Main St")).unwrap();

        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_unnamed_places_are_never_deduplicated() {
        let (mut history, _temp) = create_test_history();
        let unnamed = place(None, 1.0, 2.0, "1 Main St");

        history.append(&unnamed).unwrap();
        history.append(&unnamed).unwrap();

        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_storage_order_is_preserved() {
        let (mut history, _temp) = create_test_history();

        history.append(&place(Some("First"), 1.0, 1.0, "1 A St")).unwrap();
        history.append(&place(Some("Second"), 2.0, 2.0, "2 B St")).unwrap();

        let names: Vec<_> = history
            .load()
            .iter()
            .map(|p| p.name().unwrap_or_default().to_string())
            .collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[test]
    fn test_malformed_records_are_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        std::fs::write(
            &path,
            r#"[
                {"Name": "No coordinates", "PlacemarkAddressDic": {"Street": "1 Main St"}},
                {"Name": "No address", "PlacemarkCoordinates": {"Latitude": 1.0, "Longitude": 2.0}},
                "not even an object",
                {"Name": "Good",
                 "PlacemarkAddressDic": {"Street": "1 Main St"},
                 "PlacemarkCoordinates": {"Latitude": 1.0, "Longitude": 2.0}}
            ]"#,
        )
        .unwrap();

        let history = HistoryStore::new(FileStorage::new(path));
        let loaded = history.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name(), Some("Good"));
    }

    #[test]
    fn test_malformed_records_survive_append() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        std::fs::write(&path, r#"[{"Name": "Broken"}]"#).unwrap();

        let mut history = HistoryStore::new(FileStorage::new(path));
        // Name of an unreadable record still blocks a duplicate
        assert!(!history.append(&place(Some("Broken"), 1.0, 2.0, "1 Main St")).unwrap());
        assert!(history.append(&place(Some("Fine"), 1.0, 2.0, "1 Main St")).unwrap());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_garbage_blob_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut history = HistoryStore::new(FileStorage::new(path));
        assert!(history.is_empty());

        history.append(&place(Some("Cafe"), 1.0, 2.0, "1 Main St")).unwrap();
        assert_eq!(history.len(), 1);
    }

    /// Storage that cannot be read and records every write
    #[derive(Default)]
    struct UnreadableStorage {
        saved: std::sync::Arc<std::sync::Mutex<Option<Vec<u8>>>>,
    }

    impl HistoryStorage for UnreadableStorage {
        fn load(&self) -> Result<Option<Vec<u8>>> {
            Err(Error::History("disk unavailable".to_string()))
        }

        fn save(&mut self, bytes: &[u8]) -> Result<()> {
            *self.saved.lock().unwrap() = Some(bytes.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_read_failure_never_overwrites_history() {
        let storage = UnreadableStorage::default();
        let saved = std::sync::Arc::clone(&storage.saved);
        let mut history = HistoryStore::new(storage);

        let err = history
            .append(&place(Some("New"), 1.0, 2.0, "1 Main St"))
            .unwrap_err();
        assert!(err.to_string().contains("disk unavailable"));
        assert!(saved.lock().unwrap().is_none());

        // Reading still degrades to an empty list
        assert!(history.load().is_empty());
    }

    #[test]
    fn test_clear_history() {
        let (mut history, _temp) = create_test_history();

        for i in 0..5 {
            let name = format!("Place {}", i);
            history.append(&place(Some(&name), 1.0, 2.0, "1 Main St")).unwrap();
        }

        assert_eq!(history.len(), 5);
        history.clear().unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_in_memory_store() {
        let mut history = HistoryStore::in_memory();
        history.append(&place(Some("Cafe"), 1.0, 2.0, "1 Main St")).unwrap();
        assert_eq!(history.len(), 1);
    }
}
