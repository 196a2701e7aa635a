//! Device-local persistence of the active trip
//!
//! The device is associated with at most one trip at a time. The store is a
//! single slot: saving overwrites, removing clears, and an empty slot is a
//! normal state (first launch, or after the user removed the trip).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::config::Config;
use crate::error::{PersistenceError, Result};

/// Single-slot store for the trip this device is associated with
pub trait ActiveTripStore: Send + Sync {
    /// Persist `trip_id`, replacing any previous value
    fn save(&self, trip_id: &str) -> std::result::Result<(), PersistenceError>;

    /// Read the slot; `None` when no trip is associated with the device
    fn get(&self) -> std::result::Result<Option<String>, PersistenceError>;

    /// Clear the slot. Clearing an empty slot succeeds.
    fn remove(&self) -> std::result::Result<(), PersistenceError>;
}

/// On-disk layout of the slot
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ActiveTripFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trip_id: Option<String>,
}

/// Active trip store backed by a TOML file
///
/// Defaults to `~/.local/share/planner/active_trip.toml`.
#[derive(Debug, Clone)]
pub struct FileTripStore {
    path: PathBuf,
}

impl FileTripStore {
    /// Create a store at the location given by `config`
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_path(config.active_trip_path()?))
    }

    /// Create a store at a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ActiveTripStore for FileTripStore {
    fn save(&self, trip_id: &str) -> std::result::Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PersistenceError(format!("Failed to create directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(&ActiveTripFile {
            trip_id: Some(trip_id.to_string()),
        })
        .map_err(|e| PersistenceError(format!("Failed to serialize active trip: {}", e)))?;

        std::fs::write(&self.path, content)
            .map_err(|e| PersistenceError(format!("Failed to write active trip: {}", e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o644);
            std::fs::set_permissions(&self.path, permissions)
                .map_err(|e| PersistenceError(format!("Failed to set permissions: {}", e)))?;
        }

        tracing::debug!("Saved active trip {} to {}", trip_id, self.path.display());
        Ok(())
    }

    fn get(&self) -> std::result::Result<Option<String>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| PersistenceError(format!("Failed to read active trip: {}", e)))?;

        match toml::from_str::<ActiveTripFile>(&content) {
            Ok(file) => Ok(file.trip_id.filter(|id| !id.is_empty())),
            Err(e) => {
                tracing::warn!("Corrupted active trip file, treating as empty: {}", e);
                Ok(None)
            }
        }
    }

    fn remove(&self) -> std::result::Result<(), PersistenceError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed active trip file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError(format!(
                "Failed to remove active trip: {}",
                e
            ))),
        }
    }
}

/// In-process active trip store
#[derive(Debug, Default)]
pub struct MemoryTripStore {
    slot: RwLock<Option<String>>,
}

impl MemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `trip_id`
    pub fn with_trip(trip_id: &str) -> Self {
        Self {
            slot: RwLock::new(Some(trip_id.to_string())),
        }
    }
}

impl ActiveTripStore for MemoryTripStore {
    fn save(&self, trip_id: &str) -> std::result::Result<(), PersistenceError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| PersistenceError("Active trip slot poisoned".to_string()))?;
        *slot = Some(trip_id.to_string());
        Ok(())
    }

    fn get(&self) -> std::result::Result<Option<String>, PersistenceError> {
        let slot = self
            .slot
            .read()
            .map_err(|_| PersistenceError("Active trip slot poisoned".to_string()))?;
        Ok(slot.clone())
    }

    fn remove(&self) -> std::result::Result<(), PersistenceError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| PersistenceError("Active trip slot poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}

impl<T: ActiveTripStore + ?Sized> ActiveTripStore for std::sync::Arc<T> {
    fn save(&self, trip_id: &str) -> std::result::Result<(), PersistenceError> {
        (**self).save(trip_id)
    }

    fn get(&self) -> std::result::Result<Option<String>, PersistenceError> {
        (**self).get()
    }

    fn remove(&self) -> std::result::Result<(), PersistenceError> {
        (**self).remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTripStore::with_path(temp_dir.path().join("active_trip.toml"));

        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_save_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTripStore::with_path(temp_dir.path().join("active_trip.toml"));

        store.save("abc123").unwrap();
        assert_eq!(store.get().unwrap(), Some("abc123".to_string()));
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTripStore::with_path(temp_dir.path().join("active_trip.toml"));

        store.save("first").unwrap();
        store.save("second").unwrap();
        assert_eq!(store.get().unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_remove_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTripStore::with_path(temp_dir.path().join("active_trip.toml"));

        store.save("abc123").unwrap();
        store.remove().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTripStore::with_path(temp_dir.path().join("active_trip.toml"));

        store.remove().unwrap();
        store.remove().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("active_trip.toml");

        FileTripStore::with_path(path.clone()).save("abc123").unwrap();

        let reopened = FileTripStore::with_path(path);
        assert_eq!(reopened.get().unwrap(), Some("abc123".to_string()));
    }

    #[test]
    fn test_corrupted_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("active_trip.toml");
        std::fs::write(&path, "invalid toml {{{").unwrap();

        let store = FileTripStore::with_path(path);
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_unwritable_location_is_persistence_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let store = FileTripStore::with_path(blocker.join("active_trip.toml"));
        let err = store.save("abc123").unwrap_err();
        assert!(err.to_string().contains("Failed to create directory"));
    }

    #[test]
    #[cfg(unix)]
    fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("active_trip.toml");
        FileTripStore::with_path(path.clone()).save("abc123").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_memory_store_slot() {
        let store = MemoryTripStore::new();
        assert_eq!(store.get().unwrap(), None);

        store.save("abc123").unwrap();
        assert_eq!(store.get().unwrap(), Some("abc123".to_string()));

        store.remove().unwrap();
        store.remove().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }
}
