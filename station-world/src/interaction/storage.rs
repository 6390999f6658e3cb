use bevy::prelude::*;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("durable storage is unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Durable string key-value medium that survives across sessions.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile store used by tests and as the last-resort fallback.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    values: BTreeMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use super::{KeyValueStore, StorageError};
    use bevy::prelude::*;
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    /// Native store persisting every key in a single pretty-printed JSON object.
    #[derive(Debug)]
    pub struct FileStore {
        path: PathBuf,
        values: BTreeMap<String, String>,
    }

    impl FileStore {
        /// Open the store, starting empty when the file is missing or unreadable.
        pub fn open(path: impl AsRef<Path>) -> Self {
            let path = path.as_ref().to_path_buf();
            let values = match std::fs::read_to_string(&path) {
                Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                    warn!("Progress file {} is corrupt, starting fresh: {}", path.display(), e);
                    BTreeMap::new()
                }),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
                Err(e) => {
                    warn!("Progress file {} unreadable, starting fresh: {}", path.display(), e);
                    BTreeMap::new()
                }
            };
            Self { path, values }
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.values.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.values.insert(key.to_string(), value.to_string());
            let json = serde_json::to_string_pretty(&self.values)
                .map_err(|e| StorageError::Write(e.to_string()))?;
            std::fs::write(&self.path, json).map_err(|e| StorageError::Write(e.to_string()))
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod local_storage {
    use super::{KeyValueStore, StorageError};

    /// Browser `localStorage`. Holds no JS handles so it stays `Send + Sync`.
    #[derive(Debug, Default)]
    pub struct LocalStorageStore;

    fn window_local_storage() -> Result<web_sys::Storage, StorageError> {
        let win = web_sys::window().ok_or(StorageError::Unavailable)?;
        win.local_storage()
            .map_err(|e| StorageError::Read(format!("localStorage error: {:?}", e)))?
            .ok_or(StorageError::Unavailable)
    }

    impl KeyValueStore for LocalStorageStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            window_local_storage()?
                .get_item(key)
                .map_err(|e| StorageError::Read(format!("get_item({key}) failed: {:?}", e)))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            window_local_storage()?
                .set_item(key, value)
                .map_err(|e| StorageError::Write(format!("set_item({key}) failed: {:?}", e)))
        }
    }
}

/// Pick the durable medium for the current platform.
pub fn platform_store(progress_file: Option<&str>) -> Box<dyn KeyValueStore> {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = progress_file;
        info!("Persisting progress in browser localStorage");
        Box::new(LocalStorageStore)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let path = progress_file.unwrap_or(constants::storage_keys::DEFAULT_PROGRESS_FILE);
        info!("Persisting progress in {}", path);
        Box::new(FileStore::open(path))
    }
}
