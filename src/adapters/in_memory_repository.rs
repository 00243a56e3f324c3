//! In-memory model repository for testing.
//!
//! This adapter provides a pure in-memory implementation of
//! `ModelRepository`, enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{Result, error::Error, model::OpponentModel, ports::ModelRepository};

/// In-memory repository for testing.
///
/// Stores serialized models in a shared map. Clones share the same underlying
/// storage, so a test can keep a handle while a session owns another.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of models currently stored.
    pub fn count(&self) -> usize {
        self.storage.lock().unwrap().len()
    }

    /// Clear all stored models.
    pub fn clear(&self) {
        self.storage.lock().unwrap().clear();
    }

    /// Check if a model exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        let key = path.to_string_lossy().to_string();
        self.storage.lock().unwrap().contains_key(&key)
    }
}

impl ModelRepository for InMemoryRepository {
    fn load(&self, path: &Path) -> Result<Option<OpponentModel>> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage.lock().unwrap();

        let Some(bytes) = storage.get(&key) else {
            return Ok(None);
        };

        let model: OpponentModel =
            serde_json::from_slice(bytes).map_err(|e| Error::CorruptModel {
                reason: format!("failed to parse in-memory model at {path:?}: {e}"),
            })?;
        model.validate()?;

        Ok(Some(model))
    }

    fn save(&self, model: &OpponentModel, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();
        let bytes = serde_json::to_vec(model)?;
        self.storage.lock().unwrap().insert(key, bytes);
        Ok(())
    }
}
