//! Repository port for opponent model persistence.
//!
//! This module defines the trait boundary between the domain and
//! infrastructure layers for model storage and retrieval.

use std::path::Path;

use crate::{Result, model::OpponentModel};

/// Port for persisting and loading opponent models.
///
/// This trait abstracts the storage mechanism, allowing different
/// implementations (JSON file, in-memory, database, etc.) without coupling
/// the session logic to a specific format.
///
/// An absent model is not an error: `load` returns `Ok(None)` and the caller
/// starts from a fresh model. Save failures are surfaced as errors but are
/// never fatal to a session: the caller keeps playing with the in-memory
/// model and retries at the next natural write point.
pub trait ModelRepository {
    /// Load a model from persistent storage.
    ///
    /// Returns `Ok(None)` when nothing has been stored at `path` yet.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The storage exists but cannot be read
    /// - The stored data fails to parse or validate (`CorruptModel`)
    fn load(&self, path: &Path) -> Result<Option<OpponentModel>>;

    /// Save a model to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization fails.
    fn save(&self, model: &OpponentModel, path: &Path) -> Result<()>;
}
