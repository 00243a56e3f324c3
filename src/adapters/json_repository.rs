//! JSON file implementation of the model repository.
//!
//! The opponent model is small and written rarely (once per concluded game),
//! so a pretty-printed JSON overwrite is sufficient. A file that exists but
//! fails to parse or validate is reported as `CorruptModel`; callers treat
//! that the same as an absent model.

use std::{fs::File, io::ErrorKind, path::Path};

use crate::{Result, error::Error, model::OpponentModel, ports::ModelRepository};

/// JSON-file-based model repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonModelRepository;

impl JsonModelRepository {
    /// Create a new JSON repository.
    pub fn new() -> Self {
        Self
    }
}

impl ModelRepository for JsonModelRepository {
    fn load(&self, path: &Path) -> Result<Option<OpponentModel>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::Io {
                    operation: format!("open model file {path:?}"),
                    source,
                });
            }
        };

        let model: OpponentModel =
            serde_json::from_reader(file).map_err(|e| Error::CorruptModel {
                reason: format!("failed to parse {path:?}: {e}"),
            })?;
        model.validate()?;

        Ok(Some(model))
    }

    fn save(&self, model: &OpponentModel, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create model file {path:?}"),
            source,
        })?;

        serde_json::to_writer_pretty(file, model)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;
    use crate::tictactoe::{GameOutcome, Player};

    #[test]
    fn test_json_roundtrip_preserves_model() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("model.json");

        let repo = JsonModelRepository::new();
        let mut model = OpponentModel::new();
        model.record_outcome(&[0, 4, 1, 8, 2], GameOutcome::Win(Player::X), Player::O);
        model.record_outcome(&[4, 0, 8, 2, 6], GameOutcome::Win(Player::O), Player::O);
        model.record_outcome(&[1, 4, 7, 0, 5], GameOutcome::Draw, Player::O);

        repo.save(&model, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded, Some(model));
    }

    #[test]
    fn test_load_absent_returns_none() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repo = JsonModelRepository::new();
        let result = repo.load(&temp_dir.path().join("missing.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_corrupt_file_returns_corrupt_model() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("model.json");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"{ not json").unwrap();

        let repo = JsonModelRepository::new();
        assert!(matches!(
            repo.load(&file_path),
            Err(Error::CorruptModel { .. })
        ));
    }

    #[test]
    fn test_load_version_mismatch_returns_corrupt_model() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("model.json");

        let repo = JsonModelRepository::new();
        let model = OpponentModel {
            schema_version: 999,
            ..OpponentModel::new()
        };
        // Bypass validation by writing directly
        let file = File::create(&file_path).unwrap();
        serde_json::to_writer(file, &model).unwrap();

        assert!(matches!(
            repo.load(&file_path),
            Err(Error::CorruptModel { .. })
        ));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = JsonModelRepository::new();
        let model = OpponentModel::new();
        let result = repo.save(&model, Path::new("/nonexistent_dir_12345/model.json"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
