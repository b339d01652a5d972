//! # Configuration
//!
//! Configuration is a [`confique`] struct, loaded in layers:
//! 1. **Environment variables**: `TAGSTAGE_DATA_DIR`, `TAGSTAGE_VALIDATE_TAG_NAMES`.
//! 2. **Config file**: a TOML file passed to [`TagStageConfig::load`].
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir (via `directories`) | Where `JsonFileStore` keeps its files |
//! | `validate_tag_names` | `true` | Enforce tag naming rules when creating or renaming catalog tags |

use crate::error::{Result, StageError};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TagStageConfig {
    /// Directory for `items.json` and `tags.json`.
    #[config(env = "TAGSTAGE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Reject catalog tag names that break the naming rules.
    #[config(env = "TAGSTAGE_VALIDATE_TAG_NAMES", default = true)]
    pub validate_tag_names: bool,
}

impl Default for TagStageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            validate_tag_names: true,
        }
    }
}

impl TagStageConfig {
    /// Load from the environment, then `file` if given, then defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| StageError::Config(e.to_string()))
    }

    /// The configured data directory, falling back to the platform data dir.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        directories::ProjectDirs::from("", "", "tagstage")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| StageError::Config("could not determine a data directory".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TagStageConfig::default();
        assert!(config.validate_tag_names);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = TagStageConfig {
            data_dir: Some(PathBuf::from("/srv/media")),
            ..Default::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/srv/media"));
    }

    #[test]
    fn test_parse_toml() {
        let config: TagStageConfig = toml::from_str(
            r#"
            data_dir = "/tmp/library"
            validate_tag_names = false
            "#,
        )
        .unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/library")));
        assert!(!config.validate_tag_names);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagstage.toml");
        std::fs::write(&path, "validate_tag_names = false\n").unwrap();

        let config = TagStageConfig::load(Some(&path)).unwrap();

        assert!(!config.validate_tag_names);
    }

    // Env values agree with `test_load_from_file`, which may run concurrently.
    #[test]
    fn test_load_from_env() {
        std::env::set_var("TAGSTAGE_DATA_DIR", "/srv/tagstage-env");
        std::env::set_var("TAGSTAGE_VALIDATE_TAG_NAMES", "false");

        let config = TagStageConfig::load(None);

        std::env::remove_var("TAGSTAGE_DATA_DIR");
        std::env::remove_var("TAGSTAGE_VALIDATE_TAG_NAMES");

        let config = config.unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/tagstage-env")));
        assert!(!config.validate_tag_names);
    }
}
