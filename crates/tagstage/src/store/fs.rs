use super::DurableStore;
use crate::config::TagStageConfig;
use crate::error::{Result, StageError};
use crate::model::{Item, ItemId, Tag};
use crate::tags::TagEntry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const ITEMS_FILE: &str = "items.json";
const TAGS_FILE: &str = "tags.json";

/// Durable store backed by two JSON files in one directory.
///
/// Every write goes to a temp file in the same directory and is renamed into
/// place, so readers never see a half-written file.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &TagStageConfig) -> Result<Self> {
        Ok(Self::new(config.data_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(StageError::Io)?;
        }
        Ok(())
    }

    fn read_json<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T> {
        let path = self.root.join(file);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(path).map_err(StageError::Io)?;
        serde_json::from_str(&content).map_err(StageError::Serialization)
    }

    fn write_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(value).map_err(StageError::Serialization)?;

        let tmp_file = self.root.join(format!(".{}-{}.tmp", file, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(StageError::Io)?;
        fs::rename(&tmp_file, self.root.join(file)).map_err(StageError::Io)?;
        Ok(())
    }
}

impl DurableStore for JsonFileStore {
    fn load_items(&self) -> Result<Vec<Item>> {
        self.read_json(ITEMS_FILE)
    }

    fn save_item(&mut self, item: &Item) -> Result<()> {
        let mut items: Vec<Item> = self.read_json(ITEMS_FILE)?;
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        self.write_json(ITEMS_FILE, &items)
    }

    fn delete_item(&mut self, id: &ItemId) -> Result<()> {
        let mut items: Vec<Item> = self.read_json(ITEMS_FILE)?;
        let before = items.len();
        items.retain(|i| i.id != *id);
        if items.len() == before {
            return Ok(());
        }
        self.write_json(ITEMS_FILE, &items)
    }

    fn commit_tags(&mut self, id: &ItemId, tags: &[Tag]) -> Result<()> {
        let mut items: Vec<Item> = self.read_json(ITEMS_FILE)?;
        let item = items
            .iter_mut()
            .find(|i| i.id == *id)
            .ok_or(StageError::ItemNotFound(*id))?;
        item.tags = tags.to_vec();
        self.write_json(ITEMS_FILE, &items)
    }

    fn load_catalog(&self) -> Result<Vec<TagEntry>> {
        self.read_json(TAGS_FILE)
    }

    fn save_catalog(&mut self, tags: &[TagEntry]) -> Result<()> {
        self.write_json(TAGS_FILE, tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaKind;
    use crate::test_utils::TestEnv;

    #[test]
    fn test_missing_files_load_empty() {
        let env = TestEnv::new();
        assert!(env.store.load_items().unwrap().is_empty());
        assert!(env.store.load_catalog().unwrap().is_empty());
    }

    #[test]
    fn test_commit_tags_persists() {
        let mut env = TestEnv::new();
        let item = Item::new(MediaKind::Song, "Song").with_tags(["rock", "90s"]);
        env.store.save_item(&item).unwrap();

        env.store.commit_tags(&item.id, &["90s".to_string()]).unwrap();

        let reopened = JsonFileStore::new(env.root.clone());
        let items = reopened.load_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].tags, vec!["90s"]);
    }

    #[test]
    fn test_delete_item_rewrites_list() {
        let mut env = TestEnv::new();
        let keep = Item::new(MediaKind::Song, "Keep");
        let drop = Item::new(MediaKind::Video, "Drop");
        env.store.save_item(&keep).unwrap();
        env.store.save_item(&drop).unwrap();

        env.store.delete_item(&drop.id).unwrap();
        env.store.delete_item(&ItemId::new()).unwrap();

        let items = env.store.load_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, keep.id);
    }

    #[test]
    fn test_commit_unknown_item() {
        let mut env = TestEnv::new();
        let result = env.store.commit_tags(&ItemId::new(), &[]);
        assert!(matches!(result, Err(StageError::ItemNotFound(_))));
    }

    #[test]
    fn test_catalog_roundtrip_keeps_order() {
        let mut env = TestEnv::new();
        env.store
            .save_catalog(&[TagEntry::new("rock"), TagEntry::new("pop")])
            .unwrap();
        let names: Vec<String> = env
            .store
            .load_catalog()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["rock", "pop"]);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let mut env = TestEnv::new();
        env.store
            .save_item(&Item::new(MediaKind::Video, "Clip"))
            .unwrap();

        let leftovers: Vec<_> = fs::read_dir(&env.root)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
        assert!(env.root.join(ITEMS_FILE).exists());
    }

    #[test]
    fn test_from_config_uses_data_dir() {
        let env = TestEnv::new();
        let config = TagStageConfig {
            data_dir: Some(env.root.join("library")),
            ..Default::default()
        };
        let store = JsonFileStore::from_config(&config).unwrap();
        assert_eq!(store.root(), env.root.join("library"));
    }

    #[test]
    fn test_creates_missing_directory() {
        let env = TestEnv::new();
        let mut store = JsonFileStore::new(env.root.join("nested").join("library"));
        store.save_catalog(&[TagEntry::new("jazz")]).unwrap();
        assert!(store.root().join(TAGS_FILE).exists());
    }

    #[test]
    fn test_corrupt_file_is_serialization_error() {
        let env = TestEnv::new();
        fs::write(env.root.join(ITEMS_FILE), "not json").unwrap();
        assert!(matches!(
            env.store.load_items(),
            Err(StageError::Serialization(_))
        ));
    }
}
