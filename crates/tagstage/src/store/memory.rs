use super::ItemStore;
use crate::error::{Result, StageError};
use crate::model::{dedup_tags, Item, ItemId, Tag};

/// Local item records, kept in list order.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: Vec<Item>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        let mut store = Self::new();
        for item in items {
            store.upsert(item);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == *id)
    }

    fn upsert(&mut self, mut item: Item) {
        item.tags = dedup_tags(std::mem::take(&mut item.tags));
        match self.position(&item.id) {
            Some(idx) => self.items[idx] = item,
            None => self.items.push(item),
        }
    }
}

impl ItemStore for InMemoryItemStore {
    fn get_item(&self, id: &ItemId) -> Result<Item> {
        self.items
            .iter()
            .find(|i| i.id == *id)
            .cloned()
            .ok_or(StageError::ItemNotFound(*id))
    }

    fn list_items(&self) -> Result<Vec<Item>> {
        Ok(self.items.clone())
    }

    fn set_tags(&mut self, id: &ItemId, tags: &[Tag]) -> Result<()> {
        let idx = self.position(id).ok_or(StageError::ItemNotFound(*id))?;
        self.items[idx].tags = dedup_tags(tags.iter().cloned());
        Ok(())
    }

    fn insert_item(&mut self, item: Item) -> Result<()> {
        self.upsert(item);
        Ok(())
    }

    fn remove_item(&mut self, id: &ItemId) -> Result<Item> {
        let idx = self.position(id).ok_or(StageError::ItemNotFound(*id))?;
        Ok(self.items.remove(idx))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::MediaKind;
    use crate::tags::TagCatalog;

    pub struct StoreFixture {
        pub store: InMemoryItemStore,
        pub catalog: TagCatalog,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryItemStore::new(),
                catalog: TagCatalog::new(),
            }
        }

        pub fn with_catalog(mut self, names: &[&str]) -> Self {
            self.catalog = TagCatalog::from_names(names.iter().copied());
            self
        }

        pub fn with_song(mut self, title: &str, tags: &[&str]) -> Self {
            let item = Item::new(MediaKind::Song, title).with_tags(tags.iter().copied());
            self.store.upsert(item);
            self
        }

        pub fn with_video(mut self, title: &str, tags: &[&str]) -> Self {
            let item = Item::new(MediaKind::Video, title).with_tags(tags.iter().copied());
            self.store.upsert(item);
            self
        }

        /// Id of the first item with `title`.
        pub fn id_of(&self, title: &str) -> Option<ItemId> {
            self.store
                .items
                .iter()
                .find(|i| i.title == title)
                .map(|i| i.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;
    use crate::model::MediaKind;

    #[test]
    fn test_get_not_found() {
        let store = InMemoryItemStore::new();
        let id = ItemId::new();
        match store.get_item(&id) {
            Err(StageError::ItemNotFound(err_id)) => assert_eq!(err_id, id),
            _ => panic!("Expected ItemNotFound"),
        }
    }

    #[test]
    fn test_insert_preserves_list_order_and_replaces() {
        let mut store = InMemoryItemStore::new();
        let first = Item::new(MediaKind::Song, "First");
        let second = Item::new(MediaKind::Song, "Second");
        let first_id = first.id;
        store.insert_item(first).unwrap();
        store.insert_item(second).unwrap();

        let mut renamed = store.get_item(&first_id).unwrap();
        renamed.title = "First (remaster)".to_string();
        store.insert_item(renamed).unwrap();

        let titles: Vec<String> = store
            .list_items()
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["First (remaster)", "Second"]);
    }

    #[test]
    fn test_set_tags_dedups() {
        let fixture = StoreFixture::new().with_song("Song", &[]);
        let mut store = fixture.store;
        let id = store.list_items().unwrap()[0].id;

        store
            .set_tags(&id, &["a".to_string(), "b".to_string(), "a".to_string()])
            .unwrap();

        assert_eq!(store.get_item(&id).unwrap().tags, vec!["a", "b"]);
    }

    #[test]
    fn test_remove_item() {
        let fixture = StoreFixture::new()
            .with_song("Song", &["rock"])
            .with_video("Clip", &[]);
        let id = fixture.id_of("Song").unwrap();
        let mut store = fixture.store;

        let removed = store.remove_item(&id).unwrap();

        assert_eq!(removed.tags, vec!["rock"]);
        assert_eq!(store.len(), 1);
        assert!(matches!(
            store.remove_item(&id),
            Err(StageError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_fixture_builds_catalog_and_items() {
        let fixture = StoreFixture::default()
            .with_catalog(&["rock", "pop"])
            .with_song("Song", &["rock"])
            .with_video("Clip", &["pop", "pop"]);

        assert_eq!(fixture.catalog.len(), 2);
        let clip = fixture
            .store
            .get_item(&fixture.id_of("Clip").unwrap())
            .unwrap();
        assert_eq!(clip.kind, MediaKind::Video);
        assert_eq!(clip.tags, vec!["pop"]);
    }
}
