use super::DurableStore;
use crate::error::{Result, StageError};
use crate::model::{Item, ItemId, Tag};
use crate::tags::TagEntry;
use std::collections::HashMap;

/// In-memory durable store for testing.
///
/// Records every successful commit in order, and can be told to fail writes
/// to exercise the commit-failure path.
#[derive(Debug, Default)]
pub struct MemDurableStore {
    items: HashMap<ItemId, Item>,
    order: Vec<ItemId>,
    catalog: Vec<TagEntry>,
    commits: Vec<(ItemId, Vec<Tag>)>,
    simulate_write_error: bool,
}

impl MemDurableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Successful commits, oldest first.
    pub fn commits(&self) -> &[(ItemId, Vec<Tag>)] {
        &self.commits
    }

    /// Durable tags of an item, if it is stored.
    pub fn tags_of(&self, id: &ItemId) -> Option<&[Tag]> {
        self.items.get(id).map(|i| i.tags.as_slice())
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(StageError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl DurableStore for MemDurableStore {
    fn load_items(&self) -> Result<Vec<Item>> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.items.get(id).cloned())
            .collect())
    }

    fn save_item(&mut self, item: &Item) -> Result<()> {
        self.check_writable()?;
        if self.items.insert(item.id, item.clone()).is_none() {
            self.order.push(item.id);
        }
        Ok(())
    }

    fn delete_item(&mut self, id: &ItemId) -> Result<()> {
        self.check_writable()?;
        if self.items.remove(id).is_some() {
            self.order.retain(|o| o != id);
        }
        Ok(())
    }

    fn commit_tags(&mut self, id: &ItemId, tags: &[Tag]) -> Result<()> {
        self.check_writable()?;
        let item = self
            .items
            .get_mut(id)
            .ok_or(StageError::ItemNotFound(*id))?;
        item.tags = tags.to_vec();
        self.commits.push((*id, tags.to_vec()));
        Ok(())
    }

    fn load_catalog(&self) -> Result<Vec<TagEntry>> {
        Ok(self.catalog.clone())
    }

    fn save_catalog(&mut self, tags: &[TagEntry]) -> Result<()> {
        self.check_writable()?;
        self.catalog = tags.to_vec();
        Ok(())
    }
}
