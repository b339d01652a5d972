use super::TagEntry;
use crate::error::{Result, StageError};
use crate::model::Tag;

/// Notification emitted for every catalog mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogUpdate {
    Created(Tag),
    Deleted(Tag),
    Renamed { from: Tag, to: Tag },
}

/// The ordered, duplicate-free set of all known tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCatalog {
    entries: Vec<TagEntry>,
}

impl TagCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from stored entries. Later duplicates are dropped.
    pub fn from_entries(entries: Vec<TagEntry>) -> Self {
        let mut catalog = Self::new();
        for entry in entries {
            if !catalog.contains(&entry.name) {
                catalog.entries.push(entry);
            }
        }
        catalog
    }

    pub fn from_names<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::from_entries(names.into_iter().map(TagEntry::new).collect())
    }

    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    /// Tag names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn create(&mut self, name: &str) -> Result<CatalogUpdate> {
        if self.contains(name) {
            return Err(StageError::TagExists(name.to_string()));
        }
        self.entries.push(TagEntry::new(name));
        Ok(CatalogUpdate::Created(name.to_string()))
    }

    pub fn delete(&mut self, name: &str) -> Result<CatalogUpdate> {
        let original_len = self.entries.len();
        self.entries.retain(|e| e.name != name);
        if self.entries.len() == original_len {
            return Err(StageError::TagNotFound(name.to_string()));
        }
        Ok(CatalogUpdate::Deleted(name.to_string()))
    }

    /// Renames an entry in place, keeping its catalog position and creation time.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<CatalogUpdate> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.name == from)
            .ok_or_else(|| StageError::TagNotFound(from.to_string()))?;

        if self.contains(to) {
            return Err(StageError::TagExists(to.to_string()));
        }

        self.entries[idx].name = to.to_string();
        Ok(CatalogUpdate::Renamed {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}
