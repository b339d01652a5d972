//! # Storage Layer
//!
//! Two storage roles meet the staging engine:
//!
//! 1. **[`ItemStore`]**: the local item records the UI lists. The staging
//!    controller may rewrite an item's tags here, but only while it holds an
//!    open session for that item and only at commit points (or on cancel,
//!    to restore the snapshot).
//! 2. **[`DurableStore`]**: the persistence boundary. Commits are handed to it
//!    by the command layer; its success or failure is reported to the caller
//!    and never fed back into the controller.
//!
//! Because cancel restores the local record but cannot touch durable state, the
//! two can legitimately disagree after a session that removed a persisted tag
//! and was then cancelled. The next successful commit reconciles them.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryItemStore`]: the local record list.
//! - [`mem_backend::MemDurableStore`]: durable store for tests, with simulated
//!   write failures and a commit log.
//! - [`fs::JsonFileStore`]: JSON files on disk.
//!
//! ## Storage Layout (`JsonFileStore`)
//!
//! ```text
//! <data_dir>/
//! ├── items.json   # item records, in list order
//! └── tags.json    # catalog entries, in catalog order
//! ```

use crate::error::Result;
use crate::model::{Item, ItemId, Tag};
use crate::tags::TagEntry;

pub mod fs;
pub mod mem_backend;
pub mod memory;

/// Local item records.
pub trait ItemStore {
    fn get_item(&self, id: &ItemId) -> Result<Item>;

    /// All items, in list order.
    fn list_items(&self) -> Result<Vec<Item>>;

    /// Replace an item's tag list.
    fn set_tags(&mut self, id: &ItemId, tags: &[Tag]) -> Result<()>;

    /// Insert or replace an item.
    fn insert_item(&mut self, item: Item) -> Result<()>;

    fn remove_item(&mut self, id: &ItemId) -> Result<Item>;
}

/// The persistence boundary for item tags and the tag catalog.
pub trait DurableStore {
    fn load_items(&self) -> Result<Vec<Item>>;

    /// Insert or replace a full item record.
    fn save_item(&mut self, item: &Item) -> Result<()>;

    /// Drop an item record. Deleting an unknown item is not an error.
    fn delete_item(&mut self, id: &ItemId) -> Result<()>;

    /// Persist the tag list for an existing item.
    fn commit_tags(&mut self, id: &ItemId, tags: &[Tag]) -> Result<()>;

    fn load_catalog(&self) -> Result<Vec<TagEntry>>;

    fn save_catalog(&mut self, tags: &[TagEntry]) -> Result<()>;
}
