//! Per-item edit session.
//!
//! A session owns a snapshot of the item's tags taken when editing starts
//! (`original_tags`) and an independent working copy (`current_tags`). The
//! working copy is never shared with the item store; the controller writes it
//! back only when a commit fires.
//!
//! The session decides *what* a mutation means (append, local revert,
//! destructive removal) and reports it; it never performs I/O.

use crate::model::{ItemId, Tag};
use crate::tags::TagCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closed,
}

/// Why a mutation was dropped without changing the working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// `add` with a tag the catalog does not know.
    InvalidTag,
    /// `add` with a tag already in the working copy.
    DuplicateAdd,
    /// `remove` with a tag not in the working copy.
    AbsentRemoval,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddResult {
    Added,
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveResult {
    /// The tag was added during this session; dropping it is purely local.
    Reverted,
    /// The tag was already persisted. The caller must commit this snapshot now.
    Destructive(Vec<Tag>),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone)]
pub struct EditSession {
    item_id: ItemId,
    original_tags: Vec<Tag>,
    current_tags: Vec<Tag>,
    state: SessionState,
}

impl EditSession {
    pub fn open(item_id: ItemId, tags: &[Tag]) -> Self {
        Self {
            item_id,
            original_tags: tags.to_vec(),
            current_tags: tags.to_vec(),
            state: SessionState::Open,
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn original_tags(&self) -> &[Tag] {
        &self.original_tags
    }

    pub fn current_tags(&self) -> &[Tag] {
        &self.current_tags
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn add(&mut self, tag: &str, catalog: &TagCatalog) -> AddResult {
        if !catalog.contains(tag) {
            return AddResult::Ignored(IgnoreReason::InvalidTag);
        }
        if self.current_tags.iter().any(|t| t == tag) {
            return AddResult::Ignored(IgnoreReason::DuplicateAdd);
        }
        self.current_tags.push(tag.to_string());
        AddResult::Added
    }

    /// Removes `tag` from the working copy and classifies it by provenance.
    ///
    /// Removing a tag that was part of the snapshot is destructive: the
    /// returned tag list must be committed immediately and a later
    /// [`cancel`](Self::cancel) will not bring it back in durable storage.
    pub fn remove(&mut self, tag: &str) -> RemoveResult {
        let Some(pos) = self.current_tags.iter().position(|t| t == tag) else {
            return RemoveResult::Ignored(IgnoreReason::AbsentRemoval);
        };
        self.current_tags.remove(pos);

        if self.original_tags.iter().any(|t| t == tag) {
            RemoveResult::Destructive(self.current_tags.clone())
        } else {
            RemoveResult::Reverted
        }
    }

    /// Closes the session and returns the tags to commit.
    pub fn apply(&mut self) -> Vec<Tag> {
        self.state = SessionState::Closed;
        self.current_tags.clone()
    }

    /// Closes the session, resetting the working copy to the snapshot.
    pub fn cancel(&mut self) -> &[Tag] {
        self.current_tags = self.original_tags.clone();
        self.state = SessionState::Closed;
        &self.current_tags
    }
}
