//! # Staging Engine
//!
//! The core of tagstage: per-item edit sessions for the two-list tag picker,
//! and the [`StagingController`] that enforces their protocol.
//!
//! ## Session Protocol
//!
//! ```text
//!             start_edit                apply / cancel
//!   Closed ───────────────▶ Open ───────────────────────▶ Closed
//!                          │  ▲
//!                          └──┘ add / remove
//! ```
//!
//! | Event | Working copy | Local item record | Commit |
//! |-------|--------------|-------------------|--------|
//! | `start_edit` (no session) | snapshot of item tags | - | no |
//! | `start_edit` (open) | unchanged | - | no |
//! | `add` | append | - | no |
//! | `remove` tag added this session | drop | - | no |
//! | `remove` snapshot tag | drop | working copy | **yes** |
//! | `apply` | - | working copy | **yes** |
//! | `cancel` | reset to snapshot | snapshot | no |
//!
//! Removing a tag that was in the snapshot is an immediate, irreversible
//! commit. A later `cancel` restores the tag locally but does not undo the
//! durable write; the two stay divergent until the next `apply`.
//!
//! ## Commands and Outcomes
//!
//! Every event is an [`EditCommand`]. [`StagingController::apply_edit`]
//! returns an [`EditOutcome`] describing what changed, the refreshed
//! [`TagPickerView`], and, when the event commits, a [`CommitRequest`]. The
//! controller never performs the durable write itself and never learns its
//! result.
//!
//! ## Exclusivity and Ordering
//!
//! At most one session exists per item. Every controller method takes
//! `&mut self`, so events run to completion one at a time, and a catalog
//! refresh covers all open sessions inside a single call.

pub mod pool;
pub mod session;
pub mod view;

use crate::error::{Result, StageError};
use crate::model::{ItemId, Tag};
use crate::store::ItemStore;
use crate::tags::{CatalogUpdate, TagCatalog};
use std::collections::BTreeMap;
use tracing::{debug, info};

pub use pool::available_pool;
pub use session::{AddResult, EditSession, IgnoreReason, RemoveResult, SessionState};
pub use view::TagPickerView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    StartEdit(ItemId),
    Add(ItemId, Tag),
    Remove(ItemId, Tag),
    Apply(ItemId),
    Cancel(ItemId),
}

impl EditCommand {
    pub fn item_id(&self) -> ItemId {
        match self {
            EditCommand::StartEdit(id)
            | EditCommand::Add(id, _)
            | EditCommand::Remove(id, _)
            | EditCommand::Apply(id)
            | EditCommand::Cancel(id) => *id,
        }
    }
}

/// What an event did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Started,
    /// `start_edit` on an item already being edited.
    AlreadyOpen,
    Added,
    Ignored(IgnoreReason),
    Reverted,
    AutoCommitted,
    Applied,
    Cancelled,
}

/// A durable write the caller must perform: persist `tags` for `item_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub item_id: ItemId,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub change: Change,
    pub view: TagPickerView,
    pub commit: Option<CommitRequest>,
}

impl EditOutcome {
    fn new(change: Change, view: TagPickerView) -> Self {
        Self {
            change,
            view,
            commit: None,
        }
    }

    fn with_commit(mut self, item_id: ItemId, tags: Vec<Tag>) -> Self {
        self.commit = Some(CommitRequest { item_id, tags });
        self
    }
}

#[derive(Debug, Default)]
pub struct StagingController {
    sessions: BTreeMap<ItemId, EditSession>,
}

impl StagingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self, id: &ItemId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn session(&self, id: &ItemId) -> Option<&EditSession> {
        self.sessions.get(id)
    }

    /// Items with an open session, in id order.
    pub fn open_sessions(&self) -> impl Iterator<Item = &ItemId> {
        self.sessions.keys()
    }

    /// Dispatch a single edit event.
    pub fn apply_edit<S: ItemStore>(
        &mut self,
        store: &mut S,
        catalog: &TagCatalog,
        command: EditCommand,
    ) -> Result<EditOutcome> {
        match command {
            EditCommand::StartEdit(id) => self.start_edit(store, catalog, id),
            EditCommand::Add(id, tag) => self.add(catalog, id, &tag),
            EditCommand::Remove(id, tag) => self.remove(store, catalog, id, &tag),
            EditCommand::Apply(id) => self.apply(store, catalog, id),
            EditCommand::Cancel(id) => self.cancel(store, catalog, id),
        }
    }

    /// Open a session for `id`. A second call while open never re-snapshots.
    pub fn start_edit<S: ItemStore>(
        &mut self,
        store: &S,
        catalog: &TagCatalog,
        id: ItemId,
    ) -> Result<EditOutcome> {
        if let Some(session) = self.sessions.get(&id) {
            debug!(item = %id, "edit session already open");
            return Ok(EditOutcome::new(
                Change::AlreadyOpen,
                session_view(session, catalog),
            ));
        }

        let item = store.get_item(&id)?;
        let session = EditSession::open(id, &item.tags);
        let view = session_view(&session, catalog);
        self.sessions.insert(id, session);
        debug!(item = %id, tags = ?item.tags, "edit session opened");

        Ok(EditOutcome::new(Change::Started, view))
    }

    pub fn add(&mut self, catalog: &TagCatalog, id: ItemId, tag: &str) -> Result<EditOutcome> {
        let session = self.open_session_mut(id)?;
        let change = match session.add(tag, catalog) {
            AddResult::Added => Change::Added,
            AddResult::Ignored(reason) => {
                debug!(item = %id, tag, ?reason, "add ignored");
                Change::Ignored(reason)
            }
        };
        Ok(EditOutcome::new(change, session_view(session, catalog)))
    }

    /// Remove `tag` from the working copy.
    ///
    /// When the tag was part of the snapshot the removal is committed at once:
    /// the local record is rewritten and the outcome carries a commit request.
    pub fn remove<S: ItemStore>(
        &mut self,
        store: &mut S,
        catalog: &TagCatalog,
        id: ItemId,
        tag: &str,
    ) -> Result<EditOutcome> {
        let session = self.open_session_mut(id)?;

        // Mutate a copy so a failed local write leaves the session untouched.
        let mut staged = session.clone();
        let outcome = match staged.remove(tag) {
            RemoveResult::Reverted => {
                EditOutcome::new(Change::Reverted, session_view(&staged, catalog))
            }
            RemoveResult::Destructive(tags) => {
                store.set_tags(&id, &tags)?;
                info!(item = %id, tag, remaining = ?tags, "persisted tag removed, committing");
                EditOutcome::new(Change::AutoCommitted, session_view(&staged, catalog))
                    .with_commit(id, tags)
            }
            RemoveResult::Ignored(reason) => {
                debug!(item = %id, tag, ?reason, "remove ignored");
                EditOutcome::new(Change::Ignored(reason), session_view(&staged, catalog))
            }
        };
        *session = staged;

        Ok(outcome)
    }

    /// Commit the working copy and close the session.
    pub fn apply<S: ItemStore>(
        &mut self,
        store: &mut S,
        catalog: &TagCatalog,
        id: ItemId,
    ) -> Result<EditOutcome> {
        let session = self.open_session_mut(id)?;
        store.set_tags(&id, session.current_tags())?;
        let tags = session.apply();
        self.sessions.remove(&id);
        info!(item = %id, tags = ?tags, "edit session applied");

        let view = TagPickerView::build(id, &tags, catalog, false);
        Ok(EditOutcome::new(Change::Applied, view).with_commit(id, tags))
    }

    /// Discard the working copy and close the session.
    ///
    /// The local record is reset to the snapshot. Commits already issued by a
    /// destructive `remove` in this session are not undone.
    pub fn cancel<S: ItemStore>(
        &mut self,
        store: &mut S,
        catalog: &TagCatalog,
        id: ItemId,
    ) -> Result<EditOutcome> {
        let session = self.open_session_mut(id)?;
        store.set_tags(&id, session.original_tags())?;
        let view = TagPickerView::build(id, session.cancel(), catalog, false);
        self.sessions.remove(&id);
        debug!(item = %id, "edit session cancelled");

        Ok(EditOutcome::new(Change::Cancelled, view))
    }

    /// Recompute the pool of every open session after a catalog change.
    ///
    /// Assigned tags are left alone even when the catalog no longer has them.
    pub fn catalog_changed(
        &mut self,
        catalog: &TagCatalog,
        update: &CatalogUpdate,
    ) -> Vec<TagPickerView> {
        debug!(?update, open = self.sessions.len(), "refreshing open sessions");
        self.sessions
            .values()
            .map(|session| session_view(session, catalog))
            .collect()
    }

    /// Drop the session of an item that no longer exists, without committing.
    ///
    /// Returns whether a session was open.
    pub fn item_removed(&mut self, id: &ItemId) -> bool {
        let had_session = self.sessions.remove(id).is_some();
        if had_session {
            debug!(item = %id, "item removed, edit session discarded");
        }
        had_session
    }

    /// The current view of an item: its session if one is open, otherwise its
    /// stored tags.
    pub fn view<S: ItemStore>(
        &self,
        store: &S,
        catalog: &TagCatalog,
        id: &ItemId,
    ) -> Result<TagPickerView> {
        if let Some(session) = self.sessions.get(id) {
            return Ok(session_view(session, catalog));
        }
        let item = store.get_item(id)?;
        Ok(TagPickerView::build(*id, &item.tags, catalog, false))
    }

    fn open_session_mut(&mut self, id: ItemId) -> Result<&mut EditSession> {
        self.sessions
            .get_mut(&id)
            .filter(|s| s.is_open())
            .ok_or(StageError::NoOpenSession(id))
    }
}

fn session_view(session: &EditSession, catalog: &TagCatalog) -> TagPickerView {
    TagPickerView::build(
        session.item_id(),
        session.current_tags(),
        catalog,
        session.is_open(),
    )
}
