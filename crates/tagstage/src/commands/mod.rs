//! # Command Layer
//!
//! Business operations that sit between the [`api`](crate::api) facade and
//! the staging engine and stores. Each command takes the collaborators it
//! needs as arguments and returns a [`CmdResult`].
//!
//! ## What Commands Do
//!
//! - Drive the [`StagingController`](crate::staging::StagingController) and
//!   forward its commit requests to the [`DurableStore`](crate::store::DurableStore)
//! - Turn outcomes into structured messages with levels
//! - Report commit failures as data, never as `Err`: a failed durable write
//!   does not undo the edit that caused it
//!
//! ## What Commands Do NOT Do
//!
//! - **Rendering**: views are returned, the facade hands them to the sink
//! - **I/O of their own**: stores do the reading and writing
//!
//! ## Command Modules
//!
//! - [`editing`]: Run edit events and the item-removed hook
//! - [`tags`]: Catalog CRUD
//! - [`view`]: Static views of items without running events

use crate::model::{ItemId, Tag};
use crate::staging::{Change, TagPickerView};
use crate::tags::TagEntry;
use serde::Serialize;

pub mod editing;
pub mod tags;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum CommitStatus {
    Committed,
    Failed(String),
}

/// What happened to a commit the staging engine requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitOutcome {
    pub item_id: ItemId,
    pub tags: Vec<Tag>,
    pub status: CommitStatus,
}

impl CommitOutcome {
    pub fn is_committed(&self) -> bool {
        self.status == CommitStatus::Committed
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Edit effect, for edit commands.
    pub change: Option<Change>,
    /// Views to render, in order.
    pub views: Vec<TagPickerView>,
    pub commit: Option<CommitOutcome>,
    /// Catalog entries, for listing commands.
    pub tags: Vec<TagEntry>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_views(mut self, views: Vec<TagPickerView>) -> Self {
        self.views = views;
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagEntry>) -> Self {
        self.tags = tags;
        self
    }
}
