//! Edit event execution.
//!
//! - `run`: dispatch one [`EditCommand`], performing any commit it requests
//! - `remove_item`: the item-removed lifecycle hook

use crate::commands::{CmdMessage, CmdResult, CommitOutcome, CommitStatus};
use crate::error::{Result, StageError};
use crate::model::ItemId;
use crate::staging::{Change, CommitRequest, EditCommand, StagingController};
use crate::store::{DurableStore, ItemStore};
use crate::tags::TagCatalog;
use tracing::{debug, info, warn};

/// Run one edit event.
///
/// Ignored mutations (unknown tag, duplicate add, absent removal) produce
/// no message; `CmdResult::change` still reports them.
pub fn run<S: ItemStore, D: DurableStore>(
    controller: &mut StagingController,
    store: &mut S,
    catalog: &TagCatalog,
    durable: &mut D,
    command: EditCommand,
) -> Result<CmdResult> {
    let tag = match &command {
        EditCommand::Add(_, tag) | EditCommand::Remove(_, tag) => Some(tag.clone()),
        _ => None,
    };
    let outcome = controller.apply_edit(store, catalog, command)?;

    let mut result = CmdResult {
        change: Some(outcome.change),
        ..Default::default()
    };
    let tag = tag.unwrap_or_default();
    match outcome.change {
        Change::Started => result.add_message(CmdMessage::info("Editing tags")),
        Change::AlreadyOpen => result.add_message(CmdMessage::info("Already editing tags")),
        Change::Added => result.add_message(CmdMessage::success(format!("Added tag '{}'", tag))),
        Change::Reverted => {
            result.add_message(CmdMessage::success(format!("Removed tag '{}'", tag)))
        }
        Change::AutoCommitted => result.add_message(CmdMessage::success(format!(
            "Removed tag '{}' (saved immediately)",
            tag
        ))),
        Change::Applied => result.add_message(CmdMessage::success(format!(
            "Saved {} tag{}",
            outcome.view.assigned_tags.len(),
            if outcome.view.assigned_tags.len() == 1 { "" } else { "s" }
        ))),
        Change::Cancelled => {
            result.add_message(CmdMessage::info("Discarded unsaved tag changes"))
        }
        Change::Ignored(_) => {}
    }

    if let Some(request) = outcome.commit {
        let commit = perform_commit(durable, request);
        if let CommitStatus::Failed(reason) = &commit.status {
            result.add_message(CmdMessage::error(format!(
                "Could not save tags: {}",
                reason
            )));
        }
        result.commit = Some(commit);
    }

    Ok(result.with_views(vec![outcome.view]))
}

/// Hand a commit to the durable store and report how it went.
///
/// Failure is not retried and the working copy is not rolled back.
fn perform_commit<D: DurableStore>(durable: &mut D, request: CommitRequest) -> CommitOutcome {
    let status = match durable.commit_tags(&request.item_id, &request.tags) {
        Ok(()) => {
            info!(item = %request.item_id, tags = ?request.tags, "tags committed");
            CommitStatus::Committed
        }
        Err(e) => {
            warn!(item = %request.item_id, error = %e, "tag commit failed");
            CommitStatus::Failed(e.to_string())
        }
    };
    CommitOutcome {
        item_id: request.item_id,
        tags: request.tags,
        status,
    }
}

/// An item disappeared: discard its session, then drop it from the local
/// and durable stores.
///
/// The session is closed first and unconditionally. Records that are already
/// gone count as removed. No commit is made and no view is produced.
pub fn remove_item<S: ItemStore, D: DurableStore>(
    controller: &mut StagingController,
    store: &mut S,
    durable: &mut D,
    id: ItemId,
) -> Result<CmdResult> {
    let had_session = controller.item_removed(&id);

    let removed = match store.remove_item(&id) {
        Ok(item) => Some(item),
        Err(StageError::ItemNotFound(_)) => None,
        Err(e) => return Err(e),
    };
    durable.delete_item(&id)?;

    let mut result = CmdResult::default();
    match removed {
        Some(item) => {
            result.add_message(CmdMessage::success(format!("Removed '{}'", item.title)))
        }
        None => debug!(item = %id, "item already gone from local store"),
    }
    if had_session {
        result.add_message(CmdMessage::info("Unsaved tag changes were discarded"));
    }
    Ok(result)
}
