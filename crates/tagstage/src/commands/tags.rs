//! Tag catalog commands.
//!
//! - `list_tags`: List catalog entries
//! - `create_tag`: Add a tag to the catalog
//! - `delete_tag`: Remove a tag from the catalog
//! - `rename_tag`: Rename a catalog tag in place
//! - `ensure_tag`: Create a tag unless it already exists
//!
//! Every mutation is persisted before it is applied to the in-memory catalog,
//! then delivered to the staging controller so each open session gets a fresh
//! available pool. None of these commands rewrite item tag sets: a deleted or
//! renamed tag stays assigned wherever it was until the user removes it.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StageError};
use crate::staging::StagingController;
use crate::store::DurableStore;
use crate::tags::{validate_tag_name, CatalogUpdate, TagCatalog};
use tracing::debug;

/// Catalog and collaborators a catalog command mutates.
pub struct CatalogCtx<'a, D: DurableStore> {
    pub catalog: &'a mut TagCatalog,
    pub durable: &'a mut D,
    pub controller: &'a mut StagingController,
    pub validate_names: bool,
}

impl<D: DurableStore> CatalogCtx<'_, D> {
    fn check_name(&self, name: &str) -> Result<()> {
        if self.validate_names {
            validate_tag_name(name).map_err(|e| StageError::InvalidTagName(e.to_string()))?;
        }
        Ok(())
    }

    /// Apply `mutate` to a copy, persist it, then swap it in and refresh sessions.
    fn commit_change<F>(&mut self, mutate: F) -> Result<CmdResult>
    where
        F: FnOnce(&mut TagCatalog) -> Result<CatalogUpdate>,
    {
        let mut next = self.catalog.clone();
        let update = mutate(&mut next)?;
        self.durable.save_catalog(next.entries())?;
        *self.catalog = next;

        debug!(?update, "catalog updated");
        let views = self.controller.catalog_changed(self.catalog, &update);
        Ok(CmdResult::default().with_views(views))
    }
}

pub fn list_tags(catalog: &TagCatalog) -> CmdResult {
    let mut result = CmdResult::default().with_tags(catalog.entries().to_vec());
    if catalog.is_empty() {
        result.add_message(CmdMessage::info("No tags defined"));
    } else {
        let count = catalog.len();
        result.add_message(CmdMessage::info(format!(
            "{} tag{} defined",
            count,
            if count == 1 { "" } else { "s" }
        )));
    }
    result
}

pub fn create_tag<D: DurableStore>(ctx: &mut CatalogCtx<'_, D>, name: &str) -> Result<CmdResult> {
    ctx.check_name(name)?;
    let mut result = ctx.commit_change(|catalog| catalog.create(name))?;
    result.add_message(CmdMessage::success(format!("Created tag '{}'", name)));
    Ok(result)
}

pub fn delete_tag<D: DurableStore>(ctx: &mut CatalogCtx<'_, D>, name: &str) -> Result<CmdResult> {
    let mut result = ctx.commit_change(|catalog| catalog.delete(name))?;
    result.add_message(CmdMessage::success(format!("Deleted tag '{}'", name)));
    Ok(result)
}

pub fn rename_tag<D: DurableStore>(
    ctx: &mut CatalogCtx<'_, D>,
    old_name: &str,
    new_name: &str,
) -> Result<CmdResult> {
    ctx.check_name(new_name)?;
    let mut result = ctx.commit_change(|catalog| catalog.rename(old_name, new_name))?;
    result.add_message(CmdMessage::success(format!(
        "Renamed tag '{}' to '{}'",
        old_name, new_name
    )));
    Ok(result)
}

/// Create `name` if missing. Idempotent; fails only on an invalid name.
pub fn ensure_tag<D: DurableStore>(ctx: &mut CatalogCtx<'_, D>, name: &str) -> Result<CmdResult> {
    ctx.check_name(name)?;
    if ctx.catalog.contains(name) {
        return Ok(CmdResult::default());
    }
    create_tag(ctx, name)
}
