//! # API Facade
//!
//! [`TagEditorApi`] is the single entry point for tag editing, whatever the UI.
//! It owns the collaborators (local item store, durable store, render sink, tag
//! catalog) and the [`StagingController`], dispatches to the command layer, and
//! pushes every resulting view to the sink.
//!
//! ## Event Ordering
//!
//! All mutating methods take `&mut self`, so events are processed one at a time
//! and each finishes (session update, local write, durable commit, render)
//! before the next starts. Catalog changes refresh every open session inside
//! the same call.
//!
//! ## Generic Over Collaborators
//!
//! - Production: `TagEditorApi<InMemoryItemStore, JsonFileStore, YourSink>`
//! - Testing: `TagEditorApi<InMemoryItemStore, MemDurableStore, RecordingSink>`

use crate::commands::tags::CatalogCtx;
use crate::commands::{self, CmdResult};
use crate::config::TagStageConfig;
use crate::error::Result;
use crate::model::{Item, ItemId};
use crate::render::RenderSink;
use crate::staging::{EditCommand, StagingController, TagPickerView};
use crate::store::memory::InMemoryItemStore;
use crate::store::{DurableStore, ItemStore};
use crate::tags::TagCatalog;

pub struct TagEditorApi<S: ItemStore, D: DurableStore, R: RenderSink> {
    store: S,
    durable: D,
    sink: R,
    catalog: TagCatalog,
    controller: StagingController,
    config: TagStageConfig,
}

impl<D: DurableStore, R: RenderSink> TagEditorApi<InMemoryItemStore, D, R> {
    /// Build the local item list and catalog from what `durable` holds.
    pub fn open(durable: D, sink: R, config: TagStageConfig) -> Result<Self> {
        let store = InMemoryItemStore::from_items(durable.load_items()?);
        let catalog = TagCatalog::from_entries(durable.load_catalog()?);
        Ok(Self::new(store, durable, catalog, sink, config))
    }
}

impl<S: ItemStore, D: DurableStore, R: RenderSink> TagEditorApi<S, D, R> {
    pub fn new(store: S, durable: D, catalog: TagCatalog, sink: R, config: TagStageConfig) -> Self {
        Self {
            store,
            durable,
            sink,
            catalog,
            controller: StagingController::new(),
            config,
        }
    }

    // --- Edit events ---

    pub fn execute(&mut self, command: EditCommand) -> Result<CmdResult> {
        let result = commands::editing::run(
            &mut self.controller,
            &mut self.store,
            &self.catalog,
            &mut self.durable,
            command,
        )?;
        self.emit(&result.views);
        Ok(result)
    }

    pub fn start_edit(&mut self, id: ItemId) -> Result<CmdResult> {
        self.execute(EditCommand::StartEdit(id))
    }

    pub fn add_tag(&mut self, id: ItemId, tag: &str) -> Result<CmdResult> {
        self.execute(EditCommand::Add(id, tag.to_string()))
    }

    pub fn remove_tag(&mut self, id: ItemId, tag: &str) -> Result<CmdResult> {
        self.execute(EditCommand::Remove(id, tag.to_string()))
    }

    pub fn apply(&mut self, id: ItemId) -> Result<CmdResult> {
        self.execute(EditCommand::Apply(id))
    }

    pub fn cancel(&mut self, id: ItemId) -> Result<CmdResult> {
        self.execute(EditCommand::Cancel(id))
    }

    // --- Item lifecycle ---

    /// Register a new item locally and durably.
    pub fn add_item(&mut self, item: Item) -> Result<ItemId> {
        let id = item.id;
        self.durable.save_item(&item)?;
        self.store.insert_item(item)?;
        Ok(id)
    }

    /// The item is gone: discard any open session, delete it locally and
    /// durably, render nothing for it.
    pub fn remove_item(&mut self, id: ItemId) -> Result<CmdResult> {
        commands::editing::remove_item(
            &mut self.controller,
            &mut self.store,
            &mut self.durable,
            id,
        )
    }

    // --- Catalog ---

    pub fn list_tags(&self) -> CmdResult {
        commands::tags::list_tags(&self.catalog)
    }

    pub fn create_tag(&mut self, name: &str) -> Result<CmdResult> {
        let result = commands::tags::create_tag(&mut self.catalog_ctx(), name)?;
        self.emit(&result.views);
        Ok(result)
    }

    pub fn delete_tag(&mut self, name: &str) -> Result<CmdResult> {
        let result = commands::tags::delete_tag(&mut self.catalog_ctx(), name)?;
        self.emit(&result.views);
        Ok(result)
    }

    pub fn rename_tag(&mut self, old_name: &str, new_name: &str) -> Result<CmdResult> {
        let result = commands::tags::rename_tag(&mut self.catalog_ctx(), old_name, new_name)?;
        self.emit(&result.views);
        Ok(result)
    }

    pub fn ensure_tag(&mut self, name: &str) -> Result<CmdResult> {
        let result = commands::tags::ensure_tag(&mut self.catalog_ctx(), name)?;
        self.emit(&result.views);
        Ok(result)
    }

    // --- Read-only views ---

    pub fn view_item(&self, id: &ItemId) -> Result<CmdResult> {
        commands::view::run(&self.controller, &self.store, &self.catalog, id)
    }

    pub fn view_all(&self) -> Result<CmdResult> {
        commands::view::run_all(&self.controller, &self.store, &self.catalog)
    }

    pub fn is_editing(&self, id: &ItemId) -> bool {
        self.controller.is_editing(id)
    }

    pub fn catalog(&self) -> &TagCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn durable(&self) -> &D {
        &self.durable
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut R {
        &mut self.sink
    }

    fn catalog_ctx(&mut self) -> CatalogCtx<'_, D> {
        CatalogCtx {
            catalog: &mut self.catalog,
            durable: &mut self.durable,
            controller: &mut self.controller,
            validate_names: self.config.validate_tag_names,
        }
    }

    fn emit(&mut self, views: &[TagPickerView]) {
        for view in views {
            if self.sink.is_visible(&view.item_id) {
                self.sink.render(view);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaKind;
    use crate::render::RecordingSink;
    use crate::store::mem_backend::MemDurableStore;
    use crate::tags::TagEntry;

    fn setup() -> (
        TagEditorApi<InMemoryItemStore, MemDurableStore, RecordingSink>,
        ItemId,
    ) {
        let mut durable = MemDurableStore::new();
        durable
            .save_catalog(&[TagEntry::new("rock"), TagEntry::new("pop")])
            .unwrap();
        let item = Item::new(MediaKind::Song, "Song").with_tags(["rock"]);
        let id = item.id;
        durable.save_item(&item).unwrap();
        let api = TagEditorApi::open(durable, RecordingSink::new(), TagStageConfig::default())
            .unwrap();
        (api, id)
    }

    #[test]
    fn test_open_loads_items_and_catalog() {
        let (api, id) = setup();
        assert_eq!(api.catalog().len(), 2);
        assert_eq!(api.store().get_item(&id).unwrap().tags, vec!["rock"]);
    }

    #[test]
    fn test_every_edit_event_renders() {
        let (mut api, id) = setup();
        api.start_edit(id).unwrap();
        api.add_tag(id, "pop").unwrap();
        api.add_tag(id, "pop").unwrap();
        api.apply(id).unwrap();

        assert_eq!(api.sink().views().len(), 4);
        let last = api.sink().last_for(&id).unwrap();
        assert!(!last.session_open);
        assert_eq!(last.assigned_tags, vec!["rock", "pop"]);
    }

    #[test]
    fn test_view_does_not_render() {
        let (api, id) = setup();
        let result = api.view_item(&id).unwrap();
        assert_eq!(result.views[0].available_tags, vec!["pop"]);
        assert!(api.sink().views().is_empty());
    }

    #[test]
    fn test_hidden_items_are_not_rendered() {
        let mut durable = MemDurableStore::new();
        let item = Item::new(MediaKind::Video, "Offscreen");
        let id = item.id;
        durable.save_item(&item).unwrap();
        let sink = RecordingSink::with_visible(std::iter::empty());
        let mut api = TagEditorApi::open(durable, sink, TagStageConfig::default()).unwrap();

        api.start_edit(id).unwrap();

        assert!(api.sink().views().is_empty());
        assert!(api.is_editing(&id));
    }

    #[test]
    fn test_add_item_registers_in_both_stores() {
        let (mut api, _) = setup();
        let id = api
            .add_item(Item::new(MediaKind::Video, "New").with_tags(["pop"]))
            .unwrap();
        assert!(api.store().get_item(&id).is_ok());
        assert_eq!(api.durable().tags_of(&id).unwrap(), ["pop".to_string()]);
    }

    #[test]
    fn test_config_controls_name_validation() {
        let durable = MemDurableStore::new();
        let config = TagStageConfig {
            validate_tag_names: false,
            ..Default::default()
        };
        let mut api = TagEditorApi::open(durable, RecordingSink::new(), config).unwrap();
        api.create_tag(" loose ").unwrap();
        assert!(api.catalog().contains(" loose "));
    }
}
