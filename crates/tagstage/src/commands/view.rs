use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::ItemId;
use crate::staging::StagingController;
use crate::store::ItemStore;
use crate::tags::TagCatalog;

/// The picker view of one item: its open session, or its stored tags.
pub fn run<S: ItemStore>(
    controller: &StagingController,
    store: &S,
    catalog: &TagCatalog,
    id: &ItemId,
) -> Result<CmdResult> {
    let view = controller.view(store, catalog, id)?;
    Ok(CmdResult::default().with_views(vec![view]))
}

/// Views of every item, in list order.
pub fn run_all<S: ItemStore>(
    controller: &StagingController,
    store: &S,
    catalog: &TagCatalog,
) -> Result<CmdResult> {
    let views = store
        .list_items()?
        .iter()
        .map(|item| controller.view(store, catalog, &item.id))
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_views(views))
}
