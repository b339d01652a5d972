use crate::model::{ItemId, Tag};
use crate::tags::TagCatalog;
use serde::Serialize;

use super::pool::available_pool;

/// Render model for one item's two-list tag picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagPickerView {
    pub item_id: ItemId,
    pub assigned_tags: Vec<Tag>,
    pub available_tags: Vec<Tag>,
    pub session_open: bool,
}

impl TagPickerView {
    pub fn build(
        item_id: ItemId,
        assigned: &[Tag],
        catalog: &TagCatalog,
        session_open: bool,
    ) -> Self {
        Self {
            item_id,
            assigned_tags: assigned.to_vec(),
            available_tags: available_pool(catalog, assigned),
            session_open,
        }
    }
}
