//! Render collaborator.
//!
//! The library never draws anything. After each mutating event it hands a
//! [`TagPickerView`] to a [`RenderSink`], which decides whether the item is
//! on screen and how to show it.

use crate::model::ItemId;
use crate::staging::TagPickerView;
use std::collections::HashSet;

pub trait RenderSink {
    /// Whether `id` is currently on screen. Views for hidden items are dropped.
    fn is_visible(&self, _id: &ItemId) -> bool {
        true
    }

    fn render(&mut self, view: &TagPickerView);
}

/// Keeps every rendered view, optionally limited to a visible set.
#[derive(Debug, Default)]
pub struct RecordingSink {
    views: Vec<TagPickerView>,
    visible: Option<HashSet<ItemId>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the given items count as visible.
    pub fn with_visible(ids: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            views: Vec::new(),
            visible: Some(ids.into_iter().collect()),
        }
    }

    pub fn views(&self) -> &[TagPickerView] {
        &self.views
    }

    /// Most recent view rendered for `id`.
    pub fn last_for(&self, id: &ItemId) -> Option<&TagPickerView> {
        self.views.iter().rev().find(|v| v.item_id == *id)
    }

    pub fn clear(&mut self) {
        self.views.clear();
    }
}

impl RenderSink for RecordingSink {
    fn is_visible(&self, id: &ItemId) -> bool {
        self.visible.as_ref().map_or(true, |ids| ids.contains(id))
    }

    fn render(&mut self, view: &TagPickerView) {
        self.views.push(view.clone());
    }
}
