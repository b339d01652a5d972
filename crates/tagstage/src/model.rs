//! # Domain Model
//!
//! The entities the staging engine works on: [`Item`] (a song or video owning an
//! ordered tag sequence) and its identity [`ItemId`].
//!
//! ## Tags
//!
//! A [`Tag`] is an opaque, case-sensitive string. Tags carry no metadata of
//! their own on an item; the catalog (see [`crate::tags`]) tracks creation time.
//!
//! ## Item Tag Invariant
//!
//! `Item::tags` is ordered and duplicate-free. Order is assignment order, not
//! catalog order: the picker shows assigned tags in the order the user added
//! them. [`Item::with_tags`] enforces the invariant when building items from
//! untrusted input (loaded files, fixtures).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type Tag = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Song,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub kind: MediaKind,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Item {
    pub fn new(kind: MediaKind, title: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            kind,
            title: title.into(),
            tags: Vec::new(),
        }
    }

    /// Replaces the tag list, dropping repeats but keeping first-seen order.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Tag>,
    {
        self.tags = dedup_tags(tags.into_iter().map(Into::into));
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Collapses repeated tags, keeping the first occurrence.
pub fn dedup_tags(tags: impl IntoIterator<Item = Tag>) -> Vec<Tag> {
    let mut out: Vec<Tag> = Vec::new();
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_tags_removes_duplicates_in_order() {
        let item = Item::new(MediaKind::Song, "Creep").with_tags(["rock", "90s", "rock"]);
        assert_eq!(item.tags, vec!["rock", "90s"]);
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let item = Item::new(MediaKind::Video, "Clip").with_tags(["Rock", "rock"]);
        assert_eq!(item.tags.len(), 2);
        assert!(item.has_tag("Rock"));
        assert!(!item.has_tag("ROCK"));
    }

    #[test]
    fn test_item_serialization_defaults() {
        let id = ItemId::new();
        let json = format!(r#"{{"id":"{}","title":"Old"}}"#, id);
        let item: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(item.id, id);
        assert_eq!(item.kind, MediaKind::Song);
        assert!(item.tags.is_empty());
    }

    #[test]
    fn test_item_id_serializes_as_plain_uuid() {
        let id = ItemId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }
}
