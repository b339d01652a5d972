//! Tag support.
//!
//! Tags label media items. The set of tags known to the library lives in a
//! single [`TagCatalog`]; a tag must be in the catalog before the picker will
//! offer it or accept it for an item.
//!
//! ## Catalog Semantics
//!
//! - The catalog is ordered (creation order) and duplicate-free.
//! - Creating, deleting and renaming catalog entries produces a
//!   [`CatalogUpdate`], which the staging controller uses to refresh the
//!   available pool of every open edit session.
//! - Catalog changes never rewrite item tag sets. A tag deleted or renamed in
//!   the catalog stays assigned to the items that had it until the user
//!   removes it.
//!
//! ## Tag Naming Rules
//!
//! See [`validation`].

pub mod catalog;
pub mod validation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use catalog::{CatalogUpdate, TagCatalog};
pub use validation::{validate_tag_name, TagValidationError};

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl TagEntry {
    /// Creates a new entry stamped with the current time.
    ///
    /// Does not validate the name; see [`validate_tag_name`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}
