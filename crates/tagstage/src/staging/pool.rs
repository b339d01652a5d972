//! Available-pool computation.
//!
//! The available pool is never stored. It is recomputed from the catalog and
//! an item's assigned tags every time a view is produced, so it cannot drift
//! out of sync with either.

use crate::model::Tag;
use crate::tags::TagCatalog;

/// Catalog tags not present in `assigned`, in catalog order.
///
/// Assigned tags that the catalog no longer knows are simply not matched;
/// they neither appear in the pool nor affect it.
pub fn available_pool(catalog: &TagCatalog, assigned: &[Tag]) -> Vec<Tag> {
    catalog
        .names()
        .filter(|name| !assigned.iter().any(|t| t.as_str() == *name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<Tag> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_excludes_assigned_in_catalog_order() {
        let catalog = TagCatalog::from_names(["rock", "pop", "jazz"]);
        assert_eq!(
            available_pool(&catalog, &tags(&["pop"])),
            tags(&["rock", "jazz"])
        );
    }

    #[test]
    fn test_order_follows_catalog_not_assignment() {
        let catalog = TagCatalog::from_names(["a", "b", "c", "d"]);
        assert_eq!(
            available_pool(&catalog, &tags(&["d", "b"])),
            tags(&["a", "c"])
        );
    }

    #[test]
    fn test_stale_assigned_tag_is_ignored() {
        let catalog = TagCatalog::from_names(["rock", "pop"]);
        assert_eq!(
            available_pool(&catalog, &tags(&["gone", "rock"])),
            tags(&["pop"])
        );
    }

    #[test]
    fn test_empty_cases() {
        let catalog = TagCatalog::from_names(["rock"]);
        assert_eq!(available_pool(&catalog, &[]), tags(&["rock"]));
        assert!(available_pool(&catalog, &tags(&["rock"])).is_empty());
        assert!(available_pool(&TagCatalog::new(), &tags(&["rock"])).is_empty());
    }
}
