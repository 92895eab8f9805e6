//! Bundled seed dataset used on first run and on reset.

use crate::model::id_alloc::IdAllocator;
use crate::model::item::ChecklistItem;
use crate::transfer::import::{parse_import, ImportError};

/// Raw JSON of the bundled seed items.
pub const DEFAULT_ITEMS_JSON: &str = include_str!("../assets/default_items.json");

/// Seed items, validated through the import coercion path.
pub fn default_items(ids: &mut IdAllocator) -> Result<Vec<ChecklistItem>, ImportError> {
    Ok(parse_import(DEFAULT_ITEMS_JSON, ids)?.items)
}

#[cfg(test)]
mod tests {
    use super::default_items;
    use crate::model::id_alloc::IdAllocator;
    use std::collections::HashSet;

    #[test]
    fn seed_dataset_is_valid_and_unique() {
        let items = default_items(&mut IdAllocator::new()).unwrap();
        assert!(!items.is_empty());
        let ids: HashSet<_> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), items.len());
        assert!(items.iter().all(|item| item.image_version == Some(1)));
    }
}
