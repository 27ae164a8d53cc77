//! Item pool - the normalized snapshot the engine plays from.
//!
//! The `ItemPool` stores the items supplied by an [`ItemSource`] in the
//! source's order and provides fast lookup by [`ItemId`]. Cloning is O(1):
//! the items live in an `im::Vector` and the id index is shared behind an
//! `Arc`, so the engine can hand the same snapshot to every level.
//!
//! [`ItemSource`]: super::ItemSource

use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;

use super::item::{Item, ItemId};
use crate::error::EngineError;

/// Immutable, uniquely-keyed snapshot of the available items.
///
/// ## Example
///
/// ```
/// use sequence_engine::items::{Item, ItemId, ItemPool};
///
/// let pool = ItemPool::new(vec![
///     Item::new("a", "Alpha", "a.png"),
///     Item::new("b", "Beta", "b.png"),
/// ])
/// .unwrap();
///
/// assert_eq!(pool.len(), 2);
/// assert_eq!(pool.get(&ItemId::new("b")).unwrap().display_name, "Beta");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ItemPool {
    items: Vector<Item>,
    index: Arc<FxHashMap<ItemId, usize>>,
}

impl ItemPool {
    /// Build a pool from items in source order.
    ///
    /// Fails with [`EngineError::DuplicateItem`] if two items share an id.
    pub fn new(items: Vec<Item>) -> Result<Self, EngineError> {
        let mut index = FxHashMap::default();
        for (position, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), position).is_some() {
                return Err(EngineError::DuplicateItem(item.id.clone()));
            }
        }

        Ok(Self {
            items: items.into_iter().collect(),
            index: Arc::new(index),
        })
    }

    /// Get an item by ID.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.index.get(id).and_then(|&i| self.items.get(i))
    }

    /// Check if an item ID is in the pool.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of items in the pool (the `maxItems` ceiling).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// All ids in source order.
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }
}
