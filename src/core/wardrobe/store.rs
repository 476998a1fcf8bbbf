//! Wardrobe store - in-memory, append-only storage of classified items

use parking_lot::RwLock;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::item::{Category, ClothingItem};
use crate::core::color::ColorName;

/// One user's items, grouped by category in upload order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Wardrobe {
    categories: BTreeMap<Category, Vec<ClothingItem>>,
}

impl Wardrobe {
    /// Items of a category in insertion order; empty if none were added
    pub fn items(&self, category: Category) -> &[ClothingItem] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Categories holding at least one item
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ClothingItem])> + '_ {
        self.categories
            .iter()
            .map(|(category, items)| (*category, items.as_slice()))
    }

    pub fn total_items(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn items_per_category(&self) -> BTreeMap<Category, usize> {
        self.categories
            .iter()
            .map(|(category, items)| (*category, items.len()))
            .collect()
    }

    fn push(&mut self, item: ClothingItem) {
        self.categories.entry(item.category).or_default().push(item);
    }
}

/// Aggregate numbers across every wardrobe in the store
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreStats {
    pub total_users: usize,
    pub total_items: usize,
    pub color_distribution: BTreeMap<ColorName, usize>,
}

/// Process-wide wardrobe storage shared between request handlers.
///
/// Creating a user, creating a category and appending the item all happen
/// under one write guard, so concurrent uploads never lose an append and
/// readers never see a half-created entry.
#[derive(Debug, Default)]
pub struct WardrobeStore {
    wardrobes: RwLock<HashMap<String, Wardrobe>>,
}

impl WardrobeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to a user's wardrobe under the item's category
    pub fn add_item(&self, user_id: &str, item: ClothingItem) {
        debug!(
            "Adding '{}' ({} {}) for user {}",
            item.name,
            item.color,
            item.category.singular(),
            user_id
        );

        let mut wardrobes = self.wardrobes.write();
        wardrobes
            .entry(user_id.to_string())
            .or_default()
            .push(item);
    }

    /// Snapshot of a user's wardrobe, or `None` if the user never uploaded
    pub fn get_wardrobe(&self, user_id: &str) -> Option<Wardrobe> {
        self.wardrobes.read().get(user_id).cloned()
    }

    pub fn contains_user(&self, user_id: &str) -> bool {
        self.wardrobes.read().contains_key(user_id)
    }

    pub fn user_count(&self) -> usize {
        self.wardrobes.read().len()
    }

    pub fn stats(&self) -> StoreStats {
        let wardrobes = self.wardrobes.read();
        let mut stats = StoreStats {
            total_users: wardrobes.len(),
            ..StoreStats::default()
        };

        for wardrobe in wardrobes.values() {
            for (_, items) in wardrobe.iter() {
                stats.total_items += items.len();
                for item in items {
                    *stats.color_distribution.entry(item.color).or_insert(0) += 1;
                }
            }
        }

        stats
    }
}
