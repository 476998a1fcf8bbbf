//! Outfit suggestions built from a user's wardrobe and the compatibility rules

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::color::{ColorName, CompatibilityModel};
use crate::core::wardrobe::{Category, ClothingItem, WardrobeStore};

/// How many generic colors to offer when no wardrobe item matches
const GENERIC_SUGGESTIONS: usize = 3;

/// Accessory slots filled after the bottom, in this order
const ACCESSORY_SLOTS: [Category; 2] = [Category::Belts, Category::Shoes];

/// One line of advice for a newly added item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    /// The user has no wardrobe yet
    EmptyWardrobe,
    /// The item's color has no compatibility rule
    NoColorRule { color: ColorName },
    /// A wardrobe item whose color goes with the new item
    Match {
        name: String,
        color: ColorName,
        category: Category,
    },
    /// Generic advice used when nothing in the wardrobe matches
    TryPairing { color: ColorName },
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::EmptyWardrobe => {
                write!(f, "No wardrobe items found. Upload some clothes first!")
            }
            Suggestion::NoColorRule { color } => {
                write!(f, "No color matching rules found for {}", color)
            }
            Suggestion::Match {
                name,
                color,
                category,
            } => write!(f, "✓ {} ({} {})", name, color, category.singular()),
            Suggestion::TryPairing { color } => write!(f, "💡 Try pairing with {} items", color),
        }
    }
}

/// A best-effort complete outfit anchored on the user's first top
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Outfit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<ClothingItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<ClothingItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub belt: Option<ClothingItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoe: Option<ClothingItem>,
}

impl Outfit {
    /// Completeness score: the number of filled slots
    pub fn score(&self) -> usize {
        self.slots().count()
    }

    pub fn is_empty(&self) -> bool {
        self.score() == 0
    }

    /// Filled slots keyed by singular category name, in outfit order
    pub fn slots(&self) -> impl Iterator<Item = (&'static str, &ClothingItem)> + '_ {
        [
            (Category::Tops, &self.top),
            (Category::Bottoms, &self.bottom),
            (Category::Belts, &self.belt),
            (Category::Shoes, &self.shoe),
        ]
        .into_iter()
        .filter_map(|(category, item)| item.as_ref().map(|item| (category.singular(), item)))
    }

    fn slot_mut(&mut self, category: Category) -> Option<&mut Option<ClothingItem>> {
        match category {
            Category::Tops => Some(&mut self.top),
            Category::Bottoms => Some(&mut self.bottom),
            Category::Belts => Some(&mut self.belt),
            Category::Shoes => Some(&mut self.shoe),
            _ => None,
        }
    }
}

/// Produces outfit advice from a shared wardrobe store
#[derive(Debug, Clone)]
pub struct OutfitAdvisor {
    store: Arc<WardrobeStore>,
}

impl OutfitAdvisor {
    pub fn new(store: Arc<WardrobeStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<WardrobeStore> {
        &self.store
    }

    /// Suggest wardrobe items that go with an item of `category` and `color`.
    ///
    /// Items are listed category by category in rule order, and within a
    /// category in upload order. When nothing in the wardrobe matches, the
    /// first three compatible colors are offered as generic advice instead.
    pub fn suggest_for_item(
        &self,
        user_id: &str,
        category: Category,
        color: ColorName,
    ) -> Vec<Suggestion> {
        let wardrobe = match self.store.get_wardrobe(user_id) {
            Some(wardrobe) => wardrobe,
            None => return vec![Suggestion::EmptyWardrobe],
        };

        let compatible_colors = CompatibilityModel::compatible_with(color);
        if compatible_colors.is_empty() {
            debug!("No compatibility rule for {}", color);
            return vec![Suggestion::NoColorRule { color }];
        }

        let mut suggestions: Vec<Suggestion> = CompatibilityModel::compatible_categories(category)
            .iter()
            .flat_map(|other| wardrobe.items(*other))
            .filter(|item| compatible_colors.contains(&item.color))
            .map(|item| Suggestion::Match {
                name: item.name.clone(),
                color: item.color,
                category: item.category,
            })
            .collect();

        if suggestions.is_empty() {
            suggestions = compatible_colors
                .iter()
                .take(GENERIC_SUGGESTIONS)
                .map(|color| Suggestion::TryPairing { color: *color })
                .collect();
        }

        debug!(
            "{} suggestions for {} {} of user {}",
            suggestions.len(),
            color,
            category.singular(),
            user_id
        );
        suggestions
    }

    /// Assemble an outfit around the user's first uploaded top.
    ///
    /// The bottom is the first one whose color is compatible with the top.
    /// Belts and shoes also accept black or brown regardless of the rules.
    /// Returns `None` for an unknown user; a user without tops gets an empty
    /// outfit.
    pub fn suggest_complete_outfit(&self, user_id: &str) -> Option<Outfit> {
        let wardrobe = self.store.get_wardrobe(user_id)?;
        let mut outfit = Outfit::default();

        let anchor = match wardrobe.items(Category::Tops).first() {
            Some(top) => top.clone(),
            None => {
                debug!("User {} has no tops, returning an empty outfit", user_id);
                return Some(outfit);
            }
        };

        let compatible_colors = CompatibilityModel::compatible_with(anchor.color);

        outfit.bottom = wardrobe
            .items(Category::Bottoms)
            .iter()
            .find(|item| compatible_colors.contains(&item.color))
            .cloned();

        for category in ACCESSORY_SLOTS {
            let pick = wardrobe
                .items(category)
                .iter()
                .find(|item| {
                    compatible_colors.contains(&item.color) || item.color.is_accessory_neutral()
                })
                .cloned();
            if let Some(slot) = outfit.slot_mut(category) {
                *slot = pick;
            }
        }

        outfit.top = Some(anchor);

        info!("Outfit for user {} scored {}", user_id, outfit.score());
        Some(outfit)
    }
}
