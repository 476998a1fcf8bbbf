use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::color::{ColorName, RgbColor};
use crate::error::MatcherError;

/// Clothing categories a wardrobe is organized by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tops,
    Bottoms,
    Belts,
    Shoes,
    Accessories,
    Dresses,
    Outerwear,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Tops,
        Category::Bottoms,
        Category::Belts,
        Category::Shoes,
        Category::Accessories,
        Category::Dresses,
        Category::Outerwear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Belts => "belts",
            Category::Shoes => "shoes",
            Category::Accessories => "accessories",
            Category::Dresses => "dresses",
            Category::Outerwear => "outerwear",
        }
    }

    /// Category name with the trailing "s" dropped ("tops" -> "top")
    pub fn singular(&self) -> &'static str {
        let name = self.as_str();
        name.strip_suffix('s').unwrap_or(name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = MatcherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| MatcherError::UnknownCategory(s.to_string()))
    }
}

/// A classified garment recorded in a wardrobe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub name: String,
    pub color: ColorName,
    pub rgb: RgbColor,
    pub category: Category,
    pub uploaded_at: DateTime<Utc>,
}

impl ClothingItem {
    /// Create an item stamped with the current time
    pub fn new(
        name: impl Into<String>,
        color: ColorName,
        rgb: RgbColor,
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            color,
            rgb,
            category,
            uploaded_at: Utc::now(),
        }
    }

    /// Create an item whose RGB value is the palette reference for `color`
    pub fn with_color(name: impl Into<String>, color: ColorName, category: Category) -> Self {
        Self::new(name, color, color.rgb(), category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("tops".parse::<Category>().unwrap(), Category::Tops);
        assert_eq!(" Shoes ".parse::<Category>().unwrap(), Category::Shoes);
        assert!(matches!(
            "hats".parse::<Category>(),
            Err(MatcherError::UnknownCategory(name)) if name == "hats"
        ));
    }

    #[test]
    fn test_category_singular() {
        assert_eq!(Category::Tops.singular(), "top");
        assert_eq!(Category::Bottoms.singular(), "bottom");
        assert_eq!(Category::Belts.singular(), "belt");
        assert_eq!(Category::Shoes.singular(), "shoe");
        assert_eq!(Category::Outerwear.singular(), "outerwear");
    }

    #[test]
    fn test_item_serialization_roundtrip() {
        let item = ClothingItem::with_color("Red Shirt", ColorName::Red, Category::Tops);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["color"], "red");
        assert_eq!(json["category"], "tops");
        assert_eq!(json["rgb"], serde_json::json!([255, 0, 0]));

        let loaded: ClothingItem = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, item);
    }
}
