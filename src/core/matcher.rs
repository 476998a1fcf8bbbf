//! Upload pipeline: pixels in, stored item and suggestions out

use image::RgbImage;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::config::MatcherConfig;
use crate::core::advisor::{OutfitAdvisor, Suggestion};
use crate::core::analysis::{extract_dominant_color, ExtractionOptions};
use crate::core::color::{ColorClassifier, CompatibilityModel};
use crate::core::wardrobe::{Category, ClothingItem, WardrobeStore};

/// Name given to uploads that arrive without one
pub const DEFAULT_ITEM_NAME: &str = "Unnamed Item";

/// Result of processing one uploaded garment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadOutcome {
    pub user_id: String,
    pub item: ClothingItem,
    pub suggestions: Vec<Suggestion>,
    /// Number of colors the item's color has a rule for
    pub compatible_color_count: usize,
}

/// Wires extraction, classification, storage and advice together
#[derive(Debug, Clone)]
pub struct OutfitMatcher {
    extraction: ExtractionOptions,
    classifier: ColorClassifier,
    advisor: OutfitAdvisor,
}

impl OutfitMatcher {
    pub fn new(
        store: Arc<WardrobeStore>,
        extraction: ExtractionOptions,
        classifier: ColorClassifier,
    ) -> Self {
        Self {
            extraction,
            classifier,
            advisor: OutfitAdvisor::new(store),
        }
    }

    pub fn from_config(store: Arc<WardrobeStore>, config: &MatcherConfig) -> Self {
        Self::new(
            store,
            config.extraction.options(),
            ColorClassifier::for_mode(config.classifier),
        )
    }

    pub fn advisor(&self) -> &OutfitAdvisor {
        &self.advisor
    }

    pub fn store(&self) -> &Arc<WardrobeStore> {
        self.advisor.store()
    }

    /// Classify a garment photo, record it and suggest what goes with it.
    ///
    /// Never fails: an image that cannot be analyzed is recorded with the
    /// neutral fallback color.
    pub fn ingest(
        &self,
        user_id: &str,
        category: Category,
        name: Option<&str>,
        img: &RgbImage,
    ) -> UploadOutcome {
        let rgb = extract_dominant_color(img, &self.extraction);
        let color = self.classifier.classify(rgb);
        let name = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_ITEM_NAME);

        info!(
            "User {} uploaded '{}' as {}: {} classified {}",
            user_id,
            name,
            category,
            rgb,
            color
        );

        let item = ClothingItem::new(name, color, rgb, category);
        self.store().add_item(user_id, item.clone());

        let suggestions = self.advisor.suggest_for_item(user_id, category, color);

        UploadOutcome {
            user_id: user_id.to_string(),
            item,
            suggestions,
            compatible_color_count: CompatibilityModel::compatible_with(color).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::ColorName;
    use image::Rgb;

    fn matcher() -> OutfitMatcher {
        OutfitMatcher::from_config(Arc::new(WardrobeStore::new()), &MatcherConfig::default())
    }

    #[test]
    fn test_ingest_classifies_and_stores() {
        let matcher = matcher();
        let img = RgbImage::from_pixel(80, 80, Rgb([250, 5, 5]));

        let outcome = matcher.ingest("user1", Category::Tops, Some("Red Shirt"), &img);
        assert_eq!(outcome.item.color, ColorName::Red);
        assert_eq!(outcome.item.rgb, crate::RgbColor::new(250, 5, 5));
        assert_eq!(outcome.compatible_color_count, 6);
        // First upload, nothing to match yet
        assert!(outcome
            .suggestions
            .iter()
            .all(|s| matches!(s, Suggestion::TryPairing { .. })));

        let wardrobe = matcher.store().get_wardrobe("user1").unwrap();
        assert_eq!(wardrobe.items(Category::Tops), &[outcome.item]);
    }

    #[test]
    fn test_ingest_defaults_blank_names() {
        let matcher = matcher();
        let img = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));

        let outcome = matcher.ingest("user1", Category::Shoes, Some("   "), &img);
        assert_eq!(outcome.item.name, DEFAULT_ITEM_NAME);
        let outcome = matcher.ingest("user1", Category::Shoes, None, &img);
        assert_eq!(outcome.item.name, DEFAULT_ITEM_NAME);
    }

    #[test]
    fn test_ingest_empty_image_records_neutral_gray() {
        let matcher = matcher();
        let empty = RgbImage::new(0, 0);
        let outcome = matcher.ingest("user1", Category::Belts, Some("Mystery"), &empty);
        assert_eq!(outcome.item.rgb, crate::RgbColor::NEUTRAL);
        assert_eq!(outcome.item.color, ColorName::Gray);
    }
}
