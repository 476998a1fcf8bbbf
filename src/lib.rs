//! Wardrobe color matching
//!
//! Extracts the dominant color of a garment photo, names it against a fixed
//! palette, stores it in a per-user wardrobe and suggests compatible items
//! and outfits from static color and category rules.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;

pub use crate::config::MatcherConfig;
pub use crate::core::advisor::{Outfit, OutfitAdvisor, Suggestion};
pub use crate::core::analysis::{
    decode_image, extract_dominant_color, extract_palette, load_image, ExtractionOptions,
    ExtractionPreset,
};
pub use crate::core::color::{
    color_temperature, contrast_ratio, ClassifierMode, ColorClassifier, ColorName,
    ColorTemperature, CompatibilityModel, HarmonyKind, RgbColor,
};
pub use crate::core::matcher::{OutfitMatcher, UploadOutcome, DEFAULT_ITEM_NAME};
pub use crate::core::wardrobe::{Category, ClothingItem, StoreStats, Wardrobe, WardrobeStore};
pub use crate::error::{MatcherError, Result};
