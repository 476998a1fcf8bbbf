//! Hand-authored color and category compatibility rules
//!
//! Every lookup here is total: unknown keys resolve to an empty list, a
//! default key, or a neutral fallback instead of an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::classifier::to_hsv;
use super::names::{ColorName, RgbColor, BASIC_PALETTE, EXTENDED_PALETTE};
use crate::core::wardrobe::Category;

use ColorName::*;

/// Colors that pair well with a given color
static COMPATIBLE_COLORS: [(ColorName, &[ColorName]); 14] = [
    (Red, &[Black, White, Navy, Gray, Beige, Cream]),
    (Blue, &[White, Gray, Beige, Black, Brown, Cream]),
    (Green, &[Brown, Black, White, Beige, Navy]),
    (Black, &[White, Gray, Red, Blue, Green, Beige, Pink, Yellow]),
    (White, &[Black, Navy, Gray, Red, Blue, Green, Brown]),
    (Navy, &[White, Beige, Gray, Red, Brown]),
    (Gray, &[White, Black, Red, Blue, Pink, Yellow]),
    (Brown, &[Beige, White, Green, Blue, Cream]),
    (Beige, &[Brown, White, Blue, Green, Navy]),
    (Pink, &[Gray, Black, White, Navy]),
    (Yellow, &[Black, Gray, Navy, Brown]),
    (Purple, &[Gray, Black, White]),
    (Orange, &[Black, Brown, Navy, White]),
    (Cream, &[Brown, Navy, Black, Red]),
];

/// Categories that can be worn together with a given category
static CATEGORY_COMBINATIONS: [(Category, &[Category]); 6] = [
    (
        Category::Tops,
        &[Category::Bottoms, Category::Belts, Category::Shoes, Category::Accessories],
    ),
    (
        Category::Bottoms,
        &[Category::Tops, Category::Belts, Category::Shoes, Category::Accessories],
    ),
    (Category::Belts, &[Category::Tops, Category::Bottoms]),
    (Category::Shoes, &[Category::Tops, Category::Bottoms]),
    (Category::Accessories, &[Category::Tops, Category::Bottoms]),
    // A dress stands in for both top and bottom
    (
        Category::Dresses,
        &[Category::Belts, Category::Shoes, Category::Accessories],
    ),
];

static COMPLEMENTARY: [(ColorName, &[ColorName]); 6] = [
    (Red, &[Green, Teal]),
    (Blue, &[Orange, Coral]),
    (Yellow, &[Purple, Lavender]),
    (Green, &[Red, Pink]),
    (Orange, &[Blue, Navy]),
    (Purple, &[Yellow, Gold]),
];

static ANALOGOUS: [(ColorName, &[ColorName]); 6] = [
    (Red, &[Orange, Pink, Burgundy]),
    (Blue, &[Teal, Purple, Navy]),
    (Yellow, &[Orange, Gold, Cream]),
    (Green, &[Teal, Olive, Mint]),
    (Orange, &[Red, Yellow, Coral]),
    (Purple, &[Blue, Pink, Lavender]),
];

static TRIADIC: [(ColorName, &[ColorName]); 6] = [
    (Red, &[Blue, Yellow]),
    (Blue, &[Red, Yellow]),
    (Yellow, &[Red, Blue]),
    (Green, &[Orange, Purple]),
    (Orange, &[Green, Purple]),
    (Purple, &[Green, Orange]),
];

static SEASONAL_PALETTES: [(&str, &[ColorName]); 4] = [
    ("spring", &[Coral, Mint, SkyBlue, Lavender, Cream, LightGray]),
    ("summer", &[Navy, White, SkyBlue, Pink, Silver, LightGray]),
    ("autumn", &[Burgundy, ForestGreen, Gold, Brown, Orange, Cream]),
    ("winter", &[Black, White, Navy, Red, RoyalBlue, Silver]),
];

static STYLE_PALETTES: [(&str, &[ColorName]); 8] = [
    ("professional", &[Navy, Black, White, Gray, DarkGray]),
    ("casual", &[Blue, Green, Brown, Beige, Khaki]),
    ("elegant", &[Black, White, Navy, Burgundy, Silver]),
    ("playful", &[Yellow, Orange, Pink, SkyBlue, Mint]),
    ("romantic", &[Pink, Lavender, Cream, Coral, White]),
    ("bold", &[Red, Orange, RoyalBlue, Purple, Gold]),
    ("earthy", &[Brown, Olive, ForestGreen, Tan, Cream]),
    ("minimalist", &[White, Black, Gray, Beige, Cream]),
];

const DEFAULT_SEASON: &str = "summer";
const DEFAULT_STYLE: &str = "casual";

/// Returned by harmony lookups that find no rule at all
pub const NEUTRAL_TRIPLE: [ColorName; 3] = [Black, White, Gray];

/// Color-theory pattern used to derive accent colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HarmonyKind {
    #[default]
    Complementary,
    Analogous,
    Triadic,
}

impl HarmonyKind {
    pub const ALL: [HarmonyKind; 3] = [
        HarmonyKind::Complementary,
        HarmonyKind::Analogous,
        HarmonyKind::Triadic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HarmonyKind::Complementary => "complementary",
            HarmonyKind::Analogous => "analogous",
            HarmonyKind::Triadic => "triadic",
        }
    }

    /// Parse a harmony name, falling back to complementary for anything unknown
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    fn table(&self) -> &'static [(ColorName, &'static [ColorName])] {
        match self {
            HarmonyKind::Complementary => &COMPLEMENTARY,
            HarmonyKind::Analogous => &ANALOGOUS,
            HarmonyKind::Triadic => &TRIADIC,
        }
    }
}

impl FromStr for HarmonyKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        HarmonyKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or(())
    }
}

impl fmt::Display for HarmonyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a color reads as warm, cool or neither
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTemperature {
    Warm,
    Cool,
    Neutral,
}

impl fmt::Display for ColorTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorTemperature::Warm => f.write_str("warm"),
            ColorTemperature::Cool => f.write_str("cool"),
            ColorTemperature::Neutral => f.write_str("neutral"),
        }
    }
}

/// Read-only access to the static compatibility tables
#[derive(Debug, Clone, Copy, Default)]
pub struct CompatibilityModel;

impl CompatibilityModel {
    /// Colors that pair with `color`, in rule order.
    ///
    /// An unknown or unruled color yields an empty slice, which callers treat
    /// as "no rule" rather than an error.
    pub fn compatible_colors(color: &str) -> &'static [ColorName] {
        match color.parse::<ColorName>() {
            Ok(name) => Self::compatible_with(name),
            Err(_) => &[],
        }
    }

    /// Typed form of [`CompatibilityModel::compatible_colors`]
    pub fn compatible_with(color: ColorName) -> &'static [ColorName] {
        COMPATIBLE_COLORS
            .iter()
            .find(|(key, _)| *key == color)
            .map(|(_, colors)| *colors)
            .unwrap_or(&[])
    }

    /// Categories that combine with `category`. The relation is not symmetric.
    pub fn compatible_categories(category: Category) -> &'static [Category] {
        CATEGORY_COMBINATIONS
            .iter()
            .find(|(key, _)| *key == category)
            .map(|(_, categories)| *categories)
            .unwrap_or(&[])
    }

    /// Accent colors for `color` under the named harmony.
    ///
    /// Unknown harmony names use complementary. A color without its own row
    /// collects the rows of every key it contains or is contained by, and
    /// only when nothing matches does it fall back to black, white and gray.
    pub fn harmony_suggestions(color: &str, harmony: &str) -> Vec<ColorName> {
        Self::harmony_for(color, HarmonyKind::parse_or_default(harmony))
    }

    pub fn harmony_for(color: &str, kind: HarmonyKind) -> Vec<ColorName> {
        let table = kind.table();
        let query = color.trim().to_lowercase();

        if let Some((_, colors)) = table.iter().find(|(key, _)| key.as_str() == query) {
            return colors.to_vec();
        }

        let similar: Vec<ColorName> = table
            .iter()
            .filter(|(key, _)| query.contains(key.as_str()) || key.as_str().contains(&query))
            .flat_map(|(_, colors)| colors.iter().copied())
            .collect();

        if similar.is_empty() {
            NEUTRAL_TRIPLE.to_vec()
        } else {
            similar
        }
    }

    /// Seasonal palette, case-insensitive, defaulting to summer
    pub fn seasonal_palette(season: &str) -> &'static [ColorName] {
        lookup_or_default(&SEASONAL_PALETTES, season, DEFAULT_SEASON)
    }

    /// Style or mood palette, case-insensitive, defaulting to casual
    pub fn style_palette(style: &str) -> &'static [ColorName] {
        lookup_or_default(&STYLE_PALETTES, style, DEFAULT_STYLE)
    }

    pub fn seasons() -> impl Iterator<Item = &'static str> {
        SEASONAL_PALETTES.iter().map(|(season, _)| *season)
    }

    pub fn styles() -> impl Iterator<Item = &'static str> {
        STYLE_PALETTES.iter().map(|(style, _)| *style)
    }

    /// Every color that has a compatibility rule, with its compatible colors
    pub fn color_rules() -> impl Iterator<Item = (ColorName, &'static [ColorName])> {
        COMPATIBLE_COLORS.iter().map(|(color, colors)| (*color, *colors))
    }

    pub fn category_rules() -> impl Iterator<Item = (Category, &'static [Category])> {
        CATEGORY_COMBINATIONS
            .iter()
            .map(|(category, categories)| (*category, *categories))
    }

    pub fn basic_palette() -> &'static [(ColorName, RgbColor)] {
        &BASIC_PALETTE
    }

    pub fn extended_palette() -> &'static [(ColorName, RgbColor)] {
        &EXTENDED_PALETTE
    }
}

fn lookup_or_default(
    table: &'static [(&'static str, &'static [ColorName])],
    key: &str,
    default: &str,
) -> &'static [ColorName] {
    let key = key.trim().to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == key)
        .or_else(|| table.iter().find(|(name, _)| *name == default))
        .map(|(_, colors)| *colors)
        .unwrap_or(&[])
}

/// WCAG contrast ratio between two colors, from 1.0 (identical) to 21.0
pub fn contrast_ratio(a: RgbColor, b: RgbColor) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Relative luminance using the sRGB transfer curve
pub fn relative_luminance(rgb: RgbColor) -> f64 {
    fn linearize(channel: u8) -> f64 {
        let c = channel as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b)
}

/// Classify a color as warm, cool or neutral from its hue
pub fn color_temperature(rgb: RgbColor) -> ColorTemperature {
    let hsv = to_hsv(rgb);

    if hsv.saturation < 0.3 {
        return ColorTemperature::Neutral;
    }

    match hsv.hue {
        h if h <= 60.0 || h >= 300.0 => ColorTemperature::Warm,
        h if h >= 120.0 => ColorTemperature::Cool,
        _ => ColorTemperature::Neutral,
    }
}
