use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    /// Color returned whenever an image cannot be analyzed
    pub const NEUTRAL: RgbColor = RgbColor::new(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Mean of the three channels, used for background filtering
    pub fn brightness(&self) -> f32 {
        (self.r as f32 + self.g as f32 + self.b as f32) / 3.0
    }

    /// Euclidean distance in RGB space
    pub fn distance(&self, other: &RgbColor) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for RgbColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<RgbColor> for [u8; 3] {
    fn from(color: RgbColor) -> Self {
        [color.r, color.g, color.b]
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Canonical color names recognized by the classifier and the rule tables.
///
/// The set is closed, so every name a rule table mentions is guaranteed to be
/// a palette entry. Free-form strings go through [`ColorName::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorName {
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    Pink,
    Black,
    White,
    Gray,
    LightGray,
    DarkGray,
    Brown,
    Tan,
    Beige,
    Cream,
    Khaki,
    Navy,
    RoyalBlue,
    SkyBlue,
    Teal,
    ForestGreen,
    Olive,
    Mint,
    Maroon,
    Burgundy,
    Coral,
    Gold,
    Silver,
    Lavender,
}

impl ColorName {
    pub const ALL: [ColorName; 30] = [
        ColorName::Red,
        ColorName::Green,
        ColorName::Blue,
        ColorName::Yellow,
        ColorName::Orange,
        ColorName::Purple,
        ColorName::Pink,
        ColorName::Black,
        ColorName::White,
        ColorName::Gray,
        ColorName::LightGray,
        ColorName::DarkGray,
        ColorName::Brown,
        ColorName::Tan,
        ColorName::Beige,
        ColorName::Cream,
        ColorName::Khaki,
        ColorName::Navy,
        ColorName::RoyalBlue,
        ColorName::SkyBlue,
        ColorName::Teal,
        ColorName::ForestGreen,
        ColorName::Olive,
        ColorName::Mint,
        ColorName::Maroon,
        ColorName::Burgundy,
        ColorName::Coral,
        ColorName::Gold,
        ColorName::Silver,
        ColorName::Lavender,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorName::Red => "red",
            ColorName::Green => "green",
            ColorName::Blue => "blue",
            ColorName::Yellow => "yellow",
            ColorName::Orange => "orange",
            ColorName::Purple => "purple",
            ColorName::Pink => "pink",
            ColorName::Black => "black",
            ColorName::White => "white",
            ColorName::Gray => "gray",
            ColorName::LightGray => "light_gray",
            ColorName::DarkGray => "dark_gray",
            ColorName::Brown => "brown",
            ColorName::Tan => "tan",
            ColorName::Beige => "beige",
            ColorName::Cream => "cream",
            ColorName::Khaki => "khaki",
            ColorName::Navy => "navy",
            ColorName::RoyalBlue => "royal_blue",
            ColorName::SkyBlue => "sky_blue",
            ColorName::Teal => "teal",
            ColorName::ForestGreen => "forest_green",
            ColorName::Olive => "olive",
            ColorName::Mint => "mint",
            ColorName::Maroon => "maroon",
            ColorName::Burgundy => "burgundy",
            ColorName::Coral => "coral",
            ColorName::Gold => "gold",
            ColorName::Silver => "silver",
            ColorName::Lavender => "lavender",
        }
    }

    /// Reference RGB value from the extended palette
    pub fn rgb(&self) -> RgbColor {
        EXTENDED_PALETTE
            .iter()
            .find(|(name, _)| name == self)
            .map(|(_, rgb)| *rgb)
            .unwrap_or(RgbColor::NEUTRAL)
    }

    /// Whether this color is treated as safe with anything for belts and shoes
    pub fn is_accessory_neutral(&self) -> bool {
        matches!(self, ColorName::Black | ColorName::Brown)
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a palette color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColorName;

impl FromStr for ColorName {
    type Err = UnknownColorName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        ColorName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == normalized)
            .ok_or(UnknownColorName)
    }
}

/// The 14 reference colors used by the primary upload path
pub static BASIC_PALETTE: [(ColorName, RgbColor); 14] = [
    (ColorName::Red, RgbColor::new(255, 0, 0)),
    (ColorName::Green, RgbColor::new(0, 128, 0)),
    (ColorName::Blue, RgbColor::new(0, 0, 255)),
    (ColorName::Yellow, RgbColor::new(255, 255, 0)),
    (ColorName::Orange, RgbColor::new(255, 165, 0)),
    (ColorName::Brown, RgbColor::new(165, 42, 42)),
    (ColorName::White, RgbColor::new(255, 255, 255)),
    (ColorName::Black, RgbColor::new(0, 0, 0)),
    (ColorName::Gray, RgbColor::new(128, 128, 128)),
    (ColorName::Beige, RgbColor::new(245, 245, 220)),
    (ColorName::Pink, RgbColor::new(255, 192, 203)),
    (ColorName::Purple, RgbColor::new(128, 0, 128)),
    (ColorName::Navy, RgbColor::new(0, 0, 128)),
    (ColorName::Cream, RgbColor::new(255, 253, 208)),
];

/// The full 30 color reference palette
pub static EXTENDED_PALETTE: [(ColorName, RgbColor); 30] = [
    // Basic colors
    (ColorName::Red, RgbColor::new(255, 0, 0)),
    (ColorName::Green, RgbColor::new(0, 128, 0)),
    (ColorName::Blue, RgbColor::new(0, 0, 255)),
    (ColorName::Yellow, RgbColor::new(255, 255, 0)),
    (ColorName::Orange, RgbColor::new(255, 165, 0)),
    (ColorName::Purple, RgbColor::new(128, 0, 128)),
    (ColorName::Pink, RgbColor::new(255, 192, 203)),
    // Neutrals
    (ColorName::Black, RgbColor::new(0, 0, 0)),
    (ColorName::White, RgbColor::new(255, 255, 255)),
    (ColorName::Gray, RgbColor::new(128, 128, 128)),
    (ColorName::LightGray, RgbColor::new(211, 211, 211)),
    (ColorName::DarkGray, RgbColor::new(64, 64, 64)),
    // Earth tones
    (ColorName::Brown, RgbColor::new(165, 42, 42)),
    (ColorName::Tan, RgbColor::new(210, 180, 140)),
    (ColorName::Beige, RgbColor::new(245, 245, 220)),
    (ColorName::Cream, RgbColor::new(255, 253, 208)),
    (ColorName::Khaki, RgbColor::new(240, 230, 140)),
    // Blues
    (ColorName::Navy, RgbColor::new(0, 0, 128)),
    (ColorName::RoyalBlue, RgbColor::new(65, 105, 225)),
    (ColorName::SkyBlue, RgbColor::new(135, 206, 235)),
    (ColorName::Teal, RgbColor::new(0, 128, 128)),
    // Greens
    (ColorName::ForestGreen, RgbColor::new(34, 139, 34)),
    (ColorName::Olive, RgbColor::new(128, 128, 0)),
    (ColorName::Mint, RgbColor::new(189, 252, 201)),
    // Reds
    (ColorName::Maroon, RgbColor::new(128, 0, 0)),
    (ColorName::Burgundy, RgbColor::new(128, 0, 32)),
    (ColorName::Coral, RgbColor::new(255, 127, 80)),
    // Others
    (ColorName::Gold, RgbColor::new(255, 215, 0)),
    (ColorName::Silver, RgbColor::new(192, 192, 192)),
    (ColorName::Lavender, RgbColor::new(230, 230, 250)),
];
