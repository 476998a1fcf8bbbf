mod classifier;
mod compatibility;
mod names;

pub use classifier::{to_hsv, ClassifierMode, ColorClassifier, HsvComponents};
pub use compatibility::{
    color_temperature, contrast_ratio, relative_luminance, ColorTemperature, CompatibilityModel,
    HarmonyKind, NEUTRAL_TRIPLE,
};
pub use names::{ColorName, RgbColor, UnknownColorName, BASIC_PALETTE, EXTENDED_PALETTE};
