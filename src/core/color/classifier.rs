use palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::names::{ColorName, RgbColor, BASIC_PALETTE, EXTENDED_PALETTE};

/// Saturation below which a color is read purely by its brightness
pub const NEUTRAL_SATURATION: f32 = 0.2;

/// Saturation above which the hue bucket overrides the nearest palette entry
pub const VIVID_SATURATION: f32 = 0.5;

/// Which classification policy to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierMode {
    /// Nearest neighbor over the 14 color basic palette
    #[default]
    Basic,
    /// Nearest neighbor over the extended palette, refined by HSV heuristics
    Refined,
}

/// Maps RGB measurements to canonical color names
#[derive(Debug, Clone, Copy)]
pub struct ColorClassifier {
    palette: &'static [(ColorName, RgbColor)],
    hue_refinement: bool,
}

impl ColorClassifier {
    pub fn basic() -> Self {
        Self {
            palette: &BASIC_PALETTE,
            hue_refinement: false,
        }
    }

    pub fn refined() -> Self {
        Self {
            palette: &EXTENDED_PALETTE,
            hue_refinement: true,
        }
    }

    pub fn for_mode(mode: ClassifierMode) -> Self {
        match mode {
            ClassifierMode::Basic => Self::basic(),
            ClassifierMode::Refined => Self::refined(),
        }
    }

    pub fn palette(&self) -> &'static [(ColorName, RgbColor)] {
        self.palette
    }

    /// Classify an RGB color into a palette name.
    ///
    /// The nearest palette entry wins, with ties going to the entry listed
    /// first. A refined classifier then lets HSV analysis override that
    /// answer for near-neutral and strongly saturated colors.
    pub fn classify(&self, rgb: RgbColor) -> ColorName {
        let nearest = self.nearest(rgb);

        if !self.hue_refinement {
            return nearest;
        }

        let refined = self.refine(rgb, nearest);
        if refined != nearest {
            trace!("Hue refinement changed {} from {} to {}", rgb, nearest, refined);
        }
        refined
    }

    /// Stage one: minimum Euclidean distance over the palette
    pub fn nearest(&self, rgb: RgbColor) -> ColorName {
        let mut closest = ColorName::Gray;
        let mut min_distance = f64::INFINITY;

        for (name, reference) in self.palette {
            let distance = rgb.distance(reference);
            // Strict comparison keeps the first of equally distant entries
            if distance < min_distance {
                min_distance = distance;
                closest = *name;
            }
        }

        closest
    }

    fn refine(&self, rgb: RgbColor, nearest: ColorName) -> ColorName {
        let hsv = to_hsv(rgb);

        if hsv.saturation < NEUTRAL_SATURATION {
            return if hsv.value < 0.3 {
                ColorName::Black
            } else if hsv.value > 0.8 {
                ColorName::White
            } else {
                ColorName::Gray
            };
        }

        if hsv.saturation > VIVID_SATURATION {
            let bucket = hue_bucket(hsv.hue);
            if self.palette.iter().any(|(name, _)| *name == bucket) {
                return bucket;
            }
        }

        nearest
    }
}

impl Default for ColorClassifier {
    fn default() -> Self {
        Self::basic()
    }
}

/// Hue in degrees [0, 360), saturation and value in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvComponents {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

pub fn to_hsv(rgb: RgbColor) -> HsvComponents {
    let srgb = Srgb::new(
        rgb.r as f32 / 255.0,
        rgb.g as f32 / 255.0,
        rgb.b as f32 / 255.0,
    );
    let hsv: Hsv = Hsv::from_color(srgb);

    HsvComponents {
        hue: hsv.hue.into_positive_degrees(),
        saturation: hsv.saturation,
        value: hsv.value,
    }
}

/// Named hue ranges used for saturated colors
fn hue_bucket(hue: f32) -> ColorName {
    match hue {
        h if h < 30.0 || h >= 330.0 => ColorName::Red,
        h if h < 90.0 => ColorName::Yellow,
        h if h < 150.0 => ColorName::Green,
        h if h < 270.0 => ColorName::Blue,
        _ => ColorName::Purple,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBES: [((u8, u8, u8), ColorName); 8] = [
        ((255, 0, 0), ColorName::Red),
        ((0, 0, 255), ColorName::Blue),
        ((0, 128, 0), ColorName::Green),
        ((255, 255, 255), ColorName::White),
        ((0, 0, 0), ColorName::Black),
        ((128, 128, 128), ColorName::Gray),
        ((255, 192, 203), ColorName::Pink),
        ((165, 42, 42), ColorName::Brown),
    ];

    #[test]
    fn test_basic_classifier_probes() {
        let classifier = ColorClassifier::basic();
        for ((r, g, b), expected) in PROBES {
            assert_eq!(
                classifier.classify(RgbColor::new(r, g, b)),
                expected,
                "RGB ({}, {}, {})",
                r,
                g,
                b
            );
        }
    }

    #[test]
    fn test_refined_classifier_probes() {
        let classifier = ColorClassifier::refined();
        for ((r, g, b), expected) in PROBES {
            let expected = if expected == ColorName::Brown {
                // Saturated with hue 0, so the red bucket overrides
                ColorName::Red
            } else {
                expected
            };
            assert_eq!(classifier.classify(RgbColor::new(r, g, b)), expected);
        }
    }

    #[test]
    fn test_dark_desaturated_colors_are_black() {
        let classifier = ColorClassifier::refined();
        // Every hue, saturation under 0.2 and value under 0.3
        for rgb in [
            RgbColor::new(60, 55, 55),
            RgbColor::new(55, 60, 55),
            RgbColor::new(55, 55, 60),
            RgbColor::new(70, 70, 70),
            RgbColor::new(20, 18, 19),
        ] {
            let hsv = to_hsv(rgb);
            assert!(hsv.saturation < 0.2 && hsv.value < 0.3);
            assert_eq!(classifier.classify(rgb), ColorName::Black, "{}", rgb);
        }
    }

    #[test]
    fn test_neutral_override_ignores_nearest_entry() {
        let classifier = ColorClassifier::refined();
        // Nearest entry is light gray, but value > 0.8 reads as white
        assert_eq!(classifier.nearest(RgbColor::new(215, 215, 215)), ColorName::LightGray);
        assert_eq!(classifier.classify(RgbColor::new(215, 215, 215)), ColorName::White);
        // Nearest entry is dark gray, mid value reads as gray
        assert_eq!(classifier.nearest(RgbColor::new(90, 90, 90)), ColorName::DarkGray);
        assert_eq!(classifier.classify(RgbColor::new(90, 90, 90)), ColorName::Gray);
    }

    #[test]
    fn test_saturated_hue_buckets() {
        let classifier = ColorClassifier::refined();
        // coral, hue 16
        assert_eq!(classifier.classify(RgbColor::new(255, 127, 80)), ColorName::Red);
        // orange, hue 39
        assert_eq!(classifier.classify(RgbColor::new(255, 165, 0)), ColorName::Yellow);
        // teal, hue 180
        assert_eq!(classifier.classify(RgbColor::new(0, 128, 128)), ColorName::Blue);
        assert_eq!(classifier.classify(RgbColor::new(128, 0, 128)), ColorName::Purple); // hue 300
        assert_eq!(classifier.classify(RgbColor::new(255, 0, 200)), ColorName::Purple); // hue 313
    }

    #[test]
    fn test_mid_saturation_keeps_nearest_entry() {
        let classifier = ColorClassifier::refined();
        // Tan has saturation 0.33, so the palette answer stands
        let tan = RgbColor::new(210, 180, 140);
        let hsv = to_hsv(tan);
        assert!(hsv.saturation >= 0.2 && hsv.saturation <= 0.5);
        assert_eq!(classifier.classify(tan), ColorName::Tan);
    }

    #[test]
    fn test_ties_go_to_first_palette_entry() {
        let classifier = ColorClassifier::basic();
        // (0, 64, 0) is exactly 64 from both black (0,0,0) and green (0,128,0);
        // green is listed before black
        let rgb = RgbColor::new(0, 64, 0);
        assert_eq!(rgb.distance(&RgbColor::new(0, 0, 0)), 64.0);
        assert_eq!(rgb.distance(&RgbColor::new(0, 128, 0)), 64.0);
        assert_eq!(classifier.classify(rgb), ColorName::Green);
    }

    #[test]
    fn test_hue_bucket_boundaries() {
        assert_eq!(hue_bucket(0.0), ColorName::Red);
        assert_eq!(hue_bucket(29.9), ColorName::Red);
        assert_eq!(hue_bucket(30.0), ColorName::Yellow);
        assert_eq!(hue_bucket(90.0), ColorName::Green);
        assert_eq!(hue_bucket(150.0), ColorName::Blue);
        assert_eq!(hue_bucket(269.9), ColorName::Blue);
        assert_eq!(hue_bucket(270.0), ColorName::Purple);
        assert_eq!(hue_bucket(330.0), ColorName::Red);
    }
}
