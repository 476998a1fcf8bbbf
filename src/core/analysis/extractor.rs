use image::imageops::{self, FilterType};
use image::RgbImage;
use kmeans_colors::get_kmeans;
use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::core::color::RgbColor;

/// Pixels with mean brightness at or below this are treated as background
pub const BACKGROUND_DARK_LIMIT: f32 = 30.0;

/// Pixels with mean brightness at or above this are treated as background
pub const BACKGROUND_LIGHT_LIMIT: f32 = 225.0;

/// Tuning for one k-means pass over an image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionOptions {
    /// Images are resampled to `sample_size` x `sample_size` before clustering
    pub sample_size: u32,
    /// Number of k-means clusters
    pub clusters: usize,
    /// Drop near-black and near-white pixels before clustering
    pub filter_background: bool,
    pub max_iterations: usize,
    /// Convergence threshold in normalized sRGB units
    pub convergence: f32,
    pub seed: u64,
}

impl ExtractionOptions {
    /// 50x50 sample, 3 clusters, no background filtering
    pub fn basic() -> Self {
        Self {
            sample_size: 50,
            clusters: 3,
            filter_background: false,
            max_iterations: 20,
            convergence: 0.0025,
            seed: 42,
        }
    }

    /// 100x100 sample, 5 clusters, background filtering on
    pub fn advanced() -> Self {
        Self {
            sample_size: 100,
            clusters: 5,
            filter_background: true,
            ..Self::basic()
        }
    }
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self::basic()
    }
}

/// Named extraction presets selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionPreset {
    #[default]
    Basic,
    Advanced,
}

impl ExtractionPreset {
    pub fn options(&self) -> ExtractionOptions {
        match self {
            ExtractionPreset::Basic => ExtractionOptions::basic(),
            ExtractionPreset::Advanced => ExtractionOptions::advanced(),
        }
    }
}

/// Calculates the dominant color of an image using k-means clustering.
///
/// The image is resampled to a small square, optionally stripped of
/// background-like pixels, and clustered with a fixed seed so the same image
/// always yields the same color. The centroid of the most populous cluster
/// is returned. Images that cannot be analyzed yield [`RgbColor::NEUTRAL`].
pub fn extract_dominant_color(img: &RgbImage, options: &ExtractionOptions) -> RgbColor {
    match cluster_image(img, options, options.clusters) {
        Some(clusters) => {
            let (color, members) = clusters[0];
            debug!(
                "Dominant color {} holds {} of {} clusters' pixels",
                color,
                members,
                clusters.len()
            );
            color
        }
        None => {
            warn!(
                "Could not extract a dominant color from {}x{} image, using neutral gray",
                img.width(),
                img.height()
            );
            RgbColor::NEUTRAL
        }
    }
}

/// Extract up to `num_colors` representative colors, most common first.
///
/// Uses the advanced sample size without background filtering. Fewer colors
/// are returned when the image has fewer distinct colors than requested. A
/// failed analysis yields `num_colors` copies of neutral gray.
pub fn extract_palette(img: &RgbImage, num_colors: usize) -> Vec<RgbColor> {
    let options = ExtractionOptions {
        clusters: num_colors,
        filter_background: false,
        ..ExtractionOptions::advanced()
    };

    match cluster_image(img, &options, num_colors) {
        Some(clusters) => clusters.into_iter().map(|(color, _)| color).collect(),
        None => {
            warn!("Palette extraction failed, using neutral gray");
            vec![RgbColor::NEUTRAL; num_colors]
        }
    }
}

/// Cluster the image and return (centroid, member count) pairs ordered by
/// descending member count. Equal counts keep cluster order.
fn cluster_image(
    img: &RgbImage,
    options: &ExtractionOptions,
    clusters: usize,
) -> Option<Vec<(RgbColor, usize)>> {
    if img.width() == 0 || img.height() == 0 || options.sample_size == 0 || clusters == 0 {
        return None;
    }

    let pixels = sample_pixels(img, options);
    if pixels.is_empty() {
        return None;
    }

    let distinct = pixels.iter().collect::<HashSet<_>>().len();
    // k-means indices are u8, and seeding needs at least k distinct points
    let k = clusters.min(distinct).min(u8::MAX as usize);
    if distinct == 1 {
        return Some(vec![(pixels[0], pixels.len())]);
    }

    let buf: Vec<Srgb> = pixels
        .iter()
        .map(|c| Srgb::new(c.r as f32 / 255.0, c.g as f32 / 255.0, c.b as f32 / 255.0))
        .collect();

    let result = get_kmeans(
        k,
        options.max_iterations,
        options.convergence,
        false,
        &buf,
        options.seed,
    );

    let mut counts = vec![0usize; result.centroids.len()];
    for &idx in &result.indices {
        counts[idx as usize] += 1;
    }

    let mut centroids_with_counts: Vec<(RgbColor, usize)> = result
        .centroids
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(centroid, count)| (to_rgb_color(centroid), count))
        .collect();

    // Stable sort, so ties go to the lower cluster index
    centroids_with_counts.sort_by(|a, b| b.1.cmp(&a.1));

    if centroids_with_counts.is_empty() {
        None
    } else {
        Some(centroids_with_counts)
    }
}

/// Resample the image and apply the optional background filter
fn sample_pixels(img: &RgbImage, options: &ExtractionOptions) -> Vec<RgbColor> {
    let size = options.sample_size;
    let sampled = imageops::resize(img, size, size, FilterType::Nearest);

    let pixels: Vec<RgbColor> = sampled
        .pixels()
        .map(|p| RgbColor::new(p[0], p[1], p[2]))
        .collect();

    if !options.filter_background {
        return pixels;
    }

    let foreground: Vec<RgbColor> = pixels
        .iter()
        .copied()
        .filter(|c| {
            let brightness = c.brightness();
            brightness > BACKGROUND_DARK_LIMIT && brightness < BACKGROUND_LIGHT_LIMIT
        })
        .collect();

    if foreground.is_empty() {
        debug!("Background filter removed every pixel, clustering the unfiltered sample");
        pixels
    } else {
        debug!(
            "Background filter kept {} of {} pixels",
            foreground.len(),
            pixels.len()
        );
        foreground
    }
}

fn to_rgb_color(centroid: &Srgb) -> RgbColor {
    let channel = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    RgbColor::new(
        channel(centroid.red),
        channel(centroid.green),
        channel(centroid.blue),
    )
}
