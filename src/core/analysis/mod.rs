mod extractor;
mod pixel_source;

pub use extractor::{
    extract_dominant_color, extract_palette, ExtractionOptions, ExtractionPreset,
    BACKGROUND_DARK_LIMIT, BACKGROUND_LIGHT_LIMIT,
};
pub use pixel_source::{decode_image, load_image, to_rgb_buffer};
