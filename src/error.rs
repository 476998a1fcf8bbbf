//! Error types for the wardrobe matcher library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wardrobe matcher operations
pub type Result<T> = std::result::Result<T, MatcherError>;

/// Errors surfaced by the few operations that can fail.
///
/// Color extraction, classification and every table lookup degrade to a
/// documented default instead of returning one of these.
#[derive(Error, Debug)]
pub enum MatcherError {
    /// Image bytes could not be decoded into pixels
    #[error("Failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Image file could not be opened or decoded
    #[error("Failed to load image {path:?}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Category string is not one of the known clothing categories
    #[error("Unknown clothing category: {0}")]
    UnknownCategory(String),

    /// Configuration file could not be parsed or serialized
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MatcherError {
    /// Get user-friendly error description for front-end display
    pub fn user_message(&self) -> String {
        match self {
            MatcherError::ImageDecode(_) | MatcherError::ImageLoad { .. } => {
                "Could not read the image. Please upload a different photo.".to_string()
            }
            MatcherError::UnknownCategory(category) => format!(
                "'{}' is not a clothing category. Use one of: {}.",
                category,
                crate::Category::ALL
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}
