use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::analysis::ExtractionPreset;
use crate::core::color::ClassifierMode;
use crate::error::Result;

/// Matcher configuration, loaded from a JSON file with per-field defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// User id used when a caller does not name one
    pub default_user: String,

    /// Which extraction preset uploads go through
    pub extraction: ExtractionPreset,

    /// Which classification policy names the extracted color
    pub classifier: ClassifierMode,

    /// Directory for log files; logs go to stderr only when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            default_user: "user1".to_string(),
            extraction: ExtractionPreset::Basic,
            classifier: ClassifierMode::Basic,
            log_dir: None,
        }
    }
}

impl MatcherConfig {
    /// Platform config location, e.g. `~/.config/wardrobe-matcher/config.json`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "wardrobe-matcher")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration, or return defaults if the file is missing or corrupted
    pub fn load(path: &Path) -> Self {
        info!("Loading configuration from: {:?}", path);

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<MatcherConfig>(&contents) {
                Ok(config) => {
                    info!("Successfully loaded configuration");
                    config
                }
                Err(e) => {
                    warn!("Failed to parse configuration file: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(e) => {
                // A missing file on first run is expected
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read configuration file: {}. Using defaults.", e);
                } else {
                    info!("No configuration file found. Using defaults.");
                }
                Self::default()
            }
        }
    }

    /// Load from the platform location, falling back to defaults
    pub fn load_default() -> Self {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => {
                warn!("Could not determine config directory. Using defaults.");
                Self::default()
            }
        }
    }

    /// Save configuration as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Configuration saved to: {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("wardrobe-matcher-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_config_default() {
        let config = MatcherConfig::default();
        assert_eq!(config.default_user, "user1");
        assert_eq!(config.extraction, ExtractionPreset::Basic);
        assert_eq!(config.classifier, ClassifierMode::Basic);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{ "extraction": "advanced", "classifier": "refined" }"#;
        let config: MatcherConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.extraction, ExtractionPreset::Advanced);
        assert_eq!(config.classifier, ClassifierMode::Refined);
        assert_eq!(config.default_user, "user1");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip/config.json");
        let config = MatcherConfig {
            default_user: "alex".to_string(),
            extraction: ExtractionPreset::Advanced,
            classifier: ClassifierMode::Refined,
            log_dir: Some(PathBuf::from("logs")),
        };

        config.save(&path).unwrap();
        assert_eq!(MatcherConfig::load(&path), config);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_or_corrupt_file_uses_defaults() {
        assert_eq!(
            MatcherConfig::load(&temp_path("missing/config.json")),
            MatcherConfig::default()
        );

        let path = temp_path("corrupt/config.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(MatcherConfig::load(&path), MatcherConfig::default());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
