use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use wardrobe_matcher::logging::setup_logging;
use wardrobe_matcher::{
    color_temperature, contrast_ratio, extract_dominant_color, extract_palette, load_image,
    Category, ColorClassifier, CompatibilityModel, ExtractionPreset, HarmonyKind, MatcherConfig,
    OutfitMatcher, RgbColor, WardrobeStore,
};

#[derive(Parser)]
#[command(name = "wardrobe-matcher")]
#[command(about = "Name garment colors and suggest outfits that go together")]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract and name the dominant color of a garment photo
    Analyze {
        /// Image file to analyze
        image: PathBuf,

        /// Number of palette colors to extract
        #[arg(long, default_value_t = 5)]
        palette: usize,
    },
    /// Upload garments into a wardrobe and suggest a complete outfit
    Outfit {
        /// Wardrobe owner (defaults to the configured user)
        #[arg(short, long)]
        user: Option<String>,

        /// Garments as CATEGORY=PATH, e.g. tops=shirt.jpg
        #[arg(required = true, value_parser = parse_upload)]
        uploads: Vec<(Category, PathBuf)>,
    },
    /// Print the compatibility tables as JSON
    Rules {
        /// Only show rules and harmonies for this color
        #[arg(long)]
        color: Option<String>,
    },
}

fn parse_upload(s: &str) -> Result<(Category, PathBuf), String> {
    let (category, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=PATH, got '{}'", s))?;
    let category = category.parse::<Category>().map_err(|e| e.user_message())?;
    Ok((category, PathBuf::from(path)))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MatcherConfig::load(path),
        None => MatcherConfig::load_default(),
    };

    setup_logging(config.log_dir.as_deref()).context("Failed to set up logging")?;
    info!("Starting wardrobe matcher");

    match cli.command {
        Commands::Analyze { image, palette } => run_analyze(&image, palette),
        Commands::Outfit { user, uploads } => {
            let user = user.unwrap_or_else(|| config.default_user.clone());
            run_outfit(&config, &user, &uploads)
        }
        Commands::Rules { color } => run_rules(color.as_deref()),
    }
}

fn run_analyze(path: &Path, palette_size: usize) -> anyhow::Result<()> {
    let img = load_image(path).with_context(|| format!("Cannot analyze {}", path.display()))?;

    let basic = extract_dominant_color(&img, &ExtractionPreset::Basic.options());
    let advanced = extract_dominant_color(&img, &ExtractionPreset::Advanced.options());
    let color = ColorClassifier::basic().classify(basic);
    let refined = ColorClassifier::refined().classify(advanced);

    let harmonies: serde_json::Map<String, serde_json::Value> = HarmonyKind::ALL
        .iter()
        .map(|kind| {
            let colors = CompatibilityModel::harmony_for(color.as_str(), *kind);
            (kind.to_string(), json!(colors))
        })
        .collect();

    let report = json!({
        "image": path.display().to_string(),
        "basic": {
            "rgb": basic,
            "hex": basic.to_hex(),
            "color": color,
        },
        "advanced": {
            "rgb": advanced,
            "hex": advanced.to_hex(),
            "color": refined,
        },
        "temperature": color_temperature(basic),
        "compatible_colors": CompatibilityModel::compatible_with(color),
        "harmonies": harmonies,
        "contrast": {
            "black": round2(contrast_ratio(basic, RgbColor::new(0, 0, 0))),
            "white": round2(contrast_ratio(basic, RgbColor::new(255, 255, 255))),
        },
        "palette": extract_palette(&img, palette_size)
            .into_iter()
            .map(|rgb| rgb.to_hex())
            .collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_outfit(
    config: &MatcherConfig,
    user: &str,
    uploads: &[(Category, PathBuf)],
) -> anyhow::Result<()> {
    let matcher = OutfitMatcher::from_config(Arc::new(WardrobeStore::new()), config);

    for (category, path) in uploads {
        let img = load_image(path).with_context(|| format!("Cannot upload {}", path.display()))?;
        let name = path.file_stem().and_then(|stem| stem.to_str());
        let outcome = matcher.ingest(user, *category, name, &img);

        println!(
            "{} -> {} {} ({})",
            outcome.item.name,
            outcome.item.color,
            category.singular(),
            outcome.item.rgb.to_hex()
        );
        for suggestion in &outcome.suggestions {
            println!("  {}", suggestion);
        }
    }

    if let Some(wardrobe) = matcher.store().get_wardrobe(user) {
        println!("Wardrobe of {}: {} items", user, wardrobe.total_items());
        for (category, count) in wardrobe.items_per_category() {
            println!("  {:<11} {}", category, count);
        }
    }

    let outfit = matcher.advisor().suggest_complete_outfit(user).unwrap_or_default();
    if outfit.is_empty() {
        println!("No complete outfit yet. Upload a top to anchor one.");
    } else {
        println!("Suggested outfit ({} pieces):", outfit.score());
        println!("{}", serde_json::to_string_pretty(&outfit)?);
    }

    Ok(())
}

fn run_rules(color: Option<&str>) -> anyhow::Result<()> {
    let report = match color {
        Some(color) => {
            let harmonies: serde_json::Map<String, serde_json::Value> = HarmonyKind::ALL
                .iter()
                .map(|kind| {
                    let colors = CompatibilityModel::harmony_for(color, *kind);
                    (kind.to_string(), json!(colors))
                })
                .collect();
            json!({
                "color": color,
                "compatible_colors": CompatibilityModel::compatible_colors(color),
                "harmonies": harmonies,
            })
        }
        None => {
            let colors: serde_json::Map<String, serde_json::Value> =
                CompatibilityModel::color_rules()
                    .map(|(color, compatible)| (color.to_string(), json!(compatible)))
                    .collect();
            let categories: serde_json::Map<String, serde_json::Value> =
                CompatibilityModel::category_rules()
                    .map(|(category, compatible)| (category.to_string(), json!(compatible)))
                    .collect();
            json!({ "colors": colors, "categories": categories })
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
