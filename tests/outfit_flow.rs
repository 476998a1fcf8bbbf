use image::{Rgb, RgbImage};
use std::sync::Arc;

use wardrobe_matcher::{
    decode_image, load_image, Category, ColorName, ExtractionPreset, MatcherConfig, MatcherError,
    OutfitMatcher, Suggestion, WardrobeStore,
};

fn solid(color: ColorName) -> RgbImage {
    let rgb = color.rgb();
    RgbImage::from_pixel(64, 64, Rgb([rgb.r, rgb.g, rgb.b]))
}

fn matcher() -> OutfitMatcher {
    OutfitMatcher::from_config(Arc::new(WardrobeStore::new()), &MatcherConfig::default())
}

#[test]
fn test_red_top_picks_the_compatible_bottom() {
    let matcher = matcher();

    matcher.ingest("user1", Category::Tops, Some("Red Shirt"), &solid(ColorName::Red));
    matcher.ingest("user1", Category::Bottoms, Some("Blue Jeans"), &solid(ColorName::Blue));
    let pants = solid(ColorName::Black);
    let outcome = matcher.ingest("user1", Category::Bottoms, Some("Black Pants"), &pants);

    assert_eq!(outcome.item.color, ColorName::Black);
    assert_eq!(
        outcome.suggestions,
        vec![Suggestion::Match {
            name: "Red Shirt".to_string(),
            color: ColorName::Red,
            category: Category::Tops,
        }]
    );
    assert_eq!(outcome.suggestions[0].to_string(), "✓ Red Shirt (red top)");

    let outfit = matcher.advisor().suggest_complete_outfit("user1").unwrap();
    assert_eq!(outfit.top.as_ref().unwrap().name, "Red Shirt");
    assert_eq!(outfit.bottom.as_ref().unwrap().name, "Black Pants");
    assert!(outfit.belt.is_none());
    assert!(outfit.shoe.is_none());
    assert_eq!(outfit.score(), 2);
}

#[test]
fn test_full_outfit_accepts_brown_accessories() {
    let matcher = matcher();

    matcher.ingest("user1", Category::Tops, Some("Navy Polo"), &solid(ColorName::Navy));
    matcher.ingest("user1", Category::Bottoms, Some("Beige Chinos"), &solid(ColorName::Beige));
    // Pink is not in navy's rule, brown is always allowed on belts and shoes
    matcher.ingest("user1", Category::Belts, Some("Pink Belt"), &solid(ColorName::Pink));
    matcher.ingest("user1", Category::Belts, Some("Brown Belt"), &solid(ColorName::Brown));
    matcher.ingest("user1", Category::Shoes, Some("Black Loafers"), &solid(ColorName::Black));

    let outfit = matcher.advisor().suggest_complete_outfit("user1").unwrap();
    assert_eq!(outfit.score(), 4);
    let names: Vec<_> = outfit.slots().map(|(slot, item)| (slot, item.name.as_str())).collect();
    assert_eq!(
        names,
        vec![
            ("top", "Navy Polo"),
            ("bottom", "Beige Chinos"),
            ("belt", "Brown Belt"),
            ("shoe", "Black Loafers"),
        ]
    );
}

#[test]
fn test_wardrobes_are_isolated_per_user() {
    let matcher = matcher();

    matcher.ingest("alice", Category::Tops, Some("White Tee"), &solid(ColorName::White));
    let jeans = solid(ColorName::Black);
    let outcome = matcher.ingest("bob", Category::Bottoms, Some("Black Jeans"), &jeans);

    // Bob only sees his own jeans, so the advice is generic
    assert!(outcome
        .suggestions
        .iter()
        .all(|s| matches!(s, Suggestion::TryPairing { .. })));
    assert_eq!(outcome.suggestions.len(), 3);

    let stats = matcher.store().stats();
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_items, 2);
    assert!(matcher.advisor().suggest_complete_outfit("carol").is_none());
}

#[test]
fn test_concurrent_uploads_are_all_recorded() {
    let matcher = matcher();

    std::thread::scope(|scope| {
        for i in 0..8 {
            let matcher = &matcher;
            scope.spawn(move || {
                for j in 0..5 {
                    let name = format!("Top {}-{}", i, j);
                    matcher.ingest("shared", Category::Tops, Some(&name), &solid(ColorName::Green));
                }
            });
        }
    });

    let wardrobe = matcher.store().get_wardrobe("shared").unwrap();
    assert_eq!(wardrobe.items(Category::Tops).len(), 40);
    assert_eq!(matcher.store().stats().color_distribution.get(&ColorName::Green), Some(&40));
}

#[test]
fn test_upload_from_png_file() {
    let dir = std::env::temp_dir().join(format!("wardrobe-matcher-flow-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("shirt.png");

    // Red garment on a white backdrop
    let mut img = RgbImage::from_pixel(100, 100, Rgb([250, 250, 250]));
    for y in 20..80 {
        for x in 20..80 {
            img.put_pixel(x, y, Rgb([230, 10, 10]));
        }
    }
    img.save(&path).unwrap();

    let config = MatcherConfig {
        extraction: ExtractionPreset::Advanced,
        ..MatcherConfig::default()
    };
    let matcher = OutfitMatcher::from_config(Arc::new(WardrobeStore::new()), &config);

    let loaded = load_image(&path).unwrap();
    let outcome = matcher.ingest("user1", Category::Tops, None, &loaded);
    assert_eq!(outcome.item.color, ColorName::Red);
    assert_eq!(outcome.item.name, "Unnamed Item");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_garbage_bytes_are_rejected() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, MatcherError::ImageDecode(_)));

    let err = load_image(std::path::Path::new("/nonexistent/shirt.png")).unwrap_err();
    assert!(matches!(err, MatcherError::ImageLoad { .. }));
}
