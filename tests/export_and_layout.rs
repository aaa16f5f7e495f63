use egui::{pos2, vec2, Color32, ColorImage, Rect};

use movie_tier_list::error::ExportError;
use movie_tier_list::export::{crop, encode_png, export_file_name};
use movie_tier_list::geometry::DropZones;
use movie_tier_list::tier::{ContainerId, PlacementId, Target};
use movie_tier_list::widgets::TitleEditor;

// 4x3 image where every pixel encodes its own coordinates
fn gradient() -> ColorImage {
    let (width, height) = (4, 3);
    let pixels = (0..height)
        .flat_map(|y| (0..width).map(move |x| Color32::from_rgb(x as u8, y as u8, 0)))
        .collect();
    ColorImage {
        size: [width, height],
        pixels,
    }
}

#[test]
fn test_crop_takes_region_in_points() {
    let image = gradient();

    // One point is two pixels
    let cropped = crop(&image, Rect::from_min_max(pos2(0.5, 0.5), pos2(1.5, 1.5)), 2.0).unwrap();

    assert_eq!(cropped.size, [2, 2]);
    assert_eq!(cropped.pixels[0], Color32::from_rgb(1, 1, 0));
    assert_eq!(cropped.pixels[3], Color32::from_rgb(2, 2, 0));
}

#[test]
fn test_crop_clips_to_screenshot() {
    let image = gradient();

    let cropped = crop(&image, Rect::from_min_max(pos2(2.0, -5.0), pos2(50.0, 50.0)), 1.0).unwrap();
    assert_eq!(cropped.size, [2, 3]);

    let outside = crop(&image, Rect::from_min_size(pos2(10.0, 10.0), vec2(5.0, 5.0)), 1.0);
    assert!(matches!(outside, Err(ExportError::EmptyCapture)));
}

#[test]
fn test_png_encoding() {
    let bytes = encode_png(&gradient()).unwrap();

    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (4, 3));
}

#[test]
fn test_export_file_name_uses_title() {
    assert_eq!(
        export_file_name("My Movie Tier List", "20250114-093005"),
        "my-movie-tier-list-20250114-093005.png"
    );
    assert_eq!(export_file_name("???", "1"), "tier-list-1.png");
}

#[test]
fn test_drop_zones_prefer_tiles() {
    let mut zones = DropZones::new();
    assert!(zones.is_empty());

    let row = Rect::from_min_size(pos2(0.0, 0.0), vec2(400.0, 130.0));
    let tile = Rect::from_min_size(pos2(100.0, 5.0), vec2(80.0, 120.0));
    zones.register_container(row, ContainerId::new("S"));
    zones.register_item(tile, PlacementId::new("1-a"));

    assert_eq!(
        zones.hit(pos2(120.0, 50.0)),
        Some(Target::Item(PlacementId::new("1-a")))
    );
    assert_eq!(
        zones.hit(pos2(10.0, 50.0)),
        Some(Target::Container(ContainerId::new("S")))
    );
    assert_eq!(zones.hit(pos2(10.0, 500.0)), None);
    assert_eq!(zones.container_rect(&ContainerId::new("S")), Some(row));

    zones.clear();
    assert!(zones.is_empty());
    assert_eq!(zones.hit(pos2(120.0, 50.0)), None);
}

#[test]
fn test_drop_zone_bounds_cover_every_row() {
    let mut zones = DropZones::new();
    assert_eq!(zones.bounds(), None);

    zones.register_container(Rect::from_min_size(pos2(0.0, 0.0), vec2(300.0, 100.0)), ContainerId::new("S"));
    zones.register_container(Rect::from_min_size(pos2(0.0, 110.0), vec2(300.0, 100.0)), ContainerId::new("A"));

    assert_eq!(
        zones.bounds(),
        Some(Rect::from_min_max(pos2(0.0, 0.0), pos2(300.0, 210.0)))
    );
}

#[test]
fn test_title_editor_commit_and_cancel() {
    let mut editor = TitleEditor::default();
    assert!(!editor.is_editing());
    assert_eq!(editor.commit(), None);

    editor.begin("My Movie Tier List");
    editor.set_text("  Summer 2024  ");
    assert_eq!(editor.commit().as_deref(), Some("Summer 2024"));
    assert!(!editor.is_editing());

    // Blank keeps the previous title
    editor.begin("Summer 2024");
    editor.set_text("    ");
    assert_eq!(editor.commit(), None);

    editor.begin("Summer 2024");
    editor.set_text("Something else");
    editor.cancel();
    assert!(!editor.is_editing());
    assert_eq!(editor.commit(), None);
}

#[test]
fn test_title_editor_limits_length() {
    let mut editor = TitleEditor::default();
    editor.begin("");
    editor.set_text(&"x".repeat(64));
    assert_eq!(editor.commit().map(|t| t.chars().count()), Some(40));
}
