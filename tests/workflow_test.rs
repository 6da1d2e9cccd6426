//! End-to-end palette workflow: extract, derive, save, render.

mod common;

use common::fixtures::{split_image, write_png, GREEN, RED};
use common::*;
use divergesia::models::AppConfig;
use divergesia::rendering::MockupRenderer;
use divergesia::services::{load_palette, save_palette, ExtractionService};
use palette_engine::Rgb;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_extract_shift_harmony_save_render() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "split.png", &split_image(80, 80, RED, GREEN));
    let config = AppConfig::default();

    let service = ExtractionService::new(config.extract_options(Some(2)));
    let extracted = service.extract(&image, 2).await.unwrap().unwrap();
    assert_same_colors(extracted.colors(), &[RED, GREEN]);

    // Rotating by 120 degrees takes red to green and green to blue
    let shifted = extracted.with_hsv_shift(120.0, 0.0, 0.0);
    assert_eq!(shifted.name, "Palette from image (HSV shift)");
    assert_same_colors(shifted.colors(), &[GREEN, Rgb::new(0, 0, 255)]);
    assert_eq!(
        shifted.parameters["hsv_shift"],
        json!({"hue_shift_deg": 120.0, "sat_offset_pct": 0.0, "val_offset_pct": 0.0})
    );

    let harmony = config.harmony("complementary").unwrap();
    let mut derived = extracted.with_harmony(&harmony);
    assert_eq!(derived.colors().len(), 2);
    assert_same_colors(derived.colors(), &[Rgb::new(0, 255, 255), Rgb::new(255, 0, 255)]);

    let path = dir.path().join("derived.json");
    save_palette(&mut derived, &path).unwrap();
    let loaded = load_palette(&path).unwrap();
    assert_eq!(loaded.colors(), derived.colors());
    assert_eq!(loaded.harmony_kind, "complementary");

    let renderer = MockupRenderer::new(config.mockup.width, config.mockup.height).unwrap();
    let png_bytes = renderer.render_png(loaded.colors()).unwrap();
    assert_png(&png_bytes, 200, 200);
}

#[test]
fn test_in_place_shift_survives_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grey.json");
    let mut record = palette_engine::PaletteRecord::new("Grey", vec![Rgb::new(128, 128, 128)]);

    // Achromatic colors ignore hue and saturation
    record.apply_hsv_shift(90.0, 50.0, 0.0);
    assert_eq!(record.colors(), &[Rgb::new(128, 128, 128)]);
    save_palette(&mut record, &path).unwrap();

    let loaded = load_palette(&path).unwrap();
    assert_eq!(loaded.name, "Grey");
    assert_eq!(loaded.parameters["hsv_shift"]["hue_shift_deg"], json!(90.0));
}

#[test]
fn test_mockup_pixels() {
    let renderer = MockupRenderer::new(90, 30).unwrap();
    let png_bytes = renderer
        .render_png(&[RED, GREEN, Rgb::new(0, 0, 255)])
        .unwrap();
    assert_png(&png_bytes, 90, 30);

    let image = image::load_from_memory(&png_bytes).unwrap().to_rgb8();
    assert_eq!(image.get_pixel(10, 10).0, [255, 0, 0]);
    assert_eq!(image.get_pixel(30, 10).0, [0, 0, 0], "separator");
    assert_eq!(image.get_pixel(45, 10).0, [0, 255, 0]);
    assert_eq!(image.get_pixel(60, 29).0, [0, 0, 0], "separator");
    assert_eq!(image.get_pixel(89, 0).0, [0, 0, 255]);
}
