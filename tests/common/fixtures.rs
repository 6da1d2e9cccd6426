//! Test fixtures: synthetic images and palettes on disk.

use image::{Rgb as ImageRgb, RgbImage};
use palette_engine::{PaletteRecord, Rgb};
use std::path::{Path, PathBuf};

pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);

/// Left half `left`, right half `right`
pub fn split_image(width: u32, height: u32, left: Rgb, right: Rgb) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        let c = if x < width / 2 { left } else { right };
        ImageRgb([c.r, c.g, c.b])
    })
}

/// Write `image` as PNG into `dir` and return its path
pub fn write_png(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).expect("Failed to write fixture PNG");
    path
}

/// The record used by the persistence round-trip tests
pub fn sample_record() -> PaletteRecord {
    PaletteRecord::new("Test", vec![Rgb::new(10, 20, 30), Rgb::new(100, 150, 200)])
        .with_source("path/to/image.png")
        .with_harmony_kind("complementario")
        .with_parameter("key", serde_json::json!("value"))
}
