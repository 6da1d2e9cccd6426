//! Assertion helpers for tests.

use palette_engine::Rgb;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

/// Assert bytes are a PNG of the given size
pub fn assert_png(bytes: &[u8], width: u32, height: u32) {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let reader = decoder.read_info().expect("PNG header should decode");
    assert_eq!(
        (reader.info().width, reader.info().height),
        (width, height),
        "PNG dimensions"
    );
}

/// Assert two palettes hold the same colors, ignoring order
pub fn assert_same_colors(actual: &[Rgb], expected: &[Rgb]) {
    let actual: BTreeSet<Rgb> = actual.iter().copied().collect();
    let expected: BTreeSet<Rgb> = expected.iter().copied().collect();
    assert_eq!(actual, expected, "palette colors differ");
}
