//! palette-engine: dominant-color extraction and palette transformation
//!
//! This library turns raster pixel data into color palettes and derives new
//! palettes from existing ones.
//!
//! # Quick Start
//!
//! ```
//! use palette_engine::{extract_dominant_colors, Harmony, PaletteRecord, PixelBuffer, Rgb};
//!
//! let mut pixels = vec![Rgb::new(255, 0, 0); 8];
//! pixels.extend(vec![Rgb::new(0, 255, 0); 8]);
//! let image = PixelBuffer::from_colors(4, 4, &pixels).unwrap();
//!
//! let colors = extract_dominant_colors(&image, 2, true, 200).unwrap();
//! let palette = PaletteRecord::from_image(colors, "tile.png");
//!
//! let warmer = palette.with_hsv_shift(15.0, 0.0, 0.0);
//! let complements = palette.with_harmony(&Harmony::Complementary);
//! assert_eq!(warmer.colors().len(), 2);
//! assert_eq!(complements.harmony_kind, "complementary");
//! ```
//!
//! # Modules
//!
//! - [`color`]: [`Rgb`], [`Hsv`] and the exact RGB <-> HSV round trip
//! - [`transform`]: hue/saturation/value shifts with the achromatic policy
//! - [`harmony`]: complementary, analogous, triadic, tetradic and
//!   monochromatic rules
//! - [`extract`]: sampling plus seeded k-means over a [`PixelBuffer`]
//! - [`record`]: [`PaletteRecord`] and its persisted form
//!
//! Everything here is synchronous, performs no I/O and shares no state, so
//! calls may run in parallel freely.

pub mod color;
pub mod error;
pub mod extract;
pub mod harmony;
pub mod record;
pub mod transform;

pub use color::{hsv_to_rgb, rgb_to_hsv, Hsv, Rgb};
pub use error::{EngineError, ParseColorError, ValidationError};
pub use extract::{extract_dominant_colors, extract_with_options, ExtractOptions, PixelBuffer};
pub use harmony::Harmony;
pub use record::{validate_colors, PaletteRecord, Parameters};
pub use transform::{adjust_color, adjust_palette, HsvShift};
