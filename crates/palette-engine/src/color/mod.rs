//! Color types and conversion utilities
//!
//! - [`Rgb`]: 8-bit color, the unit palettes are made of
//! - [`Hsv`]: normalized hue/saturation/value, used only as an intermediate
//!   of transformations
//!
//! # Example
//!
//! ```
//! use palette_engine::{hsv_to_rgb, rgb_to_hsv, Rgb};
//!
//! let color = Rgb::new(128, 64, 32);
//! let hsv = rgb_to_hsv(color);
//! assert_eq!(hsv_to_rgb(hsv), color);
//! ```

mod hsv;
mod rgb;

pub use hsv::{hsv_to_rgb, rgb_to_hsv, wrap_hue, Hsv};
pub use rgb::Rgb;

pub(crate) use hsv::to_channel;
