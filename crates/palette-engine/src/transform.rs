//! Hue/saturation/value shifts for single colors and whole palettes.
//!
//! A shift is expressed the way a user dials it in: hue in degrees,
//! saturation and value as percentage-point offsets. The shift is applied
//! in HSV space; hue wraps around the color wheel, saturation and value
//! clamp at the ends of their range.
//!
//! # Achromatic policy
//!
//! A grey (saturation exactly 0, including black and white) has no hue, so
//! a hue shift cannot move it and a saturation offset has nothing to act
//! on. Greys therefore only respond to the value offset; see
//! [`adjust_color`].

use serde::{Deserialize, Serialize};

use crate::color::{hsv_to_rgb, rgb_to_hsv, to_channel, Rgb};

/// The parameters of one HSV shift.
///
/// Serializes to the `hsv_shift` entry of a palette's parameter log.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HsvShift {
    /// Hue rotation in degrees (any sign, any magnitude)
    pub hue_shift_deg: f64,
    /// Saturation offset in percentage points (-100..=100 is the useful range)
    pub sat_offset_pct: f64,
    /// Value offset in percentage points (-100..=100 is the useful range)
    pub val_offset_pct: f64,
}

impl HsvShift {
    pub fn new(hue_shift_deg: f64, sat_offset_pct: f64, val_offset_pct: f64) -> Self {
        Self {
            hue_shift_deg,
            sat_offset_pct,
            val_offset_pct,
        }
    }

    /// Whether the shift changes nothing on any axis.
    pub fn is_identity(&self) -> bool {
        self.hue_shift_deg == 0.0 && self.sat_offset_pct == 0.0 && self.val_offset_pct == 0.0
    }

    /// Apply this shift to one color. See [`adjust_color`].
    pub fn apply(&self, color: Rgb) -> Rgb {
        adjust_color(
            color,
            self.hue_shift_deg,
            self.sat_offset_pct,
            self.val_offset_pct,
        )
    }
}

/// Shift one color in HSV space.
///
/// - hue: `h' = (h + hue_shift_deg / 360) mod 1`
/// - saturation: `s' = clamp(s + sat_offset_pct / 100, 0, 1)`
/// - value: `v' = clamp(v + val_offset_pct / 100, 0, 1)`
///
/// A zero shift returns `color` itself, not a round-tripped copy.
///
/// Greys (saturation 0) ignore hue and saturation entirely. With no value
/// offset they come back byte-for-byte unchanged; with one they come back
/// as the grey `round(v' * 255)` on all three channels.
///
/// # Example
///
/// ```
/// use palette_engine::{adjust_color, Rgb};
///
/// assert_eq!(adjust_color(Rgb::new(255, 0, 0), 180.0, 0.0, 0.0), Rgb::new(0, 255, 255));
///
/// // Greys keep their hue-less identity
/// let grey = Rgb::new(128, 128, 128);
/// assert_eq!(adjust_color(grey, 90.0, 50.0, 0.0), grey);
/// ```
pub fn adjust_color(
    color: Rgb,
    hue_shift_deg: f64,
    sat_offset_pct: f64,
    val_offset_pct: f64,
) -> Rgb {
    if hue_shift_deg == 0.0 && sat_offset_pct == 0.0 && val_offset_pct == 0.0 {
        return color;
    }

    let hsv = rgb_to_hsv(color);

    if hsv.is_achromatic() {
        return adjust_grey(color, hsv.v, val_offset_pct);
    }

    let shifted = hsv
        .rotate(hue_shift_deg / 360.0)
        .with_saturation(hsv.s + sat_offset_pct / 100.0)
        .with_value(hsv.v + val_offset_pct / 100.0);
    hsv_to_rgb(shifted)
}

/// Achromatic guard: only the value offset can move a grey.
fn adjust_grey(color: Rgb, v: f64, val_offset_pct: f64) -> Rgb {
    if val_offset_pct == 0.0 {
        return color;
    }
    let level = to_channel((v + val_offset_pct / 100.0).clamp(0.0, 1.0));
    Rgb::new(level, level, level)
}

/// Shift every color of a palette, preserving order and length.
///
/// The input is never mutated; element `i` of the result is exactly
/// `adjust_color(palette[i], ..)`.
pub fn adjust_palette(
    palette: &[Rgb],
    hue_shift_deg: f64,
    sat_offset_pct: f64,
    val_offset_pct: f64,
) -> Vec<Rgb> {
    palette
        .iter()
        .map(|&color| adjust_color(color, hue_shift_deg, sat_offset_pct, val_offset_pct))
        .collect()
}
