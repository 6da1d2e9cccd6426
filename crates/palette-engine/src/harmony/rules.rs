//! Hue-rotation and brightness harmony rules.
//!
//! Every rule converts each base color to HSV, derives one or more colors
//! by rotating the hue (modulo one turn) or scaling/nudging the value, and
//! converts back to RGB. Saturation is always preserved, and so is value
//! unless the rule is a brightness rule. Inputs are never mutated and the
//! output keeps the order of the base colors.

use crate::color::{hsv_to_rgb, rgb_to_hsv, Rgb};

/// Default analogous spread: 1/12 turn (30°) either side.
pub const ANALOGOUS_OFFSET: f64 = 1.0 / 12.0;
/// Default single-step analogous rotation in degrees.
pub const ANALOGOUS_ANGLE_DEG: f64 = 30.0;
/// Default tetradic offsets in turns.
pub const TETRADIC_OFFSETS: (f64, f64) = (1.0 / 3.0, 0.5);
/// Default monochromatic brightness factors.
pub const MONOCHROMATIC_FACTORS: [f64; 3] = [0.5, 0.8, 1.0];
/// Default monochromatic single-step nudge in percentage points.
pub const MONOCHROMATIC_STEP_PCT: f64 = 20.0;

fn rotate(color: Rgb, turns: f64) -> Rgb {
    hsv_to_rgb(rgb_to_hsv(color).rotate(turns))
}

/// Rotate each color by half a turn (180°).
pub fn complementary(colors: &[Rgb]) -> Vec<Rgb> {
    colors.iter().map(|&c| rotate(c, 0.5)).collect()
}

/// Rotate each color by `angle_deg` degrees; one output per base color.
pub fn analogous(colors: &[Rgb], angle_deg: f64) -> Vec<Rgb> {
    let turns = angle_deg / 360.0;
    colors.iter().map(|&c| rotate(c, turns)).collect()
}

/// For each color: `[hue - offset, hue, hue + offset]`, offset in turns.
pub fn analogous_spread(colors: &[Rgb], offset: f64) -> Vec<[Rgb; 3]> {
    colors
        .iter()
        .map(|&c| {
            let hsv = rgb_to_hsv(c);
            [
                hsv_to_rgb(hsv.rotate(-offset)),
                hsv_to_rgb(hsv),
                hsv_to_rgb(hsv.rotate(offset)),
            ]
        })
        .collect()
}

/// For each color: the equilateral triad at +0, +1/3 and +2/3 turn.
pub fn triadic(colors: &[Rgb]) -> Vec<[Rgb; 3]> {
    colors
        .iter()
        .map(|&c| {
            let hsv = rgb_to_hsv(c);
            [
                hsv_to_rgb(hsv),
                hsv_to_rgb(hsv.rotate(1.0 / 3.0)),
                hsv_to_rgb(hsv.rotate(2.0 / 3.0)),
            ]
        })
        .collect()
}

/// Rotate each color by a third of a turn (120°); one output per base color.
pub fn triadic_shift(colors: &[Rgb]) -> Vec<Rgb> {
    colors.iter().map(|&c| rotate(c, 1.0 / 3.0)).collect()
}

/// For each color: hue +0, +offset1, +offset2 and +offset1+offset2 turns.
pub fn tetradic(colors: &[Rgb], offset1: f64, offset2: f64) -> Vec<[Rgb; 4]> {
    colors
        .iter()
        .map(|&c| {
            let hsv = rgb_to_hsv(c);
            [
                hsv_to_rgb(hsv),
                hsv_to_rgb(hsv.rotate(offset1)),
                hsv_to_rgb(hsv.rotate(offset2)),
                hsv_to_rgb(hsv.rotate(offset1 + offset2)),
            ]
        })
        .collect()
}

/// Rotate each color by a quarter turn (90°); one output per base color.
pub fn tetradic_shift(colors: &[Rgb]) -> Vec<Rgb> {
    colors.iter().map(|&c| rotate(c, 0.25)).collect()
}

/// For each color: one variant per factor, with value `clamp(v * factor)`.
pub fn monochromatic(colors: &[Rgb], factors: &[f64]) -> Vec<Vec<Rgb>> {
    colors
        .iter()
        .map(|&c| {
            let hsv = rgb_to_hsv(c);
            factors
                .iter()
                .map(|&factor| hsv_to_rgb(hsv.with_value(hsv.v * factor)))
                .collect()
        })
        .collect()
}

/// Nudge each color's value by `adjust_pct` points toward the far end of
/// the brightness range: bright colors (v > 0.5) get darker, the rest get
/// brighter. One output per base color.
pub fn monochromatic_step(colors: &[Rgb], adjust_pct: f64) -> Vec<Rgb> {
    let delta = adjust_pct / 100.0;
    colors
        .iter()
        .map(|&c| {
            let hsv = rgb_to_hsv(c);
            let v = if hsv.v > 0.5 { hsv.v - delta } else { hsv.v + delta };
            hsv_to_rgb(hsv.with_value(v))
        })
        .collect()
}
