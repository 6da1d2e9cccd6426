//! HSV color type and the RGB <-> HSV conversions.
//!
//! HSV only exists as an intermediate of transformations; nothing persists
//! it. All three components are normalized to 0.0..=1.0:
//!
//! - **h** (hue) is circular: a full turn is 1.0 and values wrap modulo 1.0
//! - **s** (saturation) and **v** (value) are linear and clamped on every
//!   conversion back to RGB
//!
//! # Rounding
//!
//! HSV -> RGB scales each channel by 255 and rounds half away from zero
//! (`f64::round`) before clamping. The conversions are computed in `f64`,
//! which makes `Rgb -> Hsv -> Rgb` the identity for all 2^24 colors.

use super::rgb::Rgb;

/// A color in HSV space, every component normalized to 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    /// Hue as a fraction of a full turn (0.0 = red, 1/3 = green, 2/3 = blue)
    pub h: f64,
    /// Saturation: 0.0 = grey, 1.0 = fully saturated
    pub s: f64,
    /// Value (brightness): 0.0 = black
    pub v: f64,
}

impl Hsv {
    #[inline]
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Whether the color has no hue at all (black, white and the greys).
    #[inline]
    pub fn is_achromatic(self) -> bool {
        self.s == 0.0
    }

    /// Rotate the hue by `turns` (1.0 = 360°), wrapping into 0.0..1.0.
    #[inline]
    pub fn rotate(self, turns: f64) -> Self {
        Self {
            h: wrap_hue(self.h + turns),
            ..self
        }
    }

    /// Replace the value, clamped into 0.0..=1.0.
    #[inline]
    pub fn with_value(self, v: f64) -> Self {
        Self {
            v: v.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Replace the saturation, clamped into 0.0..=1.0.
    #[inline]
    pub fn with_saturation(self, s: f64) -> Self {
        Self {
            s: s.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Wrap a hue into 0.0..1.0.
///
/// `rem_euclid` can return exactly 1.0 for tiny negative inputs; that is
/// folded back to 0.0.
#[inline]
pub fn wrap_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(1.0);
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Convert an 8-bit color to HSV.
///
/// Channels are divided by 255 and run through the max/min/chroma hue-sector
/// formula. The hue of an achromatic color is defined as 0.
pub fn rgb_to_hsv(color: Rgb) -> Hsv {
    let r = f64::from(color.r) / 255.0;
    let g = f64::from(color.g) / 255.0;
    let b = f64::from(color.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;
    if max == min {
        return Hsv::new(0.0, 0.0, v);
    }

    let chroma = max - min;
    let s = chroma / max;
    let rc = (max - r) / chroma;
    let gc = (max - g) / chroma;
    let bc = (max - b) / chroma;

    let sector = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    Hsv::new(wrap_hue(sector / 6.0), s, v)
}

/// Convert HSV back to an 8-bit color.
///
/// Hue is wrapped into 0.0..1.0 and saturation/value clamped into 0.0..=1.0
/// first, so any `Hsv` is accepted. Each channel is scaled by 255, rounded
/// half away from zero and clamped to 0..=255.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = wrap_hue(hsv.h);
    let s = hsv.s.clamp(0.0, 1.0);
    let v = hsv.v.clamp(0.0, 1.0);

    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        let scaled = h * 6.0;
        let sector = scaled.floor();
        let f = scaled - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match (sector as u8) % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };

    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}

/// Scale a 0.0..=1.0 component to a byte.
#[inline]
pub(crate) fn to_channel(x: f64) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

impl From<Rgb> for Hsv {
    fn from(color: Rgb) -> Self {
        rgb_to_hsv(color)
    }
}

impl From<Hsv> for Rgb {
    fn from(hsv: Hsv) -> Self {
        hsv_to_rgb(hsv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn test_primaries_to_hsv() {
        let cases = [
            (Rgb::new(255, 0, 0), 0.0),
            (Rgb::new(255, 255, 0), 1.0 / 6.0),
            (Rgb::new(0, 255, 0), 1.0 / 3.0),
            (Rgb::new(0, 255, 255), 0.5),
            (Rgb::new(0, 0, 255), 2.0 / 3.0),
            (Rgb::new(255, 0, 255), 5.0 / 6.0),
        ];
        for (color, hue) in cases {
            let hsv = rgb_to_hsv(color);
            assert!(approx_eq(hsv.h, hue), "hue of {color}: {} != {hue}", hsv.h);
            assert!(approx_eq(hsv.s, 1.0), "saturation of {color}: {}", hsv.s);
            assert!(approx_eq(hsv.v, 1.0), "value of {color}: {}", hsv.v);
        }
    }

    #[test]
    fn test_greys_have_zero_hue_and_saturation() {
        for level in [0u8, 1, 64, 128, 254, 255] {
            let hsv = rgb_to_hsv(Rgb::new(level, level, level));
            assert_eq!(hsv.h, 0.0);
            assert_eq!(hsv.s, 0.0);
            assert!(approx_eq(hsv.v, f64::from(level) / 255.0));
        }
    }

    #[test]
    fn test_known_values() {
        // (128, 64, 32): max=128 (red), chroma=96
        let hsv = rgb_to_hsv(Rgb::new(128, 64, 32));
        assert!(approx_eq(hsv.h, 1.0 / 18.0), "h = {}", hsv.h);
        assert!(approx_eq(hsv.s, 0.75), "s = {}", hsv.s);
        assert!(approx_eq(hsv.v, 128.0 / 255.0), "v = {}", hsv.v);
    }

    #[test]
    fn test_round_trip_selected_colors() {
        let colors = [
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(255, 255, 0),
            Rgb::new(0, 255, 255),
            Rgb::new(255, 0, 255),
            Rgb::new(128, 64, 32),
            Rgb::BLACK,
            Rgb::WHITE,
        ];
        for color in colors {
            assert_eq!(hsv_to_rgb(rgb_to_hsv(color)), color, "round trip of {color}");
        }
    }

    /// Every 8-bit color survives the round trip exactly.
    #[test]
    fn test_round_trip_exhaustive() {
        for r in 0..=255u8 {
            for g in 0..=255u8 {
                for b in 0..=255u8 {
                    let color = Rgb::new(r, g, b);
                    let back = hsv_to_rgb(rgb_to_hsv(color));
                    assert_eq!(back, color, "round trip of {color} gave {back}");
                }
            }
        }
    }

    #[test]
    fn test_hsv_to_rgb_normalizes_inputs() {
        // Hue wraps in both directions
        assert_eq!(hsv_to_rgb(Hsv::new(1.0, 1.0, 1.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(-0.5, 1.0, 1.0)), Rgb::new(0, 255, 255));
        assert_eq!(hsv_to_rgb(Hsv::new(2.5, 1.0, 1.0)), Rgb::new(0, 255, 255));

        // Saturation and value clamp
        assert_eq!(hsv_to_rgb(Hsv::new(0.0, 2.0, 1.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(0.0, -1.0, 1.0)), Rgb::WHITE);
        assert_eq!(hsv_to_rgb(Hsv::new(0.0, 1.0, 7.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(0.3, 1.0, -1.0)), Rgb::BLACK);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        // 0.5 / 255 * 255 == 0.5 exactly -> rounds up to 1
        let hsv = Hsv::new(0.0, 0.0, 0.5 / 255.0);
        assert_eq!(hsv_to_rgb(hsv), Rgb::new(1, 1, 1));
        // 2.5 -> 3 (half-to-even would give 2)
        let hsv = Hsv::new(0.0, 0.0, 2.5 / 255.0);
        assert_eq!(hsv_to_rgb(hsv), Rgb::new(3, 3, 3));
    }

    #[test]
    fn test_wrap_hue() {
        assert_eq!(wrap_hue(0.25), 0.25);
        assert_eq!(wrap_hue(1.0), 0.0);
        assert!(approx_eq(wrap_hue(-0.25), 0.75));
        assert!(approx_eq(wrap_hue(3.75), 0.75));
        assert_eq!(wrap_hue(-1e-18), 0.0);
    }

    #[test]
    fn test_rotate_and_clamp_helpers() {
        let hsv = Hsv::new(0.9, 0.5, 0.5);
        assert!(approx_eq(hsv.rotate(0.2).h, 0.1));
        assert_eq!(hsv.with_value(1.7).v, 1.0);
        assert_eq!(hsv.with_saturation(-0.2).s, 0.0);
        assert!(Hsv::new(0.0, 0.0, 0.3).is_achromatic());
        assert!(!hsv.is_achromatic());
    }
}
