//! Harmony generation: deterministic palettes derived from a base palette.
//!
//! The rules live in [`rules`] as plain functions. Rules that produce one
//! color per base color (`complementary`, `analogous`, `triadic_shift`,
//! `tetradic_shift`, `monochromatic_step`) and rules that produce a group
//! per base color (`analogous_spread`, `triadic`, `tetradic`,
//! `monochromatic`) are separate entry points.
//!
//! [`Harmony`] names a rule together with its settings so it can be chosen
//! at runtime, recorded in a palette's parameter log, and applied to a
//! palette in one call. Grouped rules are flattened in base-color order.
//!
//! ```
//! use palette_engine::{Harmony, Rgb};
//!
//! let harmony: Harmony = "triadic".parse().unwrap();
//! let derived = harmony.apply(&[Rgb::new(255, 0, 0)]);
//! assert_eq!(derived, vec![Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)]);
//! ```

pub mod rules;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::EngineError;

pub use rules::{
    analogous, analogous_spread, complementary, monochromatic, monochromatic_step, tetradic,
    tetradic_shift, triadic, triadic_shift,
};

/// A harmony rule and its settings.
///
/// Serializes with an internal `kind` tag, e.g.
/// `{"kind": "analogous", "angle_deg": 30.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Harmony {
    /// Hue + 180°, one color per base color.
    Complementary,
    /// Hue + `angle_deg`, one color per base color.
    Analogous { angle_deg: f64 },
    /// Hue - offset, hue, hue + offset (turns), three colors per base color.
    AnalogousSpread { offset: f64 },
    /// Hue + 0, +1/3, +2/3 turn, three colors per base color.
    Triadic,
    /// Hue + 120°, one color per base color.
    TriadicShift,
    /// Hue + 0, +offset1, +offset2, +offset1+offset2, four colors per base color.
    Tetradic { offset1: f64, offset2: f64 },
    /// Hue + 90°, one color per base color.
    TetradicShift,
    /// One brightness variant per factor for each base color.
    Monochromatic { factors: Vec<f64> },
    /// Value nudged by `adjust_pct` points away from its half, one color per base color.
    MonochromaticStep { adjust_pct: f64 },
}

impl Harmony {
    /// All rule tags accepted by [`Harmony::from_str`].
    pub const KINDS: [&'static str; 9] = [
        "complementary",
        "analogous",
        "analogous_spread",
        "triadic",
        "triadic_shift",
        "tetradic",
        "tetradic_shift",
        "monochromatic",
        "monochromatic_step",
    ];

    /// The tag recorded as a palette's `harmony_kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            Harmony::Complementary => "complementary",
            Harmony::Analogous { .. } => "analogous",
            Harmony::AnalogousSpread { .. } => "analogous_spread",
            Harmony::Triadic => "triadic",
            Harmony::TriadicShift => "triadic_shift",
            Harmony::Tetradic { .. } => "tetradic",
            Harmony::TetradicShift => "tetradic_shift",
            Harmony::Monochromatic { .. } => "monochromatic",
            Harmony::MonochromaticStep { .. } => "monochromatic_step",
        }
    }

    /// Human-readable name, used when naming derived palettes.
    pub fn label(&self) -> &'static str {
        match self {
            Harmony::Complementary => "Complementary",
            Harmony::Analogous { .. } | Harmony::AnalogousSpread { .. } => "Analogous",
            Harmony::Triadic | Harmony::TriadicShift => "Triadic",
            Harmony::Tetradic { .. } | Harmony::TetradicShift => "Tetradic",
            Harmony::Monochromatic { .. } | Harmony::MonochromaticStep { .. } => "Monochromatic",
        }
    }

    /// Derive colors from `colors`, grouped rules flattened in base order.
    pub fn apply(&self, colors: &[Rgb]) -> Vec<Rgb> {
        match self {
            Harmony::Complementary => complementary(colors),
            Harmony::Analogous { angle_deg } => analogous(colors, *angle_deg),
            Harmony::AnalogousSpread { offset } => analogous_spread(colors, *offset).concat(),
            Harmony::Triadic => triadic(colors).concat(),
            Harmony::TriadicShift => triadic_shift(colors),
            Harmony::Tetradic { offset1, offset2 } => tetradic(colors, *offset1, *offset2).concat(),
            Harmony::TetradicShift => tetradic_shift(colors),
            Harmony::Monochromatic { factors } => monochromatic(colors, factors).concat(),
            Harmony::MonochromaticStep { adjust_pct } => monochromatic_step(colors, *adjust_pct),
        }
    }

    /// How many colors [`apply`](Self::apply) derives per base color.
    pub fn arity(&self) -> usize {
        match self {
            Harmony::AnalogousSpread { .. } | Harmony::Triadic => 3,
            Harmony::Tetradic { .. } => 4,
            Harmony::Monochromatic { factors } => factors.len(),
            _ => 1,
        }
    }
}

impl FromStr for Harmony {
    type Err = EngineError;

    /// Parse a rule tag into the rule with its default settings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let harmony = match s.trim().to_ascii_lowercase().as_str() {
            "complementary" => Harmony::Complementary,
            "analogous" => Harmony::Analogous {
                angle_deg: rules::ANALOGOUS_ANGLE_DEG,
            },
            "analogous_spread" => Harmony::AnalogousSpread {
                offset: rules::ANALOGOUS_OFFSET,
            },
            "triadic" => Harmony::Triadic,
            "triadic_shift" => Harmony::TriadicShift,
            "tetradic" => Harmony::Tetradic {
                offset1: rules::TETRADIC_OFFSETS.0,
                offset2: rules::TETRADIC_OFFSETS.1,
            },
            "tetradic_shift" => Harmony::TetradicShift,
            "monochromatic" => Harmony::Monochromatic {
                factors: rules::MONOCHROMATIC_FACTORS.to_vec(),
            },
            "monochromatic_step" => Harmony::MonochromaticStep {
                adjust_pct: rules::MONOCHROMATIC_STEP_PCT,
            },
            other => {
                return Err(EngineError::InvalidArgument(format!(
                    "unknown harmony '{other}' (expected one of: {})",
                    Harmony::KINDS.join(", ")
                )))
            }
        };
        Ok(harmony)
    }
}
