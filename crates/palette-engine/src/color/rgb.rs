//! 8-bit RGB color type.
//!
//! `Rgb` is the durable color representation: what images are made of, what
//! palettes store and what files persist. Every channel is a `u8`, so a value
//! of this type is valid by construction. Untyped input (integers from a
//! caller, JSON values from a file) must go through one of the fallible
//! conversions, which reject a wrong channel count, non-integer channels and
//! channels outside 0..=255.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{ParseColorError, ValidationError};

/// A color as three 8-bit channels.
///
/// Equality is structural. Ordering is lexicographic over `(r, g, b)`, which
/// is what callers get when they sort or deduplicate colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from 8-bit channels.
    ///
    /// # Example
    /// ```
    /// use palette_engine::Rgb;
    /// let red = Rgb::new(255, 0, 0);
    /// assert_eq!(red.to_bytes(), [255, 0, 0]);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Create a color from wide integer channels, validating the range.
    ///
    /// # Errors
    ///
    /// [`ValidationError::ChannelOutOfRange`] if any channel is outside 0..=255.
    pub fn from_channels(r: i64, g: i64, b: i64) -> Result<Self, ValidationError> {
        let channel = |c: i64| {
            u8::try_from(c).map_err(|_| ValidationError::ChannelOutOfRange {
                value: format!("({r}, {g}, {b})"),
            })
        };
        Ok(Self::new(channel(r)?, channel(g)?, channel(b)?))
    }

    /// Uppercase `#RRGGBB` notation, as used by the CSV and CSS exports.
    ///
    /// ```
    /// use palette_engine::Rgb;
    /// assert_eq!(Rgb::new(10, 171, 255).to_hex(), "#0AABFF");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Whether all three channels are equal (black, white and the greys).
    #[inline]
    pub fn is_grey(self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(c: Rgb) -> Self {
        (c.r, c.g, c.b)
    }
}

impl TryFrom<(i64, i64, i64)> for Rgb {
    type Error = ValidationError;

    fn try_from((r, g, b): (i64, i64, i64)) -> Result<Self, Self::Error> {
        Self::from_channels(r, g, b)
    }
}

impl TryFrom<&[i64]> for Rgb {
    type Error = ValidationError;

    fn try_from(channels: &[i64]) -> Result<Self, Self::Error> {
        match *channels {
            [r, g, b] => Self::from_channels(r, g, b),
            _ => Err(ValidationError::WrongChannelCount {
                value: format!("{channels:?}"),
                len: channels.len(),
            }),
        }
    }
}

impl TryFrom<&Value> for Rgb {
    type Error = ValidationError;

    /// Validate a JSON value as a color: an array of exactly three integers
    /// in 0..=255. Floats are rejected even when integral (`10.0`).
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let Value::Array(items) = value else {
            return Err(ValidationError::NotASequence {
                value: value.to_string(),
            });
        };
        if items.len() != 3 {
            return Err(ValidationError::WrongChannelCount {
                value: value.to_string(),
                len: items.len(),
            });
        }

        let mut bytes = [0u8; 3];
        for (slot, item) in bytes.iter_mut().zip(items) {
            let Value::Number(n) = item else {
                return Err(ValidationError::NonIntegerChannel {
                    value: value.to_string(),
                });
            };
            if !(n.is_i64() || n.is_u64()) {
                return Err(ValidationError::NonIntegerChannel {
                    value: value.to_string(),
                });
            }
            *slot = n
                .as_u64()
                .and_then(|c| u8::try_from(c).ok())
                .ok_or_else(|| ValidationError::ChannelOutOfRange {
                    value: value.to_string(),
                })?;
        }
        Ok(Self::from_bytes(bytes))
    }
}

impl TryFrom<Value> for Rgb {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

// Persisted as a plain `[r, g, b]` list for format portability.
impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.to_bytes())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Rgb::try_from(&value).map_err(serde::de::Error::custom)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a hex color: `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`.
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// ```
    /// use palette_engine::Rgb;
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: 0xF * 17 == 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
