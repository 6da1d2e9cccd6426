//! Error types for the palette engine.
//!
//! Two kinds of failure exist: a [`ValidationError`] when a value handed to
//! the engine is malformed (a color with the wrong shape or an out-of-range
//! channel, a pixel buffer whose size does not add up), and an
//! [`EngineError::InvalidArgument`] when a well-formed value asks for
//! something the engine cannot do (zero clusters, an empty image).

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// A malformed color, color list or pixel buffer.
///
/// Raised at construction or mutation boundaries; the engine never coerces
/// an invalid value into a valid one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A color was not given as a sequence of channels at all.
    #[error("invalid color {value}: expected a list of 3 channels")]
    NotASequence { value: String },

    /// A color did not have exactly three channels.
    #[error("invalid color {value}: expected 3 channels, got {len}")]
    WrongChannelCount { value: String, len: usize },

    /// A channel was not an integer (e.g. a float or a string).
    #[error("invalid color {value}: channels must be integers")]
    NonIntegerChannel { value: String },

    /// A channel was outside 0..=255.
    #[error("invalid color {value}: channels must be in 0-255")]
    ChannelOutOfRange { value: String },

    /// A color inside a list failed validation.
    #[error("color #{index} is invalid: {source}")]
    InList {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },

    /// Pixel data length does not match `width * height * channels`.
    #[error("pixel buffer size mismatch: {width}x{height} needs {expected} bytes, got {actual}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// A width or height of zero where an image is required.
    #[error("invalid size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// A palette record whose structure cannot be read (e.g. `name` is a number).
    #[error("malformed palette record: {reason}")]
    MalformedRecord { reason: String },
}

impl ValidationError {
    /// Attach the position of the offending color in its list.
    pub fn at(self, index: usize) -> Self {
        ValidationError::InList {
            index,
            source: Box::new(self),
        }
    }
}

/// Unified error type for the engine's public API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Well-formed input the operation cannot work with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
