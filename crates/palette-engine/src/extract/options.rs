//! Extraction options and configuration.
//!
//! This module provides the [`ExtractOptions`] struct for configuring
//! dominant-color extraction.

/// Configuration options for dominant-color extraction.
///
/// # Defaults
///
/// - k: 5 colors
/// - Resize for speed: enabled, down to a longest side of 200 px
/// - Sample size: 10,000 pixels
/// - Restarts: 10, each running at most 300 Lloyd iterations
/// - Seed: 42
///
/// # Example
///
/// ```
/// use palette_engine::ExtractOptions;
///
/// let options = ExtractOptions::new(3)
///     .resize_for_speed(false)
///     .restarts(20);
/// assert_eq!(options.k, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Number of colors to extract. Zero is rejected at extraction time.
    ///
    /// Default: `5`
    pub k: usize,

    /// Downscale images whose longest side exceeds `max_dimension`.
    ///
    /// Default: `true`
    pub resize_for_speed: bool,

    /// Longest side after downscaling.
    ///
    /// Default: `200`
    pub max_dimension: u32,

    /// Pixel count above which a uniform sample without replacement is
    /// clustered instead of the full image.
    ///
    /// Default: `10_000`
    pub sample_size: usize,

    /// Independent k-means++ initializations; the run with the lowest
    /// inertia wins.
    ///
    /// Default: `10`
    pub restarts: usize,

    /// Lloyd iterations per restart.
    ///
    /// Default: `300`
    pub max_iterations: usize,

    /// A restart stops early once the total squared centroid movement drops
    /// to this value.
    ///
    /// Default: `1e-4`
    pub tolerance: f64,

    /// Seed for sampling and initialization.
    ///
    /// Default: `42`
    pub seed: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            k: 5,
            resize_for_speed: true,
            max_dimension: 200,
            sample_size: 10_000,
            restarts: 10,
            max_iterations: 300,
            tolerance: 1e-4,
            seed: 42,
        }
    }
}

impl ExtractOptions {
    /// Default options extracting `k` colors.
    #[inline]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    #[inline]
    pub fn k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    #[inline]
    pub fn resize_for_speed(mut self, enabled: bool) -> Self {
        self.resize_for_speed = enabled;
        self
    }

    #[inline]
    pub fn max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    #[inline]
    pub fn sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Set the number of restarts. Values below 1 are treated as 1.
    #[inline]
    pub fn restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    #[inline]
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[inline]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
