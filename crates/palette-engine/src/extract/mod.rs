//! Dominant-color extraction.
//!
//! Reduces an image's pixel population to `k` representative colors:
//!
//! 1. Optionally downscale so the longest side is at most `max_dimension`
//!    (Lanczos3). This only bounds the cost; smooth images keep their palette.
//! 2. If the image has fewer distinct colors than `k`, return those colors
//!    (sorted) without clustering or padding.
//! 3. If there are more than `sample_size` pixels, draw a uniform sample of
//!    exactly `sample_size` pixels without replacement. The distinct-color
//!    check above looks at the whole image, not the sample: a sample with
//!    fewer than `k` distinct colors still yields `k` colors, some of them
//!    repeated.
//! 4. Run seeded k-means++ with restarts and keep the lowest-inertia run.
//! 5. Round each centroid to the nearest integer per channel, clamp to
//!    0..=255 and order by cluster population (largest first, ties by color).
//!
//! Sampling and clustering draw from one RNG seeded with
//! [`ExtractOptions::seed`], so a given image and option set always yields
//! the same palette.

mod kmeans;
mod options;
mod pixels;

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::Rgb;
use crate::error::EngineError;

use kmeans::{KMeansParams, WeightedPoint};
pub use options::ExtractOptions;
pub use pixels::PixelBuffer;

/// Extract `k` dominant colors with default sampling and clustering settings.
///
/// # Errors
///
/// [`EngineError::InvalidArgument`] if `k` is zero or the image has no pixels.
///
/// # Example
///
/// ```
/// use palette_engine::{extract_dominant_colors, PixelBuffer, Rgb};
///
/// let mut colors = vec![Rgb::new(255, 0, 0); 8];
/// colors.extend(vec![Rgb::new(0, 0, 255); 8]);
/// let pixels = PixelBuffer::from_colors(4, 4, &colors).unwrap();
///
/// let palette = extract_dominant_colors(&pixels, 2, false, 200).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert!(palette.contains(&Rgb::new(255, 0, 0)));
/// assert!(palette.contains(&Rgb::new(0, 0, 255)));
/// ```
pub fn extract_dominant_colors(
    pixels: &PixelBuffer,
    k: usize,
    resize_for_speed: bool,
    max_dimension: u32,
) -> Result<Vec<Rgb>, EngineError> {
    let options = ExtractOptions::new(k)
        .resize_for_speed(resize_for_speed)
        .max_dimension(max_dimension);
    extract_with_options(pixels, &options)
}

/// Extract dominant colors with full control over the pipeline.
///
/// # Errors
///
/// [`EngineError::InvalidArgument`] if `options.k` is zero or the image has
/// no pixels.
pub fn extract_with_options(
    pixels: &PixelBuffer,
    options: &ExtractOptions,
) -> Result<Vec<Rgb>, EngineError> {
    let k = options.k;
    if k == 0 {
        return Err(EngineError::InvalidArgument("number of colors must be positive".to_string()));
    }
    if pixels.is_empty() {
        return Err(EngineError::InvalidArgument("pixel data is empty".to_string()));
    }

    let longest = pixels.width().max(pixels.height());
    let resized;
    let source = if options.resize_for_speed && longest > options.max_dimension {
        resized = pixels.clone().downscaled(options.max_dimension);
        &resized
    } else {
        pixels
    };

    let all: Vec<Rgb> = source.pixels().collect();
    let distinct = histogram(all.iter().copied());
    if distinct.len() < k {
        tracing::debug!(
            distinct = distinct.len(),
            k,
            "Fewer distinct colors than requested, skipping clustering"
        );
        return Ok(distinct.into_keys().collect());
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let sample = if all.len() > options.sample_size && options.sample_size > 0 {
        let picked = rand::seq::index::sample(&mut rng, all.len(), options.sample_size);
        histogram(picked.into_iter().map(|i| all[i]))
    } else {
        distinct
    };

    let points: Vec<WeightedPoint> = sample
        .iter()
        .map(|(color, &count)| WeightedPoint {
            pos: [f64::from(color.r), f64::from(color.g), f64::from(color.b)],
            weight: count as f64,
        })
        .collect();

    let params = KMeansParams {
        k,
        restarts: options.restarts,
        max_iterations: options.max_iterations,
        tolerance: options.tolerance,
    };
    let clustering = kmeans::kmeans(&points, &params, &mut rng);
    tracing::debug!(
        pixels = all.len(),
        sampled_colors = points.len(),
        k,
        inertia = clustering.inertia,
        "Clustered pixels"
    );

    let mut ranked: Vec<(Rgb, f64)> = clustering
        .centroids
        .iter()
        .map(|c| Rgb::new(round_channel(c[0]), round_channel(c[1]), round_channel(c[2])))
        .zip(clustering.populations)
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    Ok(ranked.into_iter().map(|(color, _)| color).collect())
}

/// Count occurrences per color, ordered by color.
fn histogram(colors: impl Iterator<Item = Rgb>) -> BTreeMap<Rgb, usize> {
    let mut counts = BTreeMap::new();
    for color in colors {
        *counts.entry(color).or_insert(0) += 1;
    }
    counts
}

#[inline]
fn round_channel(x: f64) -> u8 {
    x.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const GREEN: Rgb = Rgb::new(0, 255, 0);

    fn split_image(width: u32, height: u32, left: Rgb, right: Rgb) -> PixelBuffer {
        let colors: Vec<Rgb> = (0..height)
            .flat_map(|_| (0..width).map(move |x| if x < width / 2 { left } else { right }))
            .collect();
        PixelBuffer::from_colors(width, height, &colors).unwrap()
    }

    #[test]
    fn test_two_region_image() {
        let pixels = split_image(100, 100, RED, GREEN);
        let colors = extract_dominant_colors(&pixels, 2, false, 200).unwrap();
        let found: HashSet<Rgb> = colors.into_iter().collect();
        assert_eq!(found, HashSet::from([RED, GREEN]));
    }

    #[test]
    fn test_population_order() {
        // 3/4 green, 1/4 red
        let mut colors = vec![RED; 25];
        colors.extend(vec![GREEN; 75]);
        let pixels = PixelBuffer::from_colors(10, 10, &colors).unwrap();
        let result = extract_dominant_colors(&pixels, 2, false, 200).unwrap();
        assert_eq!(result, vec![GREEN, RED]);
    }

    #[test]
    fn test_fewer_distinct_than_k_returns_distinct_sorted() {
        let pixels = split_image(10, 10, GREEN, RED);
        let result = extract_dominant_colors(&pixels, 5, false, 200).unwrap();
        assert_eq!(result, vec![GREEN, RED], "no padding up to k");

        let flat = PixelBuffer::new(3, 3, vec![7; 27]).unwrap();
        assert_eq!(
            extract_dominant_colors(&flat, 2, true, 200).unwrap(),
            vec![Rgb::new(7, 7, 7)]
        );
    }

    #[test]
    fn test_exactly_k_distinct_colors_are_recovered() {
        let palette = [RED, GREEN, Rgb::new(0, 0, 255), Rgb::WHITE];
        let colors: Vec<Rgb> = (0..64).map(|i| palette[i % 4]).collect();
        let pixels = PixelBuffer::from_colors(8, 8, &colors).unwrap();
        let result = extract_dominant_colors(&pixels, 4, false, 200).unwrap();
        let found: HashSet<Rgb> = result.into_iter().collect();
        assert_eq!(found, palette.into_iter().collect());
    }

    #[test]
    fn test_zero_k_is_invalid() {
        let pixels = split_image(4, 4, RED, GREEN);
        let err = extract_dominant_colors(&pixels, 0, false, 200).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)), "{err:?}");
    }

    #[test]
    fn test_empty_pixels_is_invalid() {
        let pixels = PixelBuffer::new(0, 0, Vec::new()).unwrap();
        let err = extract_dominant_colors(&pixels, 3, false, 200).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)), "{err:?}");
    }

    #[test]
    fn test_returns_exactly_k_with_sampling() {
        // 150x100 gradient: 15,000 pixels triggers sampling
        let colors: Vec<Rgb> = (0..100u32)
            .flat_map(|y| (0..150u32).map(move |x| Rgb::new(x as u8, y as u8, 128)))
            .collect();
        let pixels = PixelBuffer::from_colors(150, 100, &colors).unwrap();
        let options = ExtractOptions::new(6).resize_for_speed(false).restarts(2);
        let result = extract_with_options(&pixels, &options).unwrap();
        assert_eq!(result.len(), 6);
        assert!(result.iter().all(|c| c.b == 128));
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let colors: Vec<Rgb> = (0..400u32)
            .map(|i| Rgb::new((i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8))
            .collect();
        let pixels = PixelBuffer::from_colors(20, 20, &colors).unwrap();
        let options = ExtractOptions::new(5).restarts(3);
        let first = extract_with_options(&pixels, &options).unwrap();
        let second = extract_with_options(&pixels, &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resize_keeps_flat_regions() {
        let pixels = split_image(400, 300, RED, GREEN);
        let result = extract_dominant_colors(&pixels, 2, true, 200).unwrap();
        // Lanczos rings at the seam but the two halves dominate
        for expected in [RED, GREEN] {
            assert!(
                result.iter().any(|c| {
                    let d = (i32::from(c.r) - i32::from(expected.r)).abs()
                        + (i32::from(c.g) - i32::from(expected.g)).abs()
                        + (i32::from(c.b) - i32::from(expected.b)).abs();
                    d <= 30
                }),
                "{expected} missing from {result:?}"
            );
        }
    }

    #[test]
    fn test_sample_poorer_than_image_repeats_colors() {
        // Two distinct colors in the image, but a one-pixel sample holds only
        // one of them: both clusters seed on it
        let pixels = split_image(10, 10, RED, GREEN);
        let options = ExtractOptions::new(2)
            .resize_for_speed(false)
            .sample_size(1);
        let result = extract_with_options(&pixels, &options).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0], result[1], "{result:?}");
        assert!(result[0] == RED || result[0] == GREEN, "{result:?}");
    }
}
