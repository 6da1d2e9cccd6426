//! Raw 8-bit RGB pixel data, the input boundary of extraction.

use image::{imageops, imageops::FilterType, DynamicImage, RgbImage};

use crate::color::Rgb;
use crate::error::ValidationError;

/// A decoded image as tightly packed 8-bit RGB, row-major.
///
/// The length of `data` is always `width * height * 3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

fn expected_len(width: u32, height: u32, channels: usize) -> usize {
    width as usize * height as usize * channels
}

impl PixelBuffer {
    /// Wrap packed RGB bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ValidationError> {
        let expected = expected_len(width, height, 3);
        if data.len() != expected {
            return Err(ValidationError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from packed RGBA bytes, discarding alpha.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, ValidationError> {
        let expected = expected_len(width, height, 4);
        if rgba.len() != expected {
            return Err(ValidationError::BufferSize {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        let data = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from colors in row-major order.
    pub fn from_colors(width: u32, height: u32, colors: &[Rgb]) -> Result<Self, ValidationError> {
        let data = colors.iter().flat_map(|c| c.to_bytes()).collect();
        Self::new(width, height, data)
    }

    /// Flatten any decoded image (grey, palette, alpha, 16-bit) to 8-bit RGB.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self::from(image.to_rgb8())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over the pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data
            .chunks_exact(3)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
    }

    /// Downscale so the longest side is at most `max_dimension`, keeping the
    /// aspect ratio (Lanczos3). Images already small enough are returned
    /// as-is.
    pub fn downscaled(self, max_dimension: u32) -> Self {
        let longest = self.width.max(self.height);
        if max_dimension == 0 || longest <= max_dimension {
            return self;
        }
        let scale = f64::from(max_dimension) / f64::from(longest);
        let width = ((f64::from(self.width) * scale) as u32).max(1);
        let height = ((f64::from(self.height) * scale) as u32).max(1);

        let (src_width, src_height) = (self.width, self.height);
        match RgbImage::from_raw(src_width, src_height, self.data) {
            Some(img) => {
                tracing::debug!(
                    from_width = src_width,
                    from_height = src_height,
                    width,
                    height,
                    "Downscaling image for extraction"
                );
                Self::from(imageops::resize(&img, width, height, FilterType::Lanczos3))
            }
            // Unreachable: the length invariant is checked at construction.
            None => Self {
                width: 0,
                height: 0,
                data: Vec::new(),
            },
        }
    }
}

impl From<RgbImage> for PixelBuffer {
    fn from(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

impl From<PixelBuffer> for RgbImage {
    fn from(buffer: PixelBuffer) -> Self {
        RgbImage::from_raw(buffer.width, buffer.height, buffer.data)
            .unwrap_or_else(|| RgbImage::new(0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_new_checks_length() {
        assert!(PixelBuffer::new(2, 2, vec![0; 12]).is_ok());
        let err = PixelBuffer::new(2, 2, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::BufferSize {
                width: 2,
                height: 2,
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_empty_buffer_is_valid() {
        let buffer = PixelBuffer::new(0, 0, Vec::new()).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn test_from_rgba_discards_alpha() {
        let rgba = [10, 20, 30, 0, 40, 50, 60, 255];
        let buffer = PixelBuffer::from_rgba(2, 1, &rgba).unwrap();
        assert_eq!(buffer.as_bytes(), &[10, 20, 30, 40, 50, 60]);
        assert!(PixelBuffer::from_rgba(2, 1, &rgba[..7]).is_err());
    }

    #[test]
    fn test_from_dynamic_flattens_alpha() {
        let mut img = RgbaImage::new(1, 1);
        img.put_pixel(0, 0, Rgba([1, 2, 3, 4]));
        let buffer = PixelBuffer::from_dynamic(&DynamicImage::ImageRgba8(img));
        assert_eq!(buffer.pixels().collect::<Vec<_>>(), vec![Rgb::new(1, 2, 3)]);
    }

    #[test]
    fn test_downscale_keeps_aspect_ratio() {
        let buffer = PixelBuffer::new(400, 100, vec![128; 400 * 100 * 3]).unwrap();
        let small = buffer.downscaled(200);
        assert_eq!((small.width(), small.height()), (200, 50));
        // A flat image stays flat under Lanczos
        assert!(small.pixels().all(|px| px == Rgb::new(128, 128, 128)));
    }

    #[test]
    fn test_downscale_noop_when_small() {
        let buffer = PixelBuffer::new(10, 20, vec![0; 600]).unwrap();
        let same = buffer.clone().downscaled(200);
        assert_eq!(same, buffer);
    }

    #[test]
    fn test_downscale_never_reaches_zero() {
        let buffer = PixelBuffer::new(1000, 1, vec![0; 3000]).unwrap();
        let small = buffer.downscaled(10);
        assert_eq!((small.width(), small.height()), (10, 1));
    }
}
