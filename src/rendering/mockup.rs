use crate::error::{AppError, RenderError};
use palette_engine::{Rgb, ValidationError};
use std::io::Cursor;
use tiny_skia::{Color, Paint, Pixmap, Rect, Transform};

/// Renders a palette as side-by-side vertical color blocks.
///
/// Each block is `width / n` pixels wide; the last one also takes the
/// remainder. 1-px black separators sit on every inner block boundary.
/// An empty palette gives a plain white image.
pub struct MockupRenderer {
    width: u32,
    height: u32,
}

impl MockupRenderer {
    pub fn new(width: u32, height: u32) -> Result<Self, ValidationError> {
        if width == 0 || height == 0 {
            return Err(ValidationError::InvalidSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rasterize the palette to an RGBA pixmap
    pub fn render(&self, colors: &[Rgb]) -> Result<Pixmap, RenderError> {
        let mut pixmap =
            Pixmap::new(self.width, self.height).ok_or(RenderError::PixmapAllocation)?;
        pixmap.fill(Color::WHITE);

        let n = colors.len() as u32;
        if n == 0 {
            return Ok(pixmap);
        }

        let block = self.width / n;
        let mut paint = Paint {
            anti_alias: false,
            ..Default::default()
        };
        for (i, color) in colors.iter().enumerate() {
            let x0 = i as u32 * block;
            let x1 = if i as u32 == n - 1 { self.width } else { x0 + block };
            if x1 <= x0 {
                continue;
            }
            paint.set_color_rgba8(color.r, color.g, color.b, 255);
            let rect = Rect::from_xywh(x0 as f32, 0.0, (x1 - x0) as f32, self.height as f32);
            if let Some(rect) = rect {
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }

        if block == 0 {
            return Ok(pixmap);
        }
        paint.set_color_rgba8(0, 0, 0, 255);
        for x in (1..n).map(|i| i * block) {
            if let Some(rect) = Rect::from_xywh(x as f32, 0.0, 1.0, self.height as f32) {
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }

        Ok(pixmap)
    }

    /// Render the palette and encode it as an RGB PNG
    pub fn render_png(&self, colors: &[Rgb]) -> Result<Vec<u8>, AppError> {
        let pixmap = self.render(colors)?;
        // Opaque throughout, so premultiplication is a no-op: drop alpha
        let rgb: Vec<u8> = pixmap
            .data()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        let png_bytes = encode_png(self.width, self.height, &rgb)?;

        let optimized = oxipng::optimize_from_memory(
            &png_bytes,
            &oxipng::Options {
                strip: oxipng::StripChunks::Safe,
                optimize_alpha: false,
                ..Default::default()
            },
        )
        .unwrap_or(png_bytes);
        tracing::debug!(
            width = self.width,
            height = self.height,
            colors = colors.len(),
            bytes = optimized.len(),
            "Rendered mockup"
        );
        Ok(optimized)
    }
}

fn encode_png(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgb)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
