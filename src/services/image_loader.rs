use crate::error::AppError;
use palette_engine::PixelBuffer;
use std::path::Path;

/// Decode an image file into RGB pixel data.
///
/// The format is sniffed from the file contents, so a misnamed extension
/// still decodes. Alpha, palette and grey images are flattened to RGB.
pub fn load_pixels(path: &Path) -> Result<PixelBuffer, AppError> {
    let image = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "Decoded image"
    );
    Ok(PixelBuffer::from_dynamic(&image))
}

/// Decode an in-memory encoded image into RGB pixel data.
pub fn decode_pixels(bytes: &[u8]) -> Result<PixelBuffer, AppError> {
    let image = image::load_from_memory(bytes)?;
    Ok(PixelBuffer::from_dynamic(&image))
}
