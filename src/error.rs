use palette_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<palette_engine::ValidationError> for AppError {
    fn from(e: palette_engine::ValidationError) -> Self {
        AppError::Engine(EngineError::Validation(e))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Task(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}
