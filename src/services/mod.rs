pub mod exporter;
pub mod extraction;
pub mod image_loader;
pub mod palette_io;

pub use exporter::{export, ExportFormat};
pub use extraction::{ExtractionOutcome, ExtractionService, PendingExtraction, RequestToken};
pub use image_loader::{decode_pixels, load_pixels};
pub use palette_io::{load_collection, load_palette, save_collection, save_palette};
