pub mod config;

pub use config::{AppConfig, ExportConfig, ExtractionConfig, HarmonyConfig, MockupConfig};
