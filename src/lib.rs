//! Divergesia - palettes from images
//!
//! Headless application around `palette_engine`: configuration, image
//! loading, palette files, exports, background extraction and mockups.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
