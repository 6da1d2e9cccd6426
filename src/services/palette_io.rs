//! Palette files: one record per file, or a collection as a bare JSON array.

use crate::error::AppError;
use palette_engine::PaletteRecord;
use serde_json::Value;
use std::path::Path;

/// Write one record as pretty JSON and remember where it went.
///
/// `saved_path` is set only after the write succeeded; the file itself
/// carries the previous value.
pub fn save_palette(record: &mut PaletteRecord, path: &Path) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(&record.to_value())?;
    std::fs::write(path, json)?;
    record.saved_path = Some(path.display().to_string());
    tracing::info!(path = %path.display(), name = %record.name, "Saved palette");
    Ok(())
}

/// Read one record; its `saved_path` becomes `path` whatever the file said.
pub fn load_palette(path: &Path) -> Result<PaletteRecord, AppError> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    let mut record = PaletteRecord::from_value(value)?;
    record.saved_path = Some(path.display().to_string());
    tracing::debug!(path = %path.display(), colors = record.colors().len(), "Loaded palette");
    Ok(record)
}

/// Write records as a JSON array. Members' `saved_path` is left alone.
pub fn save_collection(records: &[PaletteRecord], path: &Path) -> Result<(), AppError> {
    let values: Vec<Value> = records.iter().map(PaletteRecord::to_value).collect();
    std::fs::write(path, serde_json::to_string_pretty(&values)?)?;
    tracing::info!(path = %path.display(), count = records.len(), "Saved palette collection");
    Ok(())
}

/// Read a JSON array of records. The first invalid member fails the load.
pub fn load_collection(path: &Path) -> Result<Vec<PaletteRecord>, AppError> {
    let content = std::fs::read_to_string(path)?;
    let values: Vec<Value> = serde_json::from_str(&content)?;
    let records = values
        .into_iter()
        .enumerate()
        .map(|(i, value)| PaletteRecord::from_value(value).map_err(|e| e.at(i)))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(path = %path.display(), count = records.len(), "Loaded palette collection");
    Ok(records)
}
