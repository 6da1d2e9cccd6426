use crate::error::AppError;
use crate::services::palette_io;
use palette_engine::PaletteRecord;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Export file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// The palette file itself (same as saving)
    #[default]
    Json,
    /// A `:root` block of `--color-N` custom properties
    Css,
    /// `R,G,B,Hex` rows
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Json, ExportFormat::Css, ExportFormat::Csv];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Css => "css",
            ExportFormat::Csv => "csv",
        }
    }

    /// Infer the format from a file extension; anything unknown is JSON.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportFormat::ALL
            .into_iter()
            .find(|format| s.trim().eq_ignore_ascii_case(format.extension()))
            .ok_or_else(|| AppError::UnsupportedFormat(s.to_string()))
    }
}

/// CSS custom properties, one per color, 1-based.
pub fn render_css(record: &PaletteRecord) -> String {
    let mut out = format!("/* Palette: {} */\n:root {{\n", record.name);
    for (i, color) in record.colors().iter().enumerate() {
        out.push_str(&format!("  --color-{}: {};\n", i + 1, color.to_hex()));
    }
    out.push_str("}\n");
    out
}

/// CSV with a `R,G,B,Hex` header. Rows end in CRLF.
pub fn render_csv(record: &PaletteRecord) -> String {
    let mut out = String::from("R,G,B,Hex\r\n");
    for color in record.colors() {
        out.push_str(&format!(
            "{},{},{},{}\r\n",
            color.r,
            color.g,
            color.b,
            color.to_hex()
        ));
    }
    out
}

/// Write `record` to `path` in `format`.
///
/// JSON goes through [`palette_io::save_palette`] and therefore updates
/// `saved_path`; CSS and CSV leave the record untouched.
pub fn export(
    record: &mut PaletteRecord,
    path: &Path,
    format: ExportFormat,
) -> Result<(), AppError> {
    match format {
        ExportFormat::Json => return palette_io::save_palette(record, path),
        ExportFormat::Css => std::fs::write(path, render_css(record))?,
        ExportFormat::Csv => std::fs::write(path, render_csv(record))?,
    }
    tracing::info!(path = %path.display(), %format, "Exported palette");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette_engine::Rgb;
    use pretty_assertions::assert_eq;

    fn record() -> PaletteRecord {
        PaletteRecord::new("Warm", vec![Rgb::new(255, 94, 77), Rgb::new(10, 171, 255)])
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("CSS".parse::<ExportFormat>().unwrap(), ExportFormat::Css);
        assert_eq!(" Csv ".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);

        let err = "xml".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(ref f) if f == "xml"), "{err:?}");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("a/b.CSS")), ExportFormat::Css);
        assert_eq!(ExportFormat::from_path(Path::new("b.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("b.txt")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("noext")), ExportFormat::Json);
    }

    #[test]
    fn test_render_css() {
        assert_eq!(
            render_css(&record()),
            "/* Palette: Warm */\n:root {\n  --color-1: #FF5E4D;\n  --color-2: #0AABFF;\n}\n"
        );
    }

    #[test]
    fn test_render_csv() {
        assert_eq!(
            render_csv(&record()),
            "R,G,B,Hex\r\n255,94,77,#FF5E4D\r\n10,171,255,#0AABFF\r\n"
        );
    }

    #[test]
    fn test_empty_palette_exports() {
        let empty = PaletteRecord::new("Empty", Vec::new());
        assert_eq!(render_csv(&empty), "R,G,B,Hex\r\n");
        assert_eq!(render_css(&empty), "/* Palette: Empty */\n:root {\n}\n");
    }

    #[test]
    fn test_export_css_keeps_saved_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warm.css");
        let mut rec = record();

        export(&mut rec, &path, ExportFormat::Css).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), render_css(&rec));
        assert_eq!(rec.saved_path, None);
    }

    #[test]
    fn test_export_json_sets_saved_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warm.json");
        let mut rec = record();

        export(&mut rec, &path, ExportFormat::Json).unwrap();
        assert_eq!(rec.saved_path, Some(path.display().to_string()));
        let loaded = palette_io::load_palette(&path).unwrap();
        assert_eq!(loaded.colors(), rec.colors());
    }
}
