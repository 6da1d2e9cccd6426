//! The palette record: a named, ordered color list plus provenance and a
//! log of the transforms that produced it.
//!
//! # Persisted form
//!
//! ```json
//! {
//!   "name": "Sunset",
//!   "colors": [[255, 94, 77], [255, 179, 71]],
//!   "source_image_path": "photos/sunset.jpg",
//!   "harmony_kind": "",
//!   "parameters": {
//!     "hsv_shift": {"hue_shift_deg": 10.0, "sat_offset_pct": 0.0, "val_offset_pct": 0.0}
//!   },
//!   "saved_path": null
//! }
//! ```
//!
//! On read, every field is optional, a `null` or absent `parameters` becomes
//! an empty map, and unknown fields are ignored. Older files may carry
//! `archived_path` or the Spanish names (`nombre`, `colores`,
//! `origen_imagen_path`, `armonia_tipo`, `parametros`, `archivo_guardado`);
//! these are read as fallbacks, so when both spellings are present the
//! English one wins. Colors are validated on the way in: a record with a
//! malformed color is rejected, never repaired.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::Rgb;
use crate::error::ValidationError;
use crate::harmony::Harmony;
use crate::transform::{adjust_palette, HsvShift};

/// Parameter log: the latest invocation per transform name.
pub type Parameters = Map<String, Value>;

/// Parameter key of the most recent HSV shift.
pub const HSV_SHIFT_KEY: &str = "hsv_shift";
/// Parameter key of the harmony a record was derived with.
pub const HARMONY_KEY: &str = "harmony";
/// Name suffix of records derived by [`PaletteRecord::with_hsv_shift`].
pub const HSV_SHIFT_SUFFIX: &str = " (HSV shift)";
/// Name given to palettes extracted from an image.
pub const FROM_IMAGE_NAME: &str = "Palette from image";

/// A named palette with provenance metadata.
///
/// `colors` is private so every write goes through a validating setter;
/// the remaining fields are free-form metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPaletteRecord")]
pub struct PaletteRecord {
    /// Free-text label.
    pub name: String,
    colors: Vec<Rgb>,
    /// Image the colors were extracted from, empty if none.
    pub source_image_path: String,
    /// Tag of the harmony rule that produced the colors, empty if none.
    pub harmony_kind: String,
    /// Latest parameters per transform name.
    pub parameters: Parameters,
    /// File the record was last written to or read from.
    pub saved_path: Option<String>,
}

/// Lenient shape used for reading; validated into a [`PaletteRecord`].
///
/// Legacy spellings are separate fields rather than serde aliases, so a
/// file carrying both spellings of a field still reads.
#[derive(Debug, Deserialize)]
struct RawPaletteRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    colors: Option<Vec<Value>>,
    #[serde(default)]
    source_image_path: Option<String>,
    #[serde(default)]
    harmony_kind: Option<String>,
    #[serde(default)]
    parameters: Option<Parameters>,
    #[serde(default)]
    saved_path: Option<String>,
    #[serde(flatten)]
    legacy: LegacyFields,
}

#[derive(Debug, Default, Deserialize)]
struct LegacyFields {
    #[serde(default)]
    nombre: Option<String>,
    #[serde(default)]
    colores: Option<Vec<Value>>,
    #[serde(default)]
    origen_imagen_path: Option<String>,
    #[serde(default)]
    armonia_tipo: Option<String>,
    #[serde(default)]
    parametros: Option<Parameters>,
    #[serde(default)]
    archived_path: Option<String>,
    #[serde(default)]
    archivo_guardado: Option<String>,
}

impl TryFrom<RawPaletteRecord> for PaletteRecord {
    type Error = ValidationError;

    fn try_from(raw: RawPaletteRecord) -> Result<Self, Self::Error> {
        let legacy = raw.legacy;
        let colors = raw.colors.or(legacy.colores).unwrap_or_default();
        Ok(Self {
            name: raw.name.or(legacy.nombre).unwrap_or_default(),
            colors: validate_colors(&colors)?,
            source_image_path: raw
                .source_image_path
                .or(legacy.origen_imagen_path)
                .unwrap_or_default(),
            harmony_kind: raw
                .harmony_kind
                .or(legacy.armonia_tipo)
                .unwrap_or_default(),
            parameters: raw.parameters.or(legacy.parametros).unwrap_or_default(),
            saved_path: raw
                .saved_path
                .or(legacy.archived_path)
                .or(legacy.archivo_guardado),
        })
    }
}

/// Validate untyped colors: each must be a list of exactly three integers
/// in 0..=255. The error names the first offending color and its index.
pub fn validate_colors(values: &[Value]) -> Result<Vec<Rgb>, ValidationError> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| Rgb::try_from(value).map_err(|e| e.at(i)))
        .collect()
}

impl PaletteRecord {
    /// A record with no provenance and an empty parameter log.
    pub fn new(name: impl Into<String>, colors: Vec<Rgb>) -> Self {
        Self {
            name: name.into(),
            colors,
            source_image_path: String::new(),
            harmony_kind: String::new(),
            parameters: Parameters::new(),
            saved_path: None,
        }
    }

    /// A record built from untyped colors, validated.
    pub fn try_new(name: impl Into<String>, colors: &[Value]) -> Result<Self, ValidationError> {
        Ok(Self::new(name, validate_colors(colors)?))
    }

    /// A record holding colors extracted from `source_image_path`.
    pub fn from_image(colors: Vec<Rgb>, source_image_path: impl Into<String>) -> Self {
        Self {
            source_image_path: source_image_path.into(),
            ..Self::new(FROM_IMAGE_NAME, colors)
        }
    }

    pub fn with_source(mut self, source_image_path: impl Into<String>) -> Self {
        self.source_image_path = source_image_path.into();
        self
    }

    pub fn with_harmony_kind(mut self, harmony_kind: impl Into<String>) -> Self {
        self.harmony_kind = harmony_kind.into();
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn set_colors(&mut self, colors: Vec<Rgb>) {
        self.colors = colors;
    }

    /// Replace the colors from untyped values. On error the record is left
    /// unchanged.
    pub fn try_set_colors(&mut self, colors: &[Value]) -> Result<(), ValidationError> {
        self.colors = validate_colors(colors)?;
        Ok(())
    }

    /// The record as a plain JSON mapping, colors as `[r, g, b]` lists.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "colors": self.colors.iter().map(|c| c.to_bytes().to_vec()).collect::<Vec<_>>(),
            "source_image_path": self.source_image_path,
            "harmony_kind": self.harmony_kind,
            "parameters": self.parameters,
            "saved_path": self.saved_path,
        })
    }

    /// Read a record from a plain JSON mapping. See the module docs for the
    /// defaults applied.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let raw: RawPaletteRecord =
            serde_json::from_value(value).map_err(|e| ValidationError::MalformedRecord {
                reason: e.to_string(),
            })?;
        Self::try_from(raw)
    }

    /// Shift every color in place and log the shift under `hsv_shift`,
    /// replacing any earlier entry.
    pub fn apply_hsv_shift(
        &mut self,
        hue_shift_deg: f64,
        sat_offset_pct: f64,
        val_offset_pct: f64,
    ) {
        let shift = HsvShift::new(hue_shift_deg, sat_offset_pct, val_offset_pct);
        self.colors = adjust_palette(&self.colors, hue_shift_deg, sat_offset_pct, val_offset_pct);
        self.parameters.insert(
            HSV_SHIFT_KEY.to_string(),
            serde_json::to_value(shift).unwrap_or_default(),
        );
    }

    /// A shifted copy: name suffixed with ` (HSV shift)`, parameter log
    /// copied plus the new `hsv_shift` entry, not saved anywhere yet.
    pub fn with_hsv_shift(
        &self,
        hue_shift_deg: f64,
        sat_offset_pct: f64,
        val_offset_pct: f64,
    ) -> Self {
        let mut derived = Self {
            name: format!("{}{HSV_SHIFT_SUFFIX}", self.name),
            saved_path: None,
            ..self.clone()
        };
        derived.apply_hsv_shift(hue_shift_deg, sat_offset_pct, val_offset_pct);
        derived
    }

    /// A copy whose colors are `harmony` applied to this record's colors,
    /// named `"<name> - <Label>"` and tagged with the harmony kind.
    pub fn with_harmony(&self, harmony: &Harmony) -> Self {
        let mut parameters = self.parameters.clone();
        parameters.insert(
            HARMONY_KEY.to_string(),
            serde_json::to_value(harmony).unwrap_or_default(),
        );
        Self {
            name: format!("{} - {}", self.name, harmony.label()),
            colors: harmony.apply(&self.colors),
            source_image_path: self.source_image_path.clone(),
            harmony_kind: harmony.kind().to_string(),
            parameters,
            saved_path: None,
        }
    }
}
