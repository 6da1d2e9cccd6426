use palette_engine::harmony::rules;
use palette_engine::{ExtractOptions, Harmony};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Dominant-color extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Settings for harmonies chosen by name
    #[serde(default)]
    pub harmony: HarmonyConfig,

    /// Mockup image size
    #[serde(default)]
    pub mockup: MockupConfig,

    /// Export defaults
    #[serde(default)]
    pub export: ExportConfig,
}

/// Configuration for dominant-color extraction
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Colors to extract when none are requested explicitly
    pub colors: usize,
    pub resize_for_speed: bool,
    pub max_dimension: u32,
    pub sample_size: usize,
    pub restarts: usize,
    pub max_iterations: usize,
    pub seed: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        let defaults = ExtractOptions::default();
        Self {
            colors: defaults.k,
            resize_for_speed: defaults.resize_for_speed,
            max_dimension: defaults.max_dimension,
            sample_size: defaults.sample_size,
            restarts: defaults.restarts,
            max_iterations: defaults.max_iterations,
            seed: defaults.seed,
        }
    }
}

/// Configuration for harmony rules
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HarmonyConfig {
    /// Single-step analogous rotation in degrees
    pub analogous_angle_deg: f64,
    /// Analogous spread in turns
    pub analogous_offset: f64,
    /// Tetradic offsets in turns
    pub tetradic_offsets: (f64, f64),
    /// Brightness factors for the monochromatic spread
    pub monochromatic_factors: Vec<f64>,
    /// Value nudge for the single-step monochromatic rule, in percent
    pub monochromatic_step_pct: f64,
}

impl Default for HarmonyConfig {
    fn default() -> Self {
        Self {
            analogous_angle_deg: rules::ANALOGOUS_ANGLE_DEG,
            analogous_offset: rules::ANALOGOUS_OFFSET,
            tetradic_offsets: rules::TETRADIC_OFFSETS,
            monochromatic_factors: rules::MONOCHROMATIC_FACTORS.to_vec(),
            monochromatic_step_pct: rules::MONOCHROMATIC_STEP_PCT,
        }
    }
}

/// Configuration for palette mockups
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MockupConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for MockupConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
        }
    }
}

/// Configuration for exports
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Format used when neither a flag nor the file extension names one
    pub default_format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "json".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the file named by `CONFIG_FILE`, or defaults
    pub fn load() -> Self {
        match std::env::var("CONFIG_FILE").ok().map(PathBuf::from) {
            Some(path) => Self::load_from_path(&path),
            None => {
                tracing::debug!("CONFIG_FILE not set, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from a YAML file, falling back to defaults
    pub fn load_from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        path = %path.display(),
                        colors = config.extraction.colors,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        %e,
                        path = %path.display(),
                        "Failed to parse config, using defaults"
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Extraction options for `k` colors, or the configured count
    pub fn extract_options(&self, k: Option<usize>) -> ExtractOptions {
        let e = &self.extraction;
        ExtractOptions::new(k.unwrap_or(e.colors))
            .resize_for_speed(e.resize_for_speed)
            .max_dimension(e.max_dimension)
            .sample_size(e.sample_size)
            .restarts(e.restarts)
            .max_iterations(e.max_iterations)
            .seed(e.seed)
    }

    /// Resolve a harmony name using the configured settings
    pub fn harmony(&self, kind: &str) -> Result<Harmony, palette_engine::EngineError> {
        let h = &self.harmony;
        let harmony = match kind.parse::<Harmony>()? {
            Harmony::Analogous { .. } => Harmony::Analogous {
                angle_deg: h.analogous_angle_deg,
            },
            Harmony::AnalogousSpread { .. } => Harmony::AnalogousSpread {
                offset: h.analogous_offset,
            },
            Harmony::Tetradic { .. } => Harmony::Tetradic {
                offset1: h.tetradic_offsets.0,
                offset2: h.tetradic_offsets.1,
            },
            Harmony::Monochromatic { .. } => Harmony::Monochromatic {
                factors: h.monochromatic_factors.clone(),
            },
            Harmony::MonochromaticStep { .. } => Harmony::MonochromaticStep {
                adjust_pct: h.monochromatic_step_pct,
            },
            other => other,
        };
        Ok(harmony)
    }
}
