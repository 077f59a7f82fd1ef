//! Sheet configuration module.
//!
//! Settings come from three layers, each merged key by key over the one below:
//!
//! ```text
//! stock defaults        ← SheetConfig::default()
//! config.toml           ← user file in the --config directory
//! command-line flags    ← Overrides
//! ```
//!
//! Every layer is a `toml::Value`, so a layer may set a single key of a
//! section (`[photo] width = 51`) and inherit the rest. The merged table is
//! deserialised and validated once, after the last layer.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [page]
//! preset = "A4"            # A3, A4, A5, Letter, 4x6, 5x7, Custom
//!
//! [custom_page]
//! width = 100.0            # Millimetres, used when preset = "Custom"
//! height = 150.0
//!
//! [photo]
//! width = 35.0             # Millimetres
//! height = 45.0
//!
//! [export]
//! background = "#ffffff"   # Replaces transparent pixels of the cutout
//! quality = 90             # JPEG quality (1-100)
//! sheets = 1               # Identical pages in a PDF export
//! ```
//!
//! Unknown keys are rejected to catch typos early. This is the only place
//! user-supplied sizes are validated; the layout engine trusts its inputs.
//! Output densities are not configurable: see [`crate::units::Resolution`].

use crate::imaging::{Color, ExportSettings, Quality};
use crate::pages::{PagePreset, PageRegistry, PhysicalSize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Largest accepted page side, in millimetres.
pub const MAX_PAGE_MM: f64 = 2000.0;
/// Smallest accepted photo side, in millimetres.
pub const MIN_PHOTO_MM: f64 = 1.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Sheet configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    /// Which page preset to lay out on.
    pub page: PageConfig,
    /// Size of the `Custom` page preset.
    pub custom_page: PhysicalSize,
    /// Target photo size.
    pub photo: PhysicalSize,
    /// Export settings.
    pub export: ExportConfig,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            custom_page: PhysicalSize::new(100.0, 150.0),
            photo: PhysicalSize::new(35.0, 45.0),
            export: ExportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Preset name, matched case-insensitively.
    pub preset: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            preset: PagePreset::A4.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Hex colour placed behind the background-removed subject.
    pub background: String,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Number of identical pages in a PDF export.
    pub sheets: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            quality: 90,
            sheets: 1,
        }
    }
}

/// Check a millimetre size against `[min, max]` on both sides.
fn validate_size(key: &str, size: PhysicalSize, min: f64, max: f64) -> Result<(), ConfigError> {
    if !size.is_valid() {
        return Err(ConfigError::Validation(format!(
            "{key} width and height must be positive"
        )));
    }
    if size.width < min || size.height < min || size.width > max || size.height > max {
        return Err(ConfigError::Validation(format!(
            "{key} sides must be between {min} and {max} mm, got {size}"
        )));
    }
    Ok(())
}

impl SheetConfig {
    /// Validate config values are within acceptable ranges.
    ///
    /// The size bounds keep every layout to a few hundred thousand cells.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_size("custom_page", self.custom_page, f64::MIN_POSITIVE, MAX_PAGE_MM)?;
        validate_size("photo", self.photo, MIN_PHOTO_MM, MAX_PAGE_MM)?;
        self.page_preset()?;
        self.background()?;
        if !(1..=100).contains(&self.export.quality) {
            return Err(ConfigError::Validation(
                "export.quality must be 1-100".into(),
            ));
        }
        if self.export.sheets == 0 {
            return Err(ConfigError::Validation(
                "export.sheets must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn page_preset(&self) -> Result<PagePreset, ConfigError> {
        self.page
            .preset
            .parse()
            .map_err(|e| ConfigError::Validation(format!("page.preset: {e}")))
    }

    pub fn background(&self) -> Result<Color, ConfigError> {
        self.export
            .background
            .parse()
            .map_err(|e| ConfigError::Validation(format!("export.background: {e}")))
    }

    /// Page registry with this config's custom size.
    pub fn registry(&self) -> PageRegistry {
        PageRegistry::new(self.custom_page)
    }

    pub fn export_settings(&self) -> Result<ExportSettings, ConfigError> {
        Ok(ExportSettings {
            background: self.background()?,
            quality: Quality::new(self.export.quality),
            sheets: self.export.sheets,
        })
    }
}

// =============================================================================
// Command-line layer
// =============================================================================

/// Values given on the command line, merged over `config.toml`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub page: Option<String>,
    /// Also selects the Custom preset unless `page` is set.
    pub custom_page: Option<PhysicalSize>,
    pub photo: Option<PhysicalSize>,
    pub background: Option<String>,
    pub quality: Option<u32>,
    pub sheets: Option<u32>,
}

fn size_table(size: PhysicalSize) -> toml::Value {
    let mut table = toml::Table::new();
    table.insert("width".into(), toml::Value::Float(size.width));
    table.insert("height".into(), toml::Value::Float(size.height));
    toml::Value::Table(table)
}

impl Overrides {
    /// Render the set flags as a sparse TOML table. Unset flags are absent,
    /// so they never mask a value from a lower layer.
    pub fn to_toml(&self) -> toml::Value {
        let mut root = toml::Table::new();

        let preset = match (&self.page, self.custom_page) {
            (Some(page), _) => Some(page.clone()),
            (None, Some(_)) => Some(PagePreset::Custom.name().to_string()),
            (None, None) => None,
        };
        if let Some(preset) = preset {
            let mut page = toml::Table::new();
            page.insert("preset".into(), toml::Value::String(preset));
            root.insert("page".into(), toml::Value::Table(page));
        }
        if let Some(size) = self.custom_page {
            root.insert("custom_page".into(), size_table(size));
        }
        if let Some(size) = self.photo {
            root.insert("photo".into(), size_table(size));
        }

        let mut export = toml::Table::new();
        if let Some(background) = &self.background {
            export.insert("background".into(), toml::Value::String(background.clone()));
        }
        if let Some(quality) = self.quality {
            export.insert("quality".into(), toml::Value::Integer(quality.into()));
        }
        if let Some(sheets) = self.sheets {
            export.insert("sheets".into(), toml::Value::Integer(sheets.into()));
        }
        if !export.is_empty() {
            root.insert("export".into(), toml::Value::Table(export));
        }

        toml::Value::Table(root)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SheetConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge `layers` bottom to top, then deserialize and validate once.
pub fn resolve_config(
    base: toml::Value,
    layers: impl IntoIterator<Item = toml::Value>,
) -> Result<SheetConfig, ConfigError> {
    let merged = layers.into_iter().fold(base, merge_toml);
    let config: SheetConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, with no
/// command-line layer.
pub fn load_config(root: &Path) -> Result<SheetConfig, ConfigError> {
    load_config_with(root, &Overrides::default())
}

/// Stock defaults, then `root/config.toml`, then `overrides`.
pub fn load_config_with(root: &Path, overrides: &Overrides) -> Result<SheetConfig, ConfigError> {
    let file = load_raw_config(root)?;
    resolve_config(
        stock_defaults_value(),
        file.into_iter().chain([overrides.to_toml()]),
    )
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# idsheet configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
# Command-line flags override anything set here.

# ---------------------------------------------------------------------------
# Page
# ---------------------------------------------------------------------------
[page]
# One of: A3, A4, A5, Letter, 4x6, 5x7, Custom
preset = "A4"

# Size of the Custom page, in millimetres (at most 2000 per side).
[custom_page]
width = 100.0
height = 150.0

# ---------------------------------------------------------------------------
# Photo
# ---------------------------------------------------------------------------
# Printed size of each copy, in millimetres (1 to 2000 per side).
# Passport 35 x 45, US visa 51 x 51, one-inch 25 x 35, two-inch 35 x 49.
[photo]
width = 35.0
height = 45.0

# ---------------------------------------------------------------------------
# Export
# ---------------------------------------------------------------------------
[export]
# Colour placed behind the subject where the cutout is transparent.
background = "#ffffff"

# JPEG quality (1 = worst, 100 = best).
quality = 90

# Identical pages in a PDF export.
sheets = 1
"##
}
