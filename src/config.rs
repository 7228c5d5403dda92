use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::Palette;
use crate::sheet::{CountryColumns, IndustryColumns};

pub const DEFAULT_ROOT_ID: &str = "🌍";
pub const DEFAULT_SHEETS_RANGE: &str = "Main!A1:N500";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("invalid palette color {0:?}; expected #RRGGBB")]
    InvalidColor(String),
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidNumber { name: &'static str, value: f64 },
    #[error("root id must not be blank")]
    BlankRootId,
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Selects the column layout and hierarchy algorithm for one build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Industry,
    Country,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Industry, ViewMode::Country];

    pub fn label(self) -> &'static str {
        match self {
            Self::Industry => "Industry",
            Self::Country => "Country",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tuning for the concentric seed layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    pub ring_spacing: f64,
    pub layer_angular_factor: f64,
    pub angular_offset: f64,
    /// Width of the symmetric z band; `None` keeps the layout planar.
    pub z_spread: Option<f64>,
}

impl LayoutParams {
    pub const VOLUMETRIC_Z_SPREAD: f64 = 100.0;

    /// Parameters of the volumetric renderer: tighter angular step, no offset, z band.
    pub fn volumetric() -> Self {
        Self {
            ring_spacing: 300.0,
            layer_angular_factor: 20.0,
            angular_offset: 0.0,
            z_spread: Some(Self::VOLUMETRIC_Z_SPREAD),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_number("ring_spacing", self.ring_spacing)?;
        check_number("layer_angular_factor", self.layer_angular_factor)?;
        if !self.angular_offset.is_finite() {
            return Err(ConfigError::InvalidNumber {
                name: "angular_offset",
                value: self.angular_offset,
            });
        }
        if let Some(spread) = self.z_spread {
            check_number("z_spread", spread)?;
        }
        Ok(())
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            ring_spacing: 300.0,
            layer_angular_factor: 40.0,
            angular_offset: 10.0,
            z_spread: None,
        }
    }
}

fn check_number(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidNumber { name, value })
    }
}

/// Everything that shapes a build apart from the rows themselves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub palette: Palette,
    pub root_id: String,
    pub layout: LayoutParams,
    pub industry_columns: IndustryColumns,
    pub country_columns: CountryColumns,
}

impl GraphConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_id.trim().is_empty() {
            return Err(ConfigError::BlankRootId);
        }
        self.layout.validate()
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            root_id: DEFAULT_ROOT_ID.to_owned(),
            layout: LayoutParams::default(),
            industry_columns: IndustryColumns::default(),
            country_columns: CountryColumns::default(),
        }
    }
}

/// Where rows come from. A local file wins over the sheet settings when both are set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub input: Option<PathBuf>,
    pub sheet_id: Option<String>,
    pub range: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub view_mode: ViewMode,
    #[serde(flatten)]
    pub graph: GraphConfig,
    pub source: SourceSettings,
}

impl Settings {
    pub fn from_toml_str(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.graph.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw, path)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_validate() {
        let settings = Settings::default();
        assert_eq!(settings.view_mode, ViewMode::Industry);
        assert_eq!(settings.graph.root_id, DEFAULT_ROOT_ID);
        assert_eq!(settings.graph.palette.len(), 5);
        assert!(settings.graph.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let raw = r##"
view_mode = "country"
palette = ["#000000", "#111111"]

[layout]
ring_spacing = 120.0

[country_columns]
country = 5
"##;
        let settings = Settings::from_toml_str(raw, Path::new("test.toml")).unwrap();
        assert_eq!(settings.view_mode, ViewMode::Country);
        assert_eq!(settings.graph.palette.len(), 2);
        assert_eq!(settings.graph.layout.ring_spacing, 120.0);
        assert_eq!(settings.graph.layout.layer_angular_factor, 40.0);
        assert_eq!(settings.graph.country_columns.country, 5);
        assert_eq!(settings.graph.country_columns.tooltip, 7);
        assert_eq!(settings.graph.root_id, DEFAULT_ROOT_ID);
    }

    #[test]
    fn rejects_empty_palette() {
        let error = Settings::from_toml_str("palette = []", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn rejects_negative_ring_spacing() {
        let raw = "[layout]\nring_spacing = -3.0\n";
        let error = Settings::from_toml_str(raw, Path::new("bad.toml")).unwrap_err();
        assert!(matches!(
            error,
            ConfigError::InvalidNumber {
                name: "ring_spacing",
                ..
            }
        ));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "root_id = \"world\"").unwrap();
        writeln!(file, "[source]\ninput = \"rows.json\"").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.graph.root_id, "world");
        assert_eq!(settings.source.input, Some(PathBuf::from("rows.json")));
    }

    #[test]
    fn missing_file_is_read_error() {
        let error = Settings::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));
    }
}
