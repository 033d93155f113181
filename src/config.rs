//! Chart Configuration
//! Dataset locations, selected year and presentation settings.
//!
//! Values come from the defaults below, optionally overlaid by a JSON file
//! and finally by command line flags.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Plot area is empty: {width}x{height} with margins {margin:?}")]
    EmptyPlotArea { width: u32, height: u32, margin: Margin },
    #[error("Max radius must be a positive number, got {0}")]
    InvalidRadius(f64),
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidOpacity { name: &'static str, value: f64 },
}

/// How marks pick their palette colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Independent random slot per mark, differs between runs.
    #[default]
    Random,
    /// Slot derived from the entity name, identical between runs.
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20,
            right: 30,
            bottom: 40,
            left: 50,
        }
    }
}

/// Texts shown on axes and in the tooltip.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub title: String,
    pub entity: String,
    pub x: String,
    pub y: String,
    pub y_unit: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "GDP vs Life Expectancy".to_string(),
            entity: "Country".to_string(),
            x: "GDP".to_string(),
            y: "Life Expectancy".to_string(),
            y_unit: "years".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TooltipStyle {
    pub fade_in_ms: u32,
    pub fade_out_ms: u32,
    pub opacity: f64,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            fade_in_ms: 200,
            fade_out_ms: 500,
            opacity: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub first_dataset: PathBuf,
    pub second_dataset: PathBuf,
    pub year: i32,
    pub key_column: String,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    pub max_radius: f64,
    pub mark_opacity: f64,
    pub color_mode: ColorMode,
    pub labels: Labels,
    pub tooltip: TooltipStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            first_dataset: PathBuf::from("gdp.csv"),
            second_dataset: PathBuf::from("lifeExp.csv"),
            year: 2000,
            key_column: "country".to_string(),
            output: PathBuf::from("bubble_chart.html"),
            width: 1200,
            height: 600,
            margin: Margin::default(),
            max_radius: 50.0,
            mark_opacity: 0.7,
            color_mode: ColorMode::Random,
            labels: Labels::default(),
            tooltip: TooltipStyle::default(),
        }
    }
}

impl ChartConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Column name of the selected year in both tables.
    pub fn year_column(&self) -> String {
        self.year.to_string()
    }

    pub fn plot_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margin.left)
            .saturating_sub(self.margin.right)
    }

    pub fn plot_height(&self) -> u32 {
        self.height
            .saturating_sub(self.margin.top)
            .saturating_sub(self.margin.bottom)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plot_width() == 0 || self.plot_height() == 0 {
            return Err(ConfigError::EmptyPlotArea {
                width: self.width,
                height: self.height,
                margin: self.margin,
            });
        }
        if !self.max_radius.is_finite() || self.max_radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.max_radius));
        }
        for (name, value) in [
            ("mark_opacity", self.mark_opacity),
            ("tooltip.opacity", self.tooltip.opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidOpacity { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_plot_geometry() {
        let config = ChartConfig::default();
        assert_eq!(config.plot_width(), 1120);
        assert_eq!(config.plot_height(), 540);
        assert_eq!(config.year_column(), "2000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"year": 1990, "color_mode": "stable", "margin": {{"left": 80}}}}"#
        )
        .unwrap();

        let config = ChartConfig::from_file(file.path()).unwrap();
        assert_eq!(config.year, 1990);
        assert_eq!(config.color_mode, ColorMode::Stable);
        assert_eq!(config.margin.left, 80);
        assert_eq!(config.margin.top, 20);
        assert_eq!(config.first_dataset, PathBuf::from("gdp.csv"));
        assert_eq!(config.tooltip.fade_out_ms, 500);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ year: ").unwrap();
        let err = ChartConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ChartConfig::from_file(Path::new("/nonexistent/chart.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let squeezed = ChartConfig {
            width: 60,
            ..ChartConfig::default()
        };
        assert!(matches!(
            squeezed.validate(),
            Err(ConfigError::EmptyPlotArea { .. })
        ));

        let no_radius = ChartConfig {
            max_radius: 0.0,
            ..ChartConfig::default()
        };
        assert!(matches!(
            no_radius.validate(),
            Err(ConfigError::InvalidRadius(_))
        ));

        let mut opaque = ChartConfig::default();
        opaque.tooltip.opacity = 1.5;
        assert!(matches!(
            opaque.validate(),
            Err(ConfigError::InvalidOpacity { name: "tooltip.opacity", .. })
        ));
    }
}
