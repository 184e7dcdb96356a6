//! Figure Configuration Module
//! Size, labels and marker styling for the timing chart, optionally loaded
//! from a JSON file. Omitted fields keep their defaults.

use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Typographic points per inch.
const POINTS_PER_INCH: f64 = 72.0;

/// Largest figure side, cap or marker size accepted (px)
const MAX_PIXELS_PER_SIDE: f64 = 16384.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid figure setting: {0}")]
    Invalid(String),
}

/// Figure settings. Defaults reproduce the published results chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series_label: String,
    /// Full cap length in points
    pub cap_size_pt: f64,
    /// Marker diameter in points
    pub marker_size_pt: f64,
    pub show_grid: bool,
    pub show_legend: bool,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_in: 10.0,
            height_in: 6.0,
            dpi: 100,
            title: "Effect of Electromagnet Activation Timing on Final Speed".to_string(),
            x_label: "Activation Time (ms)".to_string(),
            y_label: "Acceleration (m/s^2)".to_string(),
            series_label: "Final Speed".to_string(),
            cap_size_pt: 5.0,
            marker_size_pt: 6.0,
            show_grid: true,
            show_legend: true,
        }
    }
}

impl FigureConfig {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        info!("Loaded figure config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate settings from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("width_in", self.width_in),
            ("height_in", self.height_in),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.dpi == 0 {
            return Err(ConfigError::Invalid("dpi must be greater than zero".into()));
        }
        for (name, value) in [
            ("width_in", self.width_in),
            ("height_in", self.height_in),
        ] {
            let px = value * f64::from(self.dpi);
            if px > MAX_PIXELS_PER_SIDE {
                return Err(ConfigError::Invalid(format!(
                    "{} of {} at {} dpi is {} px, the limit is {} px",
                    name, value, self.dpi, px, MAX_PIXELS_PER_SIDE
                )));
            }
        }
        for (name, value) in [
            ("cap_size_pt", self.cap_size_pt),
            ("marker_size_pt", self.marker_size_pt),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
            if self.points_to_px(value) > MAX_PIXELS_PER_SIDE {
                return Err(ConfigError::Invalid(format!(
                    "{} of {} is larger than {} px",
                    name, value, MAX_PIXELS_PER_SIDE
                )));
            }
        }
        Ok(())
    }

    /// Effective settings as pretty-printed JSON, loadable with `--config`.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Figure size in pixels at the configured DPI.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_in * dpi).round() as u32,
            (self.height_in * dpi).round() as u32,
        )
    }

    /// Convert a length in points to pixels.
    pub fn points_to_px(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / POINTS_PER_INCH
    }
}
