//! Application configuration loaded from an optional YAML file.
//!
//! The file carries the pipeline settings plus the device pixel ratio of
//! the captured frames. Loading is lenient: a missing or unparsable file
//! logs a warning and falls back to defaults, so the CLI flags remain the
//! source of truth when layered on top.

use std::path::Path;

use ink_pipeline::{Settings, Tint};
use serde::Deserialize;

use crate::error::AppError;

/// Top-level YAML configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Pipeline settings (all fields optional, defaults apply).
    #[serde(default)]
    pub settings: Settings,

    /// Device pixel ratio of the captured frames.
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            device_pixel_ratio: default_device_pixel_ratio(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults on
    /// any failure.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

/// Parse a `#RRGGBB` (or `RRGGBB`) hex color into a [`Tint`].
pub fn parse_hex_color(input: &str) -> Result<Tint, AppError> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AppError::InvalidColor(input.to_string()));
    }
    let channel = |range| u8::from_str_radix(&hex[range], 16);
    Ok(Tint {
        r: channel(0..2).map_err(|_| AppError::InvalidColor(input.to_string()))?,
        g: channel(2..4).map_err(|_| AppError::InvalidColor(input.to_string()))?,
        b: channel(4..6).map_err(|_| AppError::InvalidColor(input.to_string()))?,
    })
}
