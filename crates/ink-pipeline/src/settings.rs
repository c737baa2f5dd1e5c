//! Pipeline settings: effect flags, densities, and derived block geometry.
//!
//! Settings are immutable for the duration of one run and externally
//! mutable between runs. Numeric fields are validated (non-finite or
//! non-positive values are a [`ConfigError`]) and then clamped into their
//! working ranges.

use serde::Deserialize;

use crate::error::ConfigError;

/// Backlight tint color, applied to every "ink" pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Pipeline configuration.
///
/// Defaults match the classic overlay behavior: only the high-contrast
/// stage is on, pixel density 4, dither density 2, orange tint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Downsample granularity in CSS pixels, clamped to [1, 100].
    #[serde(default = "default_pixel_density")]
    pub pixel_density: f64,

    /// Dither block/sub-resolution granularity, clamped to [1, 10].
    #[serde(default = "default_dither_density")]
    pub dither_density: f64,

    /// Spatial downsampling into visible blocks.
    #[serde(default)]
    pub pixelation: bool,

    /// Floyd-Steinberg error diffusion.
    #[serde(default)]
    pub dithering: bool,

    /// Selective grayscale binarization.
    #[serde(default = "default_true")]
    pub high_contrast: bool,

    /// Tint pass over non-background pixels.
    #[serde(default)]
    pub backlight: bool,

    /// Tint color for the backlight pass.
    #[serde(default = "default_tint")]
    pub backlight_color: Tint,
}

fn default_pixel_density() -> f64 {
    4.0
}

fn default_dither_density() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

fn default_tint() -> Tint {
    Tint {
        r: 255,
        g: 165,
        b: 0,
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pixel_density: default_pixel_density(),
            dither_density: default_dither_density(),
            pixelation: false,
            dithering: false,
            high_contrast: default_true(),
            backlight: false,
            backlight_color: default_tint(),
        }
    }
}

impl Settings {
    /// Reject non-finite or non-positive densities.
    ///
    /// Out-of-range but positive values are not an error; they are
    /// clamped by [`clamped`](Self::clamped).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pixel_density.is_finite() || self.pixel_density <= 0.0 {
            return Err(ConfigError::InvalidPixelDensity(self.pixel_density));
        }
        if !self.dither_density.is_finite() || self.dither_density <= 0.0 {
            return Err(ConfigError::InvalidDitherDensity(self.dither_density));
        }
        Ok(())
    }

    /// Clamp densities into their working ranges.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.pixel_density = self.pixel_density.clamp(1.0, 100.0);
        self.dither_density = self.dither_density.clamp(1.0, 10.0);
        self
    }

    /// Whether any stage is enabled at all.
    ///
    /// With every flag off the pipeline run is suppressed entirely.
    pub fn has_effects(&self) -> bool {
        self.pixelation || self.dithering || self.high_contrast || self.backlight
    }

    /// Downsample granularity in device pixels: `round(pixel_density * dpr)`,
    /// never below 1.
    pub fn physical_pixel_density(&self, device_pixel_ratio: f64) -> u32 {
        (self.pixel_density * device_pixel_ratio).round().max(1.0) as u32
    }

    /// Dither sub-resolution per pixelation block:
    /// `max(1, round(physical_pixel_density / dither_density))`.
    pub fn subdivisions(&self, device_pixel_ratio: f64) -> u32 {
        let physical = self.physical_pixel_density(device_pixel_ratio) as f64;
        ((physical / self.dither_density).round() as u32).max(1)
    }
}
