//! Stage orchestration: fixed order, explicit buffer-size transitions.
//!
//! A [`Pipeline`] owns validated settings and the device pixel ratio, and
//! runs each frame to completion synchronously. Every intermediate buffer
//! is allocated fresh per run; changing settings between runs therefore
//! needs no explicit cache invalidation. A run is atomic from the
//! caller's perspective: it yields a complete processed buffer, a
//! suppression signal (`None`), or an error with no partial result.

use crate::backlight;
use crate::buffer::PixelBuffer;
use crate::contrast;
use crate::dither;
use crate::error::{ConfigError, PipelineError};
use crate::scale;
use crate::settings::Settings;

/// The e-paper simulation pipeline.
///
/// Stage order is fixed:
/// `capture -> [downsample] -> [high contrast] -> [dither] -> [backlight]
/// -> upscale to display resolution`, with each bracketed stage gated by
/// its settings flag.
#[derive(Debug, Clone)]
pub struct Pipeline {
    settings: Settings,
    device_pixel_ratio: f64,
}

impl Pipeline {
    /// Build a pipeline from settings and the capture's device pixel
    /// ratio.
    ///
    /// Settings are validated (non-positive or non-finite densities are
    /// rejected) and then clamped into their working ranges, so a
    /// constructed pipeline can never fail on configuration at run time.
    pub fn new(settings: Settings, device_pixel_ratio: f64) -> Result<Self, ConfigError> {
        settings.validate()?;
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(ConfigError::InvalidDevicePixelRatio(device_pixel_ratio));
        }
        Ok(Self {
            settings: settings.clamped(),
            device_pixel_ratio,
        })
    }

    /// The active (validated and clamped) settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings between runs.
    ///
    /// Validates and clamps like [`new`](Self::new); the change takes
    /// effect on the next run since buffers are per-run anyway.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.settings = settings.clamped();
        Ok(())
    }

    /// Flip the backlight flag, returning the new state.
    pub fn toggle_backlight(&mut self) -> bool {
        self.settings.backlight = !self.settings.backlight;
        self.settings.backlight
    }

    /// Process one captured frame.
    ///
    /// Returns `Ok(None)` when no effect is enabled -- the caller should
    /// suppress presentation entirely rather than show a pass-through
    /// frame. On error the previous displayed frame must be left as-is;
    /// no partially processed buffer ever escapes this function.
    pub fn run(&self, capture: PixelBuffer) -> Result<Option<PixelBuffer>, PipelineError> {
        if !self.settings.has_effects() {
            tracing::debug!("no effect enabled, run suppressed");
            return Ok(None);
        }

        let display_width = capture.width();
        let display_height = capture.height();

        let mut frame = if self.settings.pixelation {
            let physical = self.settings.physical_pixel_density(self.device_pixel_ratio);
            let process_w = (display_width / physical).max(1);
            let process_h = (display_height / physical).max(1);
            tracing::debug!(physical, process_w, process_h, "downsampling capture");
            scale::scale(&capture, process_w, process_h)?
        } else {
            capture
        };

        if self.settings.high_contrast {
            contrast::apply_high_contrast(&mut frame);
        }

        if self.settings.dithering {
            frame = if self.settings.pixelation {
                let subdivisions = self.settings.subdivisions(self.device_pixel_ratio);
                dither::dither_blocks(&frame, subdivisions)?
            } else {
                dither::dither_regular(&frame, self.settings.dither_density)?
            };
        }

        if self.settings.backlight {
            backlight::apply_backlight(&mut frame, self.settings.backlight_color);
        }

        let out = if frame.width() != display_width || frame.height() != display_height {
            scale::scale(&frame, display_width, display_height)?
        } else {
            frame
        };
        Ok(Some(out))
    }
}
