//! Error taxonomy for the ink pipeline.
//!
//! [`ConfigError`] is raised at configuration time, before any run starts.
//! [`BufferError`] is raised during a stage and is frame-fatal: the run is
//! abandoned and no partial buffer escapes. [`PipelineError`] wraps both
//! for convenient `?` propagation in application code.

use thiserror::Error;

/// Invalid configuration, rejected before any run starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("pixel density must be a positive finite number, got {0}")]
    InvalidPixelDensity(f64),

    #[error("dither density must be a positive finite number, got {0}")]
    InvalidDitherDensity(f64),

    #[error("device pixel ratio must be a positive finite number, got {0}")]
    InvalidDevicePixelRatio(f64),
}

/// A stage-time buffer failure. Frame-fatal, never retried.
#[derive(Debug, Error)]
pub enum BufferError {
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("data length {actual} does not match {width}x{height} RGBA ({expected} bytes)")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("zero-sized buffer target: {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
}

/// Unified error type for a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("buffer error: {0}")]
    Buffer(#[from] BufferError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_pixel_density() {
        let error = ConfigError::InvalidPixelDensity(-4.0);
        assert_eq!(
            error.to_string(),
            "pixel density must be a positive finite number, got -4"
        );
    }

    #[test]
    fn test_config_error_dither_density() {
        let error = ConfigError::InvalidDitherDensity(0.0);
        assert_eq!(
            error.to_string(),
            "dither density must be a positive finite number, got 0"
        );
    }

    #[test]
    fn test_buffer_error_out_of_bounds() {
        let error = BufferError::OutOfBounds {
            x: 10,
            y: 3,
            width: 8,
            height: 8,
        };
        assert_eq!(
            error.to_string(),
            "pixel (10, 3) out of bounds for 8x8 buffer"
        );
    }

    #[test]
    fn test_buffer_error_size_mismatch() {
        let error = BufferError::SizeMismatch {
            width: 2,
            height: 2,
            expected: 16,
            actual: 12,
        };
        assert_eq!(
            error.to_string(),
            "data length 12 does not match 2x2 RGBA (16 bytes)"
        );
    }

    #[test]
    fn test_buffer_error_zero_dimension() {
        let error = BufferError::ZeroDimension {
            width: 0,
            height: 4,
        };
        assert_eq!(error.to_string(), "zero-sized buffer target: 0x4");
    }

    #[test]
    fn test_pipeline_error_from_config_error() {
        let error: PipelineError = ConfigError::InvalidDevicePixelRatio(f64::NAN).into();
        match error {
            PipelineError::Config(_) => {}
            _ => panic!("Expected Config variant"),
        }
    }

    #[test]
    fn test_pipeline_error_from_buffer_error() {
        let error: PipelineError = BufferError::ZeroDimension {
            width: 0,
            height: 0,
        }
        .into();
        match error {
            PipelineError::Buffer(_) => {}
            _ => panic!("Expected Buffer variant"),
        }
    }
}
