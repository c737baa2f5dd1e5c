use ink_pipeline::{BufferError, PipelineError};
use thiserror::Error;

/// Errors from the capture collaborator (frame decoding).
///
/// Capture failures are best-effort: the caller logs a warning and skips
/// the frame rather than aborting the whole batch.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("unsupported PNG format: {0}")]
    Unsupported(String),

    #[error("frame buffer error: {0}")]
    Buffer(#[from] BufferError),
}

/// Top-level application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_error_decode() {
        let error = CaptureError::Decode("bad chunk".to_string());
        assert_eq!(error.to_string(), "PNG decode error: bad chunk");
    }

    #[test]
    fn test_capture_error_unsupported() {
        let error = CaptureError::Unsupported("bit depth Sixteen".to_string());
        assert_eq!(
            error.to_string(),
            "unsupported PNG format: bit depth Sixteen"
        );
    }

    #[test]
    fn test_app_error_png_encode() {
        let error = AppError::PngEncode("short write".to_string());
        assert_eq!(error.to_string(), "PNG encode error: short write");
    }

    #[test]
    fn test_app_error_invalid_color() {
        let error = AppError::InvalidColor("#12345".to_string());
        assert_eq!(error.to_string(), "invalid color: #12345");
    }

    #[test]
    fn test_app_error_from_capture_error() {
        let capture = CaptureError::Decode("truncated".to_string());
        let error: AppError = capture.into();
        match error {
            AppError::Capture(_) => {}
            _ => panic!("Expected Capture variant"),
        }
    }

    #[test]
    fn test_app_error_from_pipeline_error() {
        let buffer_error = BufferError::ZeroDimension {
            width: 0,
            height: 0,
        };
        let error: AppError = PipelineError::from(buffer_error).into();
        match error {
            AppError::Pipeline(_) => {}
            _ => panic!("Expected Pipeline variant"),
        }
    }
}
