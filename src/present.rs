//! Presentation collaborator: write a processed frame to a PNG file.
//!
//! The pipeline hands over a display-resolution RGBA buffer; this module
//! only encodes it.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ink_pipeline::PixelBuffer;

use crate::error::AppError;

/// Encode an RGBA [`PixelBuffer`] as an 8-bit PNG.
pub fn write_frame(path: &Path, frame: &PixelBuffer) -> Result<(), AppError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, frame.width(), frame.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| AppError::PngEncode(e.to_string()))?;
    writer
        .write_image_data(frame.data())
        .map_err(|e| AppError::PngEncode(e.to_string()))?;

    tracing::debug!(
        width = frame.width(),
        height = frame.height(),
        path = %path.display(),
        "presented frame"
    );
    Ok(())
}
