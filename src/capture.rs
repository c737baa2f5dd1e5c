//! Capture collaborator: load a PNG frame into a [`PixelBuffer`].
//!
//! The pipeline makes no assumptions about how a frame was produced; this
//! module normalizes whatever the PNG decoder yields into the 8-bit RGBA
//! layout the pipeline consumes. Indexed and sub-byte images are expanded
//! and 16-bit channels stripped by the decoder; anything else unexpected
//! is an [`CaptureError::Unsupported`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ink_pipeline::PixelBuffer;

use crate::error::CaptureError;

/// Decode a PNG file into an RGBA [`PixelBuffer`].
pub fn load_frame(path: &Path) -> Result<PixelBuffer, CaptureError> {
    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    // Expand palette/low-bit images, strip 16-bit channels to 8
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| CaptureError::Decode(e.to_string()))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| CaptureError::Decode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(CaptureError::Unsupported(format!(
            "bit depth {:?}",
            info.bit_depth
        )));
    }

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        other => {
            return Err(CaptureError::Unsupported(format!(
                "color type {other:?}"
            )))
        }
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        path = %path.display(),
        "captured frame"
    );
    Ok(PixelBuffer::from_raw(info.width, info.height, rgba)?)
}
