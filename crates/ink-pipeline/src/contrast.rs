//! High-contrast stage: selective grayscale binarization.
//!
//! Near-grayscale pixels snap to pure black or white while clearly
//! chromatic pixels (highlighted text, colored accents) pass through
//! untouched. This mimics e-paper contrast without destroying salient
//! color cues. The stage is idempotent: a binarized pixel is itself
//! near-grayscale and re-binarizes to the same value.

use crate::buffer::PixelBuffer;

/// A pixel whose largest channel difference is below this is treated as
/// near-grayscale and binarized.
const CHROMA_GATE: i16 = 30;

/// Binarize near-grayscale pixels in place; alpha is never touched.
///
/// For each pixel, `max_diff = max(|r-g|, |g-b|, |b-r|)`. Below the gate
/// the pixel becomes white when its channel average exceeds 128 and black
/// otherwise; at or above the gate it is left as-is.
pub fn apply_high_contrast(buffer: &mut PixelBuffer) {
    for px in buffer.data_mut().chunks_exact_mut(4) {
        let (r, g, b) = (px[0] as i16, px[1] as i16, px[2] as i16);
        let max_diff = (r - g).abs().max((g - b).abs()).max((b - r).abs());
        if max_diff < CHROMA_GATE {
            // (r + g + b) / 3 > 128, in exact integer form
            let value = if r + g + b > 384 { 255 } else { 0 };
            px[0] = value;
            px[1] = value;
            px[2] = value;
        }
    }
}
