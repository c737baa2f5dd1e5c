//! Backlight stage: tint every "ink" pixel a fixed color.
//!
//! After binarization the frame is an inverted page: pure black is the
//! background, anything else is ink. This pass replaces each ink pixel's
//! RGB with the configured tint while leaving the page background and
//! fully transparent pixels alone. It must run after thresholding or
//! dithering, since it tells ink from background by exact black/non-black
//! equality.

use crate::buffer::PixelBuffer;
use crate::settings::Tint;

/// Replace the RGB of every non-black, non-transparent pixel with `tint`.
/// Alpha is never touched.
pub fn apply_backlight(buffer: &mut PixelBuffer, tint: Tint) {
    for px in buffer.data_mut().chunks_exact_mut(4) {
        if px[3] != 0 && (px[0] != 0 || px[1] != 0 || px[2] != 0) {
            px[0] = tint.r;
            px[1] = tint.g;
            px[2] = tint.b;
        }
    }
}
