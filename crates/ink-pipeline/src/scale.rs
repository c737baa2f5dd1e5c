//! Nearest-neighbor resampling between pixel buffers.
//!
//! Nearest-neighbor is what produces the blocky "pixelated" look; it must
//! stay bit-exact, never smoothed. The same routine serves downsampling
//! into the process-resolution buffer and the final upscale to display
//! resolution.

use crate::buffer::{PixelBuffer, BYTES_PER_PIXEL};
use crate::error::BufferError;

/// Resample `src` to `dst_width x dst_height`.
///
/// Every destination pixel `(x, y)` copies the source pixel at
/// `(floor(x * src_w / dst_w), floor(y * src_h / dst_h))`. A zero target
/// dimension is a [`BufferError::ZeroDimension`]; callers clamp to at
/// least 1 beforehand.
pub fn scale(src: &PixelBuffer, dst_width: u32, dst_height: u32) -> Result<PixelBuffer, BufferError> {
    let mut dst = PixelBuffer::new(dst_width, dst_height)?;

    let src_w = src.width() as u64;
    let src_h = src.height() as u64;
    let src_data = src.data();
    let dst_data = dst.data_mut();

    for y in 0..dst_height as u64 {
        let sy = y * src_h / dst_height as u64;
        let src_row = (sy * src_w) as usize;
        let dst_row = (y * dst_width as u64) as usize;
        for x in 0..dst_width as u64 {
            let sx = (x * src_w / dst_width as u64) as usize;
            let si = (src_row + sx) * BYTES_PER_PIXEL;
            let di = (dst_row + x as usize) * BYTES_PER_PIXEL;
            dst_data[di..di + BYTES_PER_PIXEL]
                .copy_from_slice(&src_data[si..si + BYTES_PER_PIXEL]);
        }
    }

    Ok(dst)
}
