//! Floyd-Steinberg error diffusion dithering.
//!
//! Converts a grayscale-reducible frame to pure black/white pixels while
//! diffusing quantization error to not-yet-processed neighbors, so local
//! average luminance survives the binarization. Two geometrically distinct
//! variants exist:
//!
//! - [`dither_regular`]: diffuses across the whole frame, at a coarser
//!   resolution derived from the dither density, then upscales back.
//! - [`dither_blocks`]: diffusion never crosses a pixelation-block
//!   boundary; each block is dithered independently at a small
//!   sub-resolution so noise cannot bleed between visually distinct
//!   blocks.
//!
//! # Determinism
//!
//! Processing is strict raster order (left-to-right, top-to-bottom) over a
//! float luminance buffer. Each diffused value is clamped to `[0, 255]` at
//! write time and later pixels read the clamped value; the accumulation
//! order and the clamp are both load-bearing for output parity. Do not
//! parallelize across rows without reproducing that exact dependency
//! chain.

use crate::buffer::PixelBuffer;
use crate::error::BufferError;
use crate::scale;

/// Rec. 601 luma weights. Must match exactly for output parity.
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// The Floyd-Steinberg kernel: `(dx, dy, weight)` per neighbor.
///
/// ```text
///        X   7
///    3   5   1      (out of 16)
/// ```
const FLOYD_STEINBERG: [(isize, usize, f32); 4] = [
    (1, 0, 7.0 / 16.0),  // right
    (-1, 1, 3.0 / 16.0), // lower-left
    (0, 1, 5.0 / 16.0),  // lower
    (1, 1, 1.0 / 16.0),  // lower-right
];

#[inline]
fn luminance(px: &[u8]) -> f32 {
    LUMA_R * px[0] as f32 + LUMA_G * px[1] as f32 + LUMA_B * px[2] as f32
}

/// Diffuse over a float luminance buffer in strict raster order.
///
/// `block` of `Some(b)` confines error to `b x b` tiles aligned to the
/// origin (the buffer dimensions are exact multiples of `b` in that
/// mode); `None` lets error travel across the whole buffer.
fn diffuse(gray: &mut [f32], width: usize, height: usize, block: Option<usize>) {
    debug_assert_eq!(gray.len(), width * height);

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let old = gray[idx];
            let new = if old > 128.0 { 255.0 } else { 0.0 };
            let error = old - new;
            gray[idx] = new;

            let (x_min, x_max, y_max) = match block {
                Some(b) => {
                    let bx = x / b * b;
                    let by = y / b * b;
                    (bx, bx + b, by + b)
                }
                None => (0, width, height),
            };

            for &(dx, dy, weight) in &FLOYD_STEINBERG {
                let nx = x as isize + dx;
                if nx < x_min as isize || nx >= x_max as isize {
                    continue;
                }
                let ny = y + dy;
                if ny >= y_max {
                    continue;
                }
                let nidx = ny * width + nx as usize;
                // Clamp on write: later pixels read the clamped value.
                gray[nidx] = (gray[nidx] + error * weight).clamp(0.0, 255.0);
            }
        }
    }
}

/// Whole-frame dithering at a coarser resolution.
///
/// Downsamples by `dither_density` (floor, minimum 1x1), diffuses error
/// across the entire coarse buffer, then upscales the black/white result
/// back to the source resolution with nearest-neighbor sampling. Alpha is
/// carried from the downsampled pixel.
pub fn dither_regular(src: &PixelBuffer, dither_density: f64) -> Result<PixelBuffer, BufferError> {
    let coarse_w = ((src.width() as f64 / dither_density).floor() as u32).max(1);
    let coarse_h = ((src.height() as f64 / dither_density).floor() as u32).max(1);
    tracing::debug!(coarse_w, coarse_h, "regular dithering");

    let coarse = scale::scale(src, coarse_w, coarse_h)?;
    let width = coarse_w as usize;
    let height = coarse_h as usize;

    let mut gray: Vec<f32> = coarse.data().chunks_exact(4).map(luminance).collect();
    diffuse(&mut gray, width, height, None);

    let mut out = PixelBuffer::new(coarse_w, coarse_h)?;
    for ((px, &value), src_px) in out
        .data_mut()
        .chunks_exact_mut(4)
        .zip(gray.iter())
        .zip(coarse.data().chunks_exact(4))
    {
        let value = value as u8; // exactly 0.0 or 255.0 after diffusion
        px[0] = value;
        px[1] = value;
        px[2] = value;
        px[3] = src_px[3];
    }

    scale::scale(&out, src.width(), src.height())
}

/// Block-confined dithering for the pixelation path.
///
/// Expands each source pixel's luminance into a `subdivisions x
/// subdivisions` block and diffuses error strictly within each block, so
/// every block's average tone stays self-consistent. The returned buffer
/// is `subdivisions` times larger in each dimension.
///
/// With `subdivisions <= 1` the block is too small to diffuse within and
/// the stage degenerates to plain per-pixel thresholding at the source
/// resolution.
pub fn dither_blocks(src: &PixelBuffer, subdivisions: u32) -> Result<PixelBuffer, BufferError> {
    if subdivisions <= 1 {
        tracing::debug!("block dithering degenerates to thresholding");
        let mut out = src.clone();
        for px in out.data_mut().chunks_exact_mut(4) {
            let value = if luminance(px) > 128.0 { 255 } else { 0 };
            px[0] = value;
            px[1] = value;
            px[2] = value;
        }
        return Ok(out);
    }

    let b = subdivisions as usize;
    let src_w = src.width() as usize;
    let src_h = src.height() as usize;
    let final_w = src_w * b;
    let final_h = src_h * b;
    tracing::debug!(final_w, final_h, subdivisions, "block-confined dithering");

    // Expand each source pixel's luminance into its block.
    let mut gray = vec![0.0f32; final_w * final_h];
    for y in 0..src_h {
        for x in 0..src_w {
            let value = luminance(&src.data()[(y * src_w + x) * 4..]);
            for by in 0..b {
                let row = (y * b + by) * final_w + x * b;
                gray[row..row + b].fill(value);
            }
        }
    }

    diffuse(&mut gray, final_w, final_h, Some(b));

    let mut out = PixelBuffer::new(final_w as u32, final_h as u32)?;
    let out_data = out.data_mut();
    for fy in 0..final_h {
        for fx in 0..final_w {
            let fi = fy * final_w + fx;
            let value = gray[fi] as u8;
            let alpha = src.data()[((fy / b) * src_w + fx / b) * 4 + 3];
            let di = fi * 4;
            out_data[di] = value;
            out_data[di + 1] = value;
            out_data[di + 2] = value;
            out_data[di + 3] = alpha;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(width, height).unwrap();
        for px in buffer.data_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&pixel);
        }
        buffer
    }

    fn is_binary(buffer: &PixelBuffer) -> bool {
        buffer
            .data()
            .chunks_exact(4)
            .all(|px| (px[0] == 0 || px[0] == 255) && px[0] == px[1] && px[1] == px[2])
    }

    #[test]
    fn test_regular_pure_black_stays_black() {
        let src = solid(8, 8, [0, 0, 0, 255]);
        let out = dither_regular(&src, 1.0).unwrap();
        assert!(out.data().chunks_exact(4).all(|px| px[0] == 0));
    }

    #[test]
    fn test_regular_pure_white_stays_white() {
        let src = solid(8, 8, [255, 255, 255, 255]);
        let out = dither_regular(&src, 1.0).unwrap();
        assert!(out.data().chunks_exact(4).all(|px| px[0] == 255));
    }

    #[test]
    fn test_regular_output_is_binary() {
        let mut src = PixelBuffer::new(16, 16).unwrap();
        for (i, px) in src.data_mut().chunks_exact_mut(4).enumerate() {
            let v = (i % 256) as u8;
            px.copy_from_slice(&[v, v, v, 255]);
        }
        let out = dither_regular(&src, 1.0).unwrap();
        assert!(is_binary(&out));
    }

    #[test]
    fn test_regular_mid_gray_mixes() {
        let src = solid(16, 16, [128, 128, 128, 255]);
        let out = dither_regular(&src, 1.0).unwrap();
        let white = out.data().chunks_exact(4).filter(|px| px[0] == 255).count();
        let black = out.data().chunks_exact(4).filter(|px| px[0] == 0).count();
        assert!(white > 0 && black > 0, "mid gray should produce a mix");
    }

    #[test]
    fn test_regular_output_keeps_source_dimensions() {
        let src = solid(10, 7, [90, 90, 90, 255]);
        let out = dither_regular(&src, 3.0).unwrap();
        assert_eq!(out.width(), 10);
        assert_eq!(out.height(), 7);
    }

    #[test]
    fn test_regular_density_produces_coarse_pattern() {
        // With density 2 the 8x8 output is an upscaled 4x4 dither: every
        // 2x2 cell is uniform.
        let src = solid(8, 8, [128, 128, 128, 255]);
        let out = dither_regular(&src, 2.0).unwrap();
        for cy in 0..4 {
            for cx in 0..4 {
                let base = out.get(cx * 2, cy * 2).unwrap();
                for dy in 0..2 {
                    for dx in 0..2 {
                        assert_eq!(
                            out.get(cx * 2 + dx, cy * 2 + dy).unwrap(),
                            base,
                            "2x2 cell at ({cx}, {cy}) should be uniform"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_regular_tiny_buffer_clamps_to_one() {
        // density larger than the buffer: coarse dims clamp to 1x1
        let src = solid(2, 2, [200, 200, 200, 255]);
        let out = dither_regular(&src, 10.0).unwrap();
        assert_eq!(out.width(), 2);
        assert!(out.data().chunks_exact(4).all(|px| px[0] == 255));
    }

    #[test]
    fn test_blocks_degenerate_thresholds_only() {
        let mut src = PixelBuffer::new(2, 1).unwrap();
        src.set(0, 0, [100, 100, 100, 255]).unwrap(); // luma 100 -> black
        src.set(1, 0, [200, 200, 200, 255]).unwrap(); // luma 200 -> white
        let out = dither_blocks(&src, 1).unwrap();
        assert_eq!(out.width(), 2);
        assert_eq!(out.get(0, 0).unwrap(), [0, 0, 0, 255]);
        assert_eq!(out.get(1, 0).unwrap(), [255, 255, 255, 255]);
    }

    #[test]
    fn test_blocks_expand_dimensions() {
        let src = solid(3, 2, [128, 128, 128, 255]);
        let out = dither_blocks(&src, 4).unwrap();
        assert_eq!(out.width(), 12);
        assert_eq!(out.height(), 8);
    }

    #[test]
    fn test_blocks_output_is_binary() {
        let src = solid(4, 4, [77, 77, 77, 255]);
        let out = dither_blocks(&src, 3).unwrap();
        assert!(is_binary(&out));
    }

    #[test]
    fn test_blocks_mid_gray_block_mixes_within_itself() {
        let src = solid(1, 1, [128, 128, 128, 255]);
        let out = dither_blocks(&src, 4).unwrap();
        let white = out.data().chunks_exact(4).filter(|px| px[0] == 255).count();
        let black = out.data().chunks_exact(4).filter(|px| px[0] == 0).count();
        assert!(white > 0 && black > 0, "diffusion should run inside a block");
    }

    #[test]
    fn test_blocks_carry_source_alpha() {
        let src = solid(2, 2, [128, 128, 128, 42]);
        let out = dither_blocks(&src, 2).unwrap();
        assert!(out.data().chunks_exact(4).all(|px| px[3] == 42));
    }

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance(&[255, 0, 0, 255]), 0.299 * 255.0);
        assert_eq!(luminance(&[0, 255, 0, 255]), 0.587 * 255.0);
        assert_eq!(luminance(&[0, 0, 255, 255]), 0.114 * 255.0);
    }

    #[test]
    fn test_kernel_weights_sum_to_one() {
        let sum: f32 = FLOYD_STEINBERG.iter().map(|&(_, _, w)| w).sum();
        assert!((sum - 1.0).abs() < f32::EPSILON, "16/16 propagation");
    }

    #[test]
    fn test_diffuse_clamps_on_write() {
        // Pixel 0 (200 -> 255) pushes -55 * 7/16 onto pixel 1, driving it
        // to -14.06; the write clamps it to 0, so pixel 1 quantizes with
        // zero error and pixel 2 (130) stays above threshold. An unclamped
        // accumulator would carry -14.06 forward and flip pixel 2 to black.
        let mut gray = vec![200.0, 10.0, 130.0];
        diffuse(&mut gray, 3, 1, None);
        assert_eq!(gray, vec![255.0, 0.0, 255.0]);
    }

    #[test]
    fn test_diffuse_raster_order_dependency() {
        // First pixel quantizes to 0 (128 is not > 128) and pushes
        // 128 * 7/16 = 56 to the right; 128 + 56 = 184 > 128 -> white.
        let mut gray = vec![128.0, 128.0];
        diffuse(&mut gray, 2, 1, None);
        assert_eq!(gray[0], 0.0);
        assert_eq!(gray[1], 255.0);
    }
}
