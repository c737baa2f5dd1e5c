//! Owned RGBA pixel grid -- the substrate every stage reads and writes.
//!
//! A [`PixelBuffer`] is a fixed-stride, row-major byte grid with 4 bytes
//! per pixel. The length invariant `data.len() == width * height * 4`
//! holds for every constructor; there is no in-place reshape, a new size
//! always means a new allocation.

use crate::error::BufferError;

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// An owned RGBA byte grid, row-major, stride `width * 4`.
///
/// Buffers are transient and single-owner: each pipeline stage consumes
/// or mutates one buffer and hands ownership onward. Bounds-checked
/// access goes through [`get`](Self::get) / [`set`](Self::set); stages
/// iterate the raw data for bulk passes.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a cleared (all-zero) buffer.
    ///
    /// Zero-sized buffers are disallowed; callers clamp dimensions to at
    /// least 1 before allocating.
    pub fn new(width: u32, height: u32) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroDimension { width, height });
        }
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Wrap an existing RGBA byte vector, validating the length invariant.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::ZeroDimension { width, height });
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(BufferError::SizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA bytes, row-major.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, returning the raw byte vector.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Allocate a cleared buffer with new dimensions.
    ///
    /// Content is never copied implicitly; the result is all-zero. There
    /// is no in-place reshape.
    pub fn resize(&self, width: u32, height: u32) -> Result<Self, BufferError> {
        Self::new(width, height)
    }

    /// Read the RGBA pixel at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Result<[u8; 4], BufferError> {
        let idx = self.index(x, y)?;
        Ok([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Write the RGBA pixel at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, pixel: [u8; 4]) -> Result<(), BufferError> {
        let idx = self.index(x, y)?;
        self.data[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&pixel);
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Result<usize, BufferError> {
        if x >= self.width || y >= self.height {
            return Err(BufferError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }
}
