//! ink-pipeline: exact image pipeline for e-paper ink simulation
//!
//! This library turns an opaque captured RGBA frame into the look of an
//! ink/e-paper display: blocky pixelation, selective high-contrast
//! binarization, Floyd-Steinberg error diffusion dithering, and a
//! backlight tint pass.
//!
//! # Quick Start
//!
//! The [`Pipeline`] is the primary entry point:
//!
//! ```
//! use ink_pipeline::{Pipeline, PixelBuffer, Settings};
//!
//! let settings = Settings {
//!     dithering: true,
//!     ..Settings::default()
//! };
//! let pipeline = Pipeline::new(settings, 2.0).unwrap();
//!
//! let capture = PixelBuffer::new(64, 64).unwrap();
//! let frame = pipeline.run(capture).unwrap();
//! assert!(frame.is_some());
//! ```
//!
//! # Pipeline Overview
//!
//! Stages run in a fixed order; every stage except the resolution framing
//! is optional:
//!
//! ```text
//! capture (RGBA, device resolution)
//!     |
//!     v
//! [downsample]        nearest-neighbor, if pixelation is enabled
//!     |
//!     v
//! [high contrast]     near-grayscale pixels snap to black/white,
//!     |               chromatic accents survive untouched
//!     v
//! [dither]            Floyd-Steinberg error diffusion; confined to
//!     |               pixelation blocks when pixelation is also on
//!     v
//! [backlight]         every non-black, non-transparent pixel takes
//!     |               the configured tint color
//!     v
//! upscale to display resolution
//! ```
//!
//! With no stage enabled the run is suppressed ([`Pipeline::run`] returns
//! `Ok(None)`) so the caller can skip presentation entirely.
//!
//! # Numeric Semantics
//!
//! The dithering stage is deliberately exact rather than pretty:
//!
//! - Luminance uses the Rec. 601 weights `0.299 / 0.587 / 0.114`.
//! - Quantization error diffuses with the classic Floyd-Steinberg
//!   weights `7/16, 3/16, 5/16, 1/16` in strict raster order.
//! - Each diffused value is clamped to `[0, 255]` **at write time**, and
//!   later pixels read the clamped value. Replacing this with an
//!   unclamped accumulator changes the output; the clamp-on-write
//!   behavior is part of the contract.
//!
//! Every intermediate buffer is allocated fresh per run, so back-to-back
//! runs never interfere and a failed run leaves nothing partially applied.

pub mod backlight;
pub mod buffer;
pub mod contrast;
pub mod dither;
pub mod error;
pub mod pipeline;
pub mod scale;
pub mod settings;


pub use buffer::PixelBuffer;
pub use error::{BufferError, ConfigError, PipelineError};
pub use pipeline::Pipeline;
pub use settings::{Settings, Tint};
