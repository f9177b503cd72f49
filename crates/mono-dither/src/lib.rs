// Generated LUT tables trip precision lints.
#![allow(clippy::excessive_precision)]

//! mono-dither: deterministic black and white dithering
//!
//! This library converts continuous-tone RGBA rasters into two-level
//! rasters with one of seven classical halftoning algorithms. It is a pure
//! transform: no I/O, no logging, no global state apart from a read-only
//! cache of generated threshold matrices.
//!
//! # Quick Start
//!
//! The flat functions in [`api::ops`] work on raw buffers:
//!
//! ```
//! let rgba = [200u8, 120, 40, 255].repeat(6 * 4);
//! let out = mono_dither::dither_atkinson(&rgba, 6, 4).unwrap();
//! assert_eq!(out.len(), rgba.len());
//! ```
//!
//! The typed API selects an algorithm with [`DitherAlgorithm`]:
//!
//! ```
//! use mono_dither::{DitherAlgorithm, RgbaImage};
//!
//! let image = RgbaImage::filled(16, 16, [90, 90, 90, 255]).unwrap();
//! let algo = DitherAlgorithm::Bayer { level: 2, invert: false };
//! let out = algo.apply(&image).unwrap();
//! assert!(out.pixels().all(|px| px == [0, 0, 0, 255] || px == [255; 4]));
//! ```
//!
//! # Algorithms
//!
//! | Name | Family | Parameters |
//! |------|--------|------------|
//! | `bayer` | ordered | level 0..=5, invert |
//! | `blue-noise` | ordered | tile size 32, 64, 128 |
//! | `simple-2d` | error diffusion | |
//! | `floyd-steinberg` | error diffusion | |
//! | `jjn` | error diffusion | |
//! | `atkinson` | error diffusion (75%) | |
//! | `riemersma` | Hilbert curve | history length 8..=256, decay 0.05..=0.9 |
//!
//! # Luminance
//!
//! Decisions are made on linear-light luminance. Each sRGB channel is
//! decoded through a build-time lookup table and combined with the Rec.709
//! weights `0.2126 R + 0.7152 G + 0.0722 B`, then scaled to 0..=255. A
//! pattern that is half white therefore reproduces linear 50% gray
//! (about sRGB 188), not sRGB 128. Alpha is ignored.
//!
//! ```text
//! RGBA input
//!     |
//!     v
//! LumaPlane            (sRGB decode via LUT, Rec.709 weights, parallel rows)
//!     |
//!     +---> Ordered     (tiled threshold; Bayer or blue noise, parallel rows)
//!     +---> Diffusion   (kernel table, row-major scan, midpoint 128)
//!     +---> Riemersma   (Hilbert walk, weighted error history)
//!     |
//!     v
//! MonoRaster           (opaque black / opaque white, alpha 255)
//! ```
//!
//! # Parameters
//!
//! Numeric parameters are clamped rather than rejected. Unsupported
//! blue-noise sizes fall back to 64. The only parameter error is a NaN
//! Riemersma decay.

pub mod api;
pub mod color;
pub mod dither;
pub mod output;
pub mod threshold;


pub use api::{
    dither_atkinson, dither_bayer, dither_blue_noise, dither_floyd_steinberg, dither_jjn,
    dither_riemersma, dither_simple_2d, DitherError,
};
pub use color::{luminance, LumaPlane};
pub use dither::{
    Atkinson, Dither, DitherAlgorithm, FloydSteinberg, HilbertPath, JarvisJudiceNinke, Kernel,
    Ordered, ParseAlgorithmError, Riemersma, Simple2D,
};
pub use output::{mono_pixel, MonoRaster, RgbaImage, BLACK, WHITE};
pub use threshold::{
    bayer_matrix, bayer_ranks, blue_noise_matrix, BlueNoiseSource, ThresholdMatrix,
    VoidAndCluster,
};
