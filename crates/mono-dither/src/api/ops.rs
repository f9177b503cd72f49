//! Flat entry points over raw RGBA buffers.
//!
//! Each function takes a row-major RGBA8 buffer of exactly
//! `width * height * 4` bytes and returns a new buffer of the same size in
//! which every pixel is opaque black or opaque white. The input is never
//! modified and no reference to it is kept.
//!
//! ```
//! let gray = [128u8, 128, 128, 255].repeat(4);
//! let out = mono_dither::dither_bayer(&gray, 2, 2, 0, false).unwrap();
//! assert_eq!(&out[..4], &[255, 255, 255, 255]);
//! assert_eq!(&out[4..8], &[0, 0, 0, 255]);
//! ```

use super::DitherError;
use crate::dither::{clamp_level, DitherAlgorithm, MAX_LIST_LENGTH, MIN_LIST_LENGTH};

fn run(
    algo: DitherAlgorithm,
    rgba: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, DitherError> {
    algo.run(rgba, width, height).map(|image| image.into_raw())
}

/// Ordered dithering with a Bayer matrix of side `2^(level + 1)`.
///
/// `level` is clamped to `0..=5`. With `invert`, every decision is flipped.
pub fn dither_bayer(
    rgba: &[u8],
    width: usize,
    height: usize,
    level: i32,
    invert: bool,
) -> Result<Vec<u8>, DitherError> {
    let level = clamp_level(level);
    run(DitherAlgorithm::Bayer { level, invert }, rgba, width, height)
}

/// Floyd-Steinberg error diffusion.
pub fn dither_floyd_steinberg(
    rgba: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, DitherError> {
    run(DitherAlgorithm::FloydSteinberg, rgba, width, height)
}

/// Ordered dithering with a blue-noise tile.
///
/// `size` selects the 32, 64 or 128 tile; any other value uses the 64 tile.
pub fn dither_blue_noise(
    rgba: &[u8],
    width: usize,
    height: usize,
    size: u32,
) -> Result<Vec<u8>, DitherError> {
    let size = usize::try_from(size).unwrap_or(0);
    run(DitherAlgorithm::BlueNoise { size }, rgba, width, height)
}

/// Two-neighbour error diffusion.
pub fn dither_simple_2d(rgba: &[u8], width: usize, height: usize) -> Result<Vec<u8>, DitherError> {
    run(DitherAlgorithm::Simple2D, rgba, width, height)
}

/// Jarvis-Judice-Ninke error diffusion.
pub fn dither_jjn(rgba: &[u8], width: usize, height: usize) -> Result<Vec<u8>, DitherError> {
    run(DitherAlgorithm::JarvisJudiceNinke, rgba, width, height)
}

/// Atkinson error diffusion.
pub fn dither_atkinson(rgba: &[u8], width: usize, height: usize) -> Result<Vec<u8>, DitherError> {
    run(DitherAlgorithm::Atkinson, rgba, width, height)
}

/// Riemersma dithering along a Hilbert curve.
///
/// `list_length` is clamped to `8..=256` and `r` to `0.05..=0.9`. A NaN
/// `r` fails with [`DitherError::UnsupportedParameter`].
pub fn dither_riemersma(
    rgba: &[u8],
    width: usize,
    height: usize,
    list_length: i32,
    r: f32,
) -> Result<Vec<u8>, DitherError> {
    let list_length = list_length.clamp(MIN_LIST_LENGTH as i32, MAX_LIST_LENGTH as i32) as usize;
    run(
        DitherAlgorithm::Riemersma {
            list_length,
            decay: r,
        },
        rgba,
        width,
        height,
    )
}
