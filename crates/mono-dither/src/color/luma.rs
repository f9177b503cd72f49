use rayon::prelude::*;

use super::lut::srgb8_to_linear;
use crate::api::DitherError;
use crate::output::{check_rgba, try_alloc};

/// Rec.709 luminance weights for linear R, G, B.
const REC709: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Luminance of one sRGB pixel on the 0.0..=255.0 scale.
///
/// Alpha is not an input: transparent pixels dither by their color.
///
/// ```
/// use mono_dither::luminance;
///
/// assert_eq!(luminance(0, 0, 0), 0.0);
/// assert!((luminance(255, 255, 255) - 255.0).abs() < 1e-3);
/// // Mid-gray in sRGB is only ~22% of linear light.
/// assert!((luminance(128, 128, 128) - 55.04).abs() < 0.01);
/// ```
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    let y = REC709[0] * srgb8_to_linear(r)
        + REC709[1] * srgb8_to_linear(g)
        + REC709[2] * srgb8_to_linear(b);
    y.clamp(0.0, 1.0) * 255.0
}

/// Per-invocation luminance staging plane.
///
/// Built from the caller's RGBA buffer before any algorithm runs, then
/// dropped when the call returns.
#[derive(Debug)]
pub struct LumaPlane {
    values: Vec<f32>,
    width: usize,
    height: usize,
}

impl LumaPlane {
    /// Extract luminance from a row-major RGBA8 buffer.
    ///
    /// Rows are converted in parallel; each sample depends only on its own
    /// pixel.
    pub fn from_rgba(rgba: &[u8], width: usize, height: usize) -> Result<Self, DitherError> {
        check_rgba(rgba, width, height)?;
        let mut values = try_alloc::<f32>(width * height)?;
        values
            .par_chunks_exact_mut(width)
            .zip(rgba.par_chunks_exact(width * 4))
            .for_each(|(dst, src)| {
                for (l, px) in dst.iter_mut().zip(src.chunks_exact(4)) {
                    *l = luminance(px[0], px[1], px[2]);
                }
            });
        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Plane width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Luminance at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }

    /// One row of samples.
    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        &self.values[y * self.width..(y + 1) * self.width]
    }

    /// All samples in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}
