//! Binary output compositor.
//!
//! Every algorithm writes its decisions through [`MonoRaster`], which owns
//! the single destination allocation of a dither call. A pixel is either
//! [`BLACK`] or [`WHITE`]; alpha is always 255 regardless of the input alpha.
//! Downstream recoloring relies on this: any channel `>= 128` means "on".

use rayon::prelude::*;

use super::{try_alloc, RgbaImage};
use crate::api::DitherError;

/// Opaque black, the "off" pixel.
pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Opaque white, the "on" pixel.
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// The RGBA value for a binary decision.
#[inline]
pub fn mono_pixel(on: bool) -> [u8; 4] {
    if on {
        WHITE
    } else {
        BLACK
    }
}

/// Destination buffer for a dither call.
#[derive(Debug)]
pub struct MonoRaster {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl MonoRaster {
    /// Reserve an all-black raster.
    pub(crate) fn new(width: usize, height: usize) -> Result<Self, DitherError> {
        let len = super::image::rgba_len(width, height)?;
        let mut pixels = try_alloc::<u8>(len)?;
        pixels.par_chunks_exact_mut(4).for_each(|px| px.copy_from_slice(&BLACK));
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Raster width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Write the decision for the pixel at row-major `index`.
    #[inline]
    pub fn set(&mut self, index: usize, on: bool) {
        let i = index * 4;
        self.pixels[i..i + 4].copy_from_slice(&mono_pixel(on));
    }

    /// Parallel iterator over `(y, row_bytes)` for per-row writers.
    pub(crate) fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = (usize, &mut [u8])> {
        self.pixels
            .par_chunks_exact_mut(self.width * 4)
            .enumerate()
    }

    /// Hand the buffer to the caller.
    pub fn into_image(self) -> RgbaImage {
        RgbaImage::from_parts(self.pixels, self.width, self.height)
    }
}

/// Write a decision into the `x`-th pixel of a row slice.
#[inline]
pub(crate) fn set_in_row(row: &mut [u8], x: usize, on: bool) {
    let i = x * 4;
    row[i..i + 4].copy_from_slice(&mono_pixel(on));
}
