//! Ordered (threshold matrix) dithering.
//!
//! Each pixel is compared against a tiled threshold independently of its
//! neighbours, so rows are processed in parallel and the output is stable
//! under cropping: a pixel's decision depends only on its value and its
//! position modulo the tile size.

use std::sync::Arc;

use rayon::prelude::*;

use super::Dither;
use crate::api::DitherError;
use crate::color::LumaPlane;
use crate::output::{set_in_row, MonoRaster};
use crate::threshold::{bayer_matrix, blue_noise_matrix, ThresholdMatrix};

/// Ordered dithering against a shared threshold matrix.
///
/// A pixel is on when its luminance is at least the tiled threshold; with
/// `invert` set, that decision is flipped.
#[derive(Debug, Clone)]
pub struct Ordered {
    matrix: Arc<ThresholdMatrix>,
    invert: bool,
}

impl Ordered {
    /// Ordered dithering with an arbitrary matrix.
    pub fn new(matrix: Arc<ThresholdMatrix>, invert: bool) -> Self {
        Self { matrix, invert }
    }

    /// Bayer matrix of side `2^(level + 1)`, level clamped to 0..=5.
    pub fn bayer(level: u8, invert: bool) -> Self {
        Self::new(bayer_matrix(level), invert)
    }

    /// Blue-noise tile; unsupported sizes use the 64 tile.
    pub fn blue_noise(size: usize) -> Self {
        Self::new(blue_noise_matrix(size), false)
    }

    /// The threshold matrix in use.
    pub fn matrix(&self) -> &ThresholdMatrix {
        &self.matrix
    }
}

impl Dither for Ordered {
    fn dither(&self, luma: &LumaPlane, out: &mut MonoRaster) -> Result<(), DitherError> {
        let n = self.matrix.size();
        out.par_rows_mut().for_each(|(y, row)| {
            let thresholds = self.matrix.row(y);
            for (x, &l) in luma.row(y).iter().enumerate() {
                let on = l >= thresholds[x % n];
                set_in_row(row, x, on != self.invert);
            }
        });
        Ok(())
    }
}
