//! Threshold matrices for ordered dithering.
//!
//! A [`ThresholdMatrix`] is an N×N tile of rank-derived thresholds that is
//! repeated across the image. Two generators are provided:
//!
//! - [`bayer_matrix`]: recursive dispersed-dot matrices, side 2..=64
//! - [`blue_noise_matrix`]: void-and-cluster blue noise, side 32, 64 or 128
//!
//! Both are memoized process-wide (see [`cache`]) and handed out as
//! `Arc<ThresholdMatrix>`, so repeated calls with the same parameter share
//! one immutable matrix.

mod bayer;
mod blue_noise;
pub mod cache;

pub use bayer::{bayer_matrix, bayer_ranks, MAX_BAYER_LEVEL};
pub use blue_noise::{
    blue_noise_matrix, BlueNoiseSource, VoidAndCluster, BLUE_NOISE_SIZES, DEFAULT_BLUE_NOISE_SIZE,
};
pub use cache::MatrixKey;

/// An N×N tiled threshold map with values in (0, 255).
///
/// Thresholds are derived from a rank permutation `0..N²` as
/// `(rank + 0.5) * 255 / N²`, which keeps every threshold strictly inside
/// the luminance range: pure black never turns on and pure white never
/// turns off.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdMatrix {
    size: usize,
    ranks: Vec<u32>,
    thresholds: Vec<f32>,
}

impl ThresholdMatrix {
    /// Build a matrix from a row-major rank table.
    ///
    /// # Panics
    ///
    /// Panics if `ranks.len() != size * size`. Ranks come from the
    /// generators in this module, never from callers.
    pub fn from_ranks(size: usize, ranks: Vec<u32>) -> Self {
        assert_eq!(ranks.len(), size * size, "rank table does not match size");
        let cells = (size * size) as f32;
        let thresholds = ranks
            .iter()
            .map(|&r| (r as f32 + 0.5) * 255.0 / cells)
            .collect();
        Self {
            size,
            ranks,
            thresholds,
        }
    }

    /// Side length N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tiled threshold for image coordinate `(x, y)`.
    #[inline]
    pub fn threshold(&self, x: usize, y: usize) -> f32 {
        self.thresholds[(y % self.size) * self.size + x % self.size]
    }

    /// One row of thresholds, for the image row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        let start = (y % self.size) * self.size;
        &self.thresholds[start..start + self.size]
    }

    /// Tiled rank for image coordinate `(x, y)`.
    #[inline]
    pub fn rank(&self, x: usize, y: usize) -> u32 {
        self.ranks[(y % self.size) * self.size + x % self.size]
    }

    /// Row-major ranks of one tile.
    #[inline]
    pub fn ranks(&self) -> &[u32] {
        &self.ranks
    }

    /// The tile as 8-bit gray levels, rank scaled onto 0..=255.
    pub fn to_gray8(&self) -> Vec<u8> {
        let cells = (self.size * self.size) as u64;
        self.ranks
            .iter()
            .map(|&r| (u64::from(r) * 256 / cells) as u8)
            .collect()
    }
}
