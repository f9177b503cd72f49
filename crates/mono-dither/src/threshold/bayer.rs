//! Recursive Bayer (dispersed-dot) matrices.

use std::sync::Arc;

use super::cache::{cached_matrix, MatrixKey};
use super::ThresholdMatrix;

/// Highest supported level; side 2^(5+1) = 64.
pub const MAX_BAYER_LEVEL: u8 = 5;

/// Rank table for a Bayer matrix of side `2^(level + 1)`.
///
/// Starts from the 2×2 base `[0 2; 3 1]` and applies the quadrant
/// expansion `M' = [4M+0 4M+2; 4M+3 4M+1]` once per level. Levels above
/// [`MAX_BAYER_LEVEL`] are clamped.
///
/// ```
/// use mono_dither::bayer_ranks;
///
/// assert_eq!(bayer_ranks(0), vec![0, 2, 3, 1]);
/// assert_eq!(bayer_ranks(1)[..4], [0, 8, 2, 10]);
/// ```
pub fn bayer_ranks(level: u8) -> Vec<u32> {
    let level = level.min(MAX_BAYER_LEVEL);
    let mut ranks = vec![0u32, 2, 3, 1];
    let mut n = 2usize;
    for _ in 0..level {
        let n2 = n * 2;
        let mut next = vec![0u32; n2 * n2];
        for y in 0..n2 {
            for x in 0..n2 {
                let quadrant = match (x >= n, y >= n) {
                    (false, false) => 0,
                    (true, false) => 2,
                    (false, true) => 3,
                    (true, true) => 1,
                };
                next[y * n2 + x] = 4 * ranks[(y % n) * n + x % n] + quadrant;
            }
        }
        ranks = next;
        n = n2;
    }
    ranks
}

/// Cached Bayer threshold matrix for `level` (clamped to 0..=5).
pub fn bayer_matrix(level: u8) -> Arc<ThresholdMatrix> {
    let level = level.min(MAX_BAYER_LEVEL);
    cached_matrix(MatrixKey::Bayer(level), || {
        ThresholdMatrix::from_ranks(2 << level, bayer_ranks(level))
    })
}
