//! Blue-noise threshold tiles.
//!
//! Tiles are generated with Ulichney's void-and-cluster method on a torus,
//! so they tile seamlessly. The result is a rank permutation in which every
//! prefix (every gray level) is a set of points spread as evenly as
//! possible, with no low-frequency structure.
//!
//! Generation is deterministic: the initial binary pattern comes from an
//! integer hash of the seed, not from an RNG, so every process produces
//! the same tile for the same size.

use std::sync::Arc;

use super::cache::{cached_matrix, MatrixKey};
use super::ThresholdMatrix;

/// Supported tile sides.
pub const BLUE_NOISE_SIZES: [usize; 3] = [32, 64, 128];

/// Tile side used when a caller asks for an unsupported size.
pub const DEFAULT_BLUE_NOISE_SIZE: usize = 64;

/// Produces blue-noise rank tiles.
///
/// The provider only has to return a permutation of `0..size²` with a
/// blue-noise spectrum; a static table and an online generator are
/// interchangeable behind this trait.
pub trait BlueNoiseSource {
    /// Row-major rank table for a `size × size` tile.
    fn ranks(&self, size: usize) -> Vec<u32>;

    /// The tile as a threshold matrix.
    fn matrix(&self, size: usize) -> ThresholdMatrix {
        ThresholdMatrix::from_ranks(size, self.ranks(size))
    }
}

/// Void-and-cluster generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoidAndCluster {
    /// Seed for the initial pattern.
    pub seed: u32,
    /// Standard deviation of the Gaussian energy filter, in pixels.
    pub sigma: f64,
    /// Largest filter radius; the effective radius is also limited by the
    /// tile so the wrapped window never overlaps itself.
    pub radius: usize,
}

impl Default for VoidAndCluster {
    fn default() -> Self {
        Self {
            seed: 0x9e37_79b9,
            sigma: 1.5,
            radius: 6,
        }
    }
}

/// 32-bit integer finalizer (lowbias32).
#[inline]
fn mix(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

/// Binary pattern plus its filtered energy on an N×N torus.
struct EnergyField {
    size: usize,
    ones: Vec<bool>,
    energy: Vec<f64>,
    /// (dx, dy, weight) of the Gaussian window.
    window: Vec<(isize, isize, f64)>,
}

impl EnergyField {
    fn new(size: usize, sigma: f64, radius: usize) -> Self {
        let r = radius.min(size.saturating_sub(1) / 2) as isize;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut window = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
        for dy in -r..=r {
            for dx in -r..=r {
                let d2 = (dx * dx + dy * dy) as f64;
                window.push((dx, dy, (-d2 / two_sigma_sq).exp()));
            }
        }
        Self {
            size,
            ones: vec![false; size * size],
            energy: vec![0.0; size * size],
            window,
        }
    }

    /// Flip a cell and update the energy of its neighbourhood.
    fn toggle(&mut self, index: usize) {
        let on = !self.ones[index];
        self.ones[index] = on;
        let sign = if on { 1.0 } else { -1.0 };
        let n = self.size as isize;
        let x0 = (index % self.size) as isize;
        let y0 = (index / self.size) as isize;
        for &(dx, dy, w) in &self.window {
            let x = (x0 + dx).rem_euclid(n) as usize;
            let y = (y0 + dy).rem_euclid(n) as usize;
            self.energy[y * self.size + x] += sign * w;
        }
    }

    /// Index of the set cell with the highest energy (first on ties).
    fn tightest_cluster(&self) -> Option<usize> {
        let mut best = None;
        let mut best_energy = f64::NEG_INFINITY;
        for (i, (&on, &e)) in self.ones.iter().zip(&self.energy).enumerate() {
            if on && e > best_energy {
                best_energy = e;
                best = Some(i);
            }
        }
        best
    }

    /// Index of the empty cell with the lowest energy (first on ties).
    fn largest_void(&self) -> Option<usize> {
        let mut best = None;
        let mut best_energy = f64::INFINITY;
        for (i, (&on, &e)) in self.ones.iter().zip(&self.energy).enumerate() {
            if !on && e < best_energy {
                best_energy = e;
                best = Some(i);
            }
        }
        best
    }

    fn count(&self) -> usize {
        self.ones.iter().filter(|&&on| on).count()
    }

    fn clone_state(&self) -> Self {
        Self {
            size: self.size,
            ones: self.ones.clone(),
            energy: self.energy.clone(),
            window: self.window.clone(),
        }
    }
}

impl VoidAndCluster {
    fn initial_pattern(&self, field: &mut EnergyField) {
        let total = field.size * field.size;
        for i in 0..total {
            if mix(self.seed.wrapping_add(i as u32)) % 10 == 0 {
                field.toggle(i);
            }
        }
        if field.count() == 0 {
            field.toggle(0);
        }
    }

    /// Move points from clusters into voids until the pattern is stable.
    fn relax(field: &mut EnergyField) {
        let total = field.size * field.size;
        for _ in 0..total {
            let Some(cluster) = field.tightest_cluster() else {
                return;
            };
            field.toggle(cluster);
            let Some(void) = field.largest_void() else {
                field.toggle(cluster);
                return;
            };
            field.toggle(void);
            if void == cluster {
                return;
            }
        }
    }
}

impl BlueNoiseSource for VoidAndCluster {
    fn ranks(&self, size: usize) -> Vec<u32> {
        let total = size * size;
        let mut ranks = vec![0u32; total];
        if total == 0 {
            return ranks;
        }

        let mut prototype = EnergyField::new(size, self.sigma, self.radius);
        self.initial_pattern(&mut prototype);
        Self::relax(&mut prototype);
        let ones = prototype.count();

        // Ranks below the prototype's population: strip clusters
        let mut field = prototype.clone_state();
        for rank in (0..ones).rev() {
            if let Some(i) = field.tightest_cluster() {
                field.toggle(i);
                ranks[i] = rank as u32;
            }
        }

        // Ranks from the population upwards: fill voids
        let mut field = prototype;
        for rank in ones..total {
            if let Some(i) = field.largest_void() {
                field.toggle(i);
                ranks[i] = rank as u32;
            }
        }

        ranks
    }
}

/// Map a requested side to a supported one.
pub(crate) fn supported_size(size: usize) -> usize {
    if BLUE_NOISE_SIZES.contains(&size) {
        size
    } else {
        DEFAULT_BLUE_NOISE_SIZE
    }
}

/// Cached blue-noise tile of side `size`.
///
/// Sizes other than 32, 64 and 128 fall back to the 64 tile. The first call
/// for a size pays for generation; later calls share the result.
pub fn blue_noise_matrix(size: usize) -> Arc<ThresholdMatrix> {
    let size = supported_size(size);
    cached_matrix(MatrixKey::BlueNoise(size), || {
        VoidAndCluster::default().matrix(size)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(size: usize) -> Vec<u32> {
        VoidAndCluster::default().ranks(size)
    }

    #[test]
    fn test_ranks_form_permutation() {
        let ranks = tile(32);
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        assert!(sorted.iter().enumerate().all(|(i, &r)| r as usize == i));
    }

    #[test]
    fn test_sparse_points_never_touch() {
        // At 1/16 density each point should sit about 4 pixels from the next
        for size in [32, 64] {
            let ranks = tile(size);
            let limit = (size * size / 16) as u32;
            let n = size as isize;
            for (i, &r) in ranks.iter().enumerate() {
                if r >= limit {
                    continue;
                }
                let (x, y) = ((i % size) as isize, (i / size) as isize);
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let j = ((y + dy).rem_euclid(n) * n + (x + dx).rem_euclid(n)) as usize;
                        assert!(
                            ranks[j] >= limit,
                            "size {size}: neighbours at {i} and {j}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_neighbouring_ranks_anticorrelated() {
        let size = 32;
        let ranks = tile(size);
        let mean = (size * size - 1) as f64 / 2.0;
        let mut num = 0.0;
        let mut den = 0.0;
        for y in 0..size {
            for x in 0..size {
                let a = ranks[y * size + x] as f64 - mean;
                let b = ranks[y * size + (x + 1) % size] as f64 - mean;
                num += a * b;
                den += a * a;
            }
        }
        let corr = num / den;
        assert!(corr < -0.1, "lag-1 autocorrelation {corr}");
    }

    #[test]
    fn test_half_level_evenly_spread() {
        let size = 64;
        let ranks = tile(size);
        let half = (size * size / 2) as u32;
        for by in (0..size).step_by(8) {
            for bx in (0..size).step_by(8) {
                let count = (by..by + 8)
                    .flat_map(|y| (bx..bx + 8).map(move |x| (x, y)))
                    .filter(|&(x, y)| ranks[y * size + x] < half)
                    .count();
                assert!(
                    (26..=38).contains(&count),
                    "block ({bx}, {by}) has {count} of 64 set"
                );
            }
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(tile(32), tile(32));
    }

    #[test]
    fn test_seed_changes_tile() {
        let other = VoidAndCluster {
            seed: 7,
            ..VoidAndCluster::default()
        };
        assert_ne!(tile(32), other.ranks(32));
    }

    #[test]
    fn test_unsupported_size_falls_back() {
        assert_eq!(supported_size(100), 64);
        assert_eq!(supported_size(0), 64);
        assert_eq!(supported_size(128), 128);
        assert_eq!(blue_noise_matrix(17).size(), 64);
    }

    #[test]
    fn test_mix_avalanche() {
        assert_ne!(mix(0), mix(1));
        assert_eq!(mix(0), 0);
    }
}
