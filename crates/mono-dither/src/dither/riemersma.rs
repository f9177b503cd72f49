//! Riemersma dithering.
//!
//! Pixels are visited along a Hilbert curve, which keeps consecutive pixels
//! spatially close without a fixed scan direction. Instead of pushing error
//! forward to fixed neighbours, each pixel pulls a correction from a short
//! history of recent errors, weighted so that older entries fade out
//! geometrically.

use std::collections::VecDeque;

use super::hilbert::HilbertPath;
use super::options::{clamp_decay, clamp_list_length, DEFAULT_DECAY, DEFAULT_LIST_LENGTH};
use super::{Dither, MIDPOINT};
use crate::api::DitherError;
use crate::color::LumaPlane;
use crate::output::MonoRaster;

/// Riemersma dithering with a bounded error history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Riemersma {
    list_length: usize,
    decay: f32,
}

impl Default for Riemersma {
    fn default() -> Self {
        Self {
            list_length: DEFAULT_LIST_LENGTH,
            decay: DEFAULT_DECAY,
        }
    }
}

impl Riemersma {
    /// Clamp `list_length` into `8..=256` and `decay` into `0.05..=0.9`.
    ///
    /// Fails only for a NaN decay.
    pub fn new(list_length: usize, decay: f32) -> Result<Self, DitherError> {
        Ok(Self {
            list_length: clamp_list_length(list_length),
            decay: clamp_decay(decay)?,
        })
    }

    /// Number of errors kept in the history.
    pub fn list_length(&self) -> usize {
        self.list_length
    }

    /// Ratio between the weights of consecutive history entries.
    pub fn decay(&self) -> f32 {
        self.decay
    }

    /// `decay^k` for k = 1 (most recent) up to `list_length`.
    fn weights(&self) -> Vec<f32> {
        let mut w = self.decay;
        (0..self.list_length)
            .map(|_| {
                let cur = w;
                w *= self.decay;
                cur
            })
            .collect()
    }
}

/// Weighted mean of the history, newest entry first.
///
/// Normalizing by the weight sum keeps the correction within the range of
/// a single error, whatever the decay and history length.
#[inline]
fn estimate(history: &VecDeque<f32>, weights: &[f32]) -> f32 {
    let (sum, total) = history
        .iter()
        .rev()
        .zip(weights)
        .fold((0.0f32, 0.0f32), |(sum, total), (&e, &w)| {
            (sum + e * w, total + w)
        });
    if total > 0.0 {
        sum / total
    } else {
        0.0
    }
}

impl Dither for Riemersma {
    fn dither(&self, luma: &LumaPlane, out: &mut MonoRaster) -> Result<(), DitherError> {
        let width = luma.width();
        let weights = self.weights();
        let mut history = VecDeque::new();
        history
            .try_reserve_exact(self.list_length)
            .map_err(|_| DitherError::AllocationFailure {
                bytes: self.list_length * std::mem::size_of::<f32>(),
            })?;

        for (x, y) in HilbertPath::new(width, luma.height()) {
            let adjusted = luma.get(x, y) + estimate(&history, &weights);
            let on = adjusted >= MIDPOINT;
            out.set(y * width + x, on);

            if history.len() == self.list_length {
                history.pop_front();
            }
            history.push_back(adjusted - if on { 255.0 } else { 0.0 });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::test_support::{gray_plane, render};

    fn ramp_plane(width: usize, height: usize) -> LumaPlane {
        let rgba: Vec<u8> = (0..height)
            .flat_map(|_| {
                (0..width).flat_map(move |x| {
                    let v = (x * 255 / (width - 1)) as u8;
                    [v, v, v, 255]
                })
            })
            .collect();
        LumaPlane::from_rgba(&rgba, width, height).unwrap()
    }

    fn white_fraction(out: &[bool]) -> f32 {
        out.iter().filter(|&&on| on).count() as f32 / out.len() as f32
    }

    #[test]
    fn test_parameters_clamped() {
        let r = Riemersma::new(1, 5.0).unwrap();
        assert_eq!(r.list_length(), 8);
        assert_eq!(r.decay(), 0.9);
        let r = Riemersma::new(4096, 0.0).unwrap();
        assert_eq!(r.list_length(), 256);
        assert_eq!(r.decay(), 0.05);
    }

    #[test]
    fn test_nan_decay_rejected() {
        assert!(matches!(
            Riemersma::new(32, f32::NAN),
            Err(DitherError::UnsupportedParameter { name: "decay", .. })
        ));
    }

    #[test]
    fn test_weights_decay_geometrically() {
        let r = Riemersma::new(8, 0.5).unwrap();
        let w = r.weights();
        assert_eq!(w.len(), 8);
        assert_eq!(w[0], 0.5);
        assert_eq!(w[1], 0.25);
        assert_eq!(w[7], 0.00390625);
    }

    #[test]
    fn test_estimate() {
        let weights = [0.5, 0.25];
        assert_eq!(estimate(&VecDeque::new(), &weights), 0.0);
        // Newest entry is at the back and gets the heaviest weight
        let history: VecDeque<f32> = [30.0, -60.0].into_iter().collect();
        assert_eq!(estimate(&history, &weights), (-60.0 * 0.5 + 30.0 * 0.25) / 0.75);
    }

    #[test]
    fn test_tone_preserved() {
        for value in [40u8, 128, 188, 230] {
            let plane = gray_plane(64, 64, value);
            let expected = plane.get(0, 0) / 255.0;
            for (len, decay) in [(32, 0.75), (8, 0.05), (256, 0.9)] {
                let algo = Riemersma::new(len, decay).unwrap();
                let got = white_fraction(&render(&algo, &plane));
                assert!(
                    (got - expected).abs() < 0.01,
                    "sRGB {value}, ({len}, {decay}): expected {expected}, got {got}"
                );
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let plane = ramp_plane(37, 23);
        let algo = Riemersma::default();
        assert_eq!(render(&algo, &plane), render(&algo, &plane));
    }

    #[test]
    fn test_decay_changes_output() {
        let plane = ramp_plane(64, 64);
        let slow = Riemersma::new(32, 0.9).unwrap();
        let fast = Riemersma::new(32, 0.2).unwrap();
        assert_ne!(render(&slow, &plane), render(&fast, &plane));
    }

    #[test]
    fn test_list_length_changes_output() {
        let plane = ramp_plane(64, 64);
        let short = Riemersma::new(8, 0.75).unwrap();
        let long = Riemersma::new(256, 0.75).unwrap();
        assert_ne!(render(&short, &plane), render(&long, &plane));
    }

    #[test]
    fn test_extremes_stay_solid() {
        let algo = Riemersma::default();
        assert!(render(&algo, &gray_plane(9, 5, 0)).iter().all(|&on| !on));
        assert!(render(&algo, &gray_plane(9, 5, 255)).iter().all(|&on| on));
    }
}
