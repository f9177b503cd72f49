//! Parameter ranges and defaults.
//!
//! Out-of-range numeric parameters are clamped into their documented range
//! rather than rejected. The one exception is a NaN decay, which has no
//! meaningful nearest value.

use crate::api::DitherError;
use crate::threshold::MAX_BAYER_LEVEL;

/// Default Bayer level (16×16 matrix).
pub const DEFAULT_BAYER_LEVEL: u8 = 3;

/// Riemersma history length bounds and default.
pub const MIN_LIST_LENGTH: usize = 8;
pub const MAX_LIST_LENGTH: usize = 256;
pub const DEFAULT_LIST_LENGTH: usize = 32;

/// Riemersma decay bounds and default.
pub const MIN_DECAY: f32 = 0.05;
pub const MAX_DECAY: f32 = 0.9;
pub const DEFAULT_DECAY: f32 = 0.75;

/// Clamp a signed Bayer level into `0..=5`.
#[inline]
pub fn clamp_level(level: i32) -> u8 {
    level.clamp(0, i32::from(MAX_BAYER_LEVEL)) as u8
}

/// Clamp a history length into `8..=256`.
#[inline]
pub fn clamp_list_length(list_length: usize) -> usize {
    list_length.clamp(MIN_LIST_LENGTH, MAX_LIST_LENGTH)
}

/// Clamp a decay ratio into `0.05..=0.9`.
///
/// Infinities clamp to the nearest bound; NaN is rejected.
pub fn clamp_decay(decay: f32) -> Result<f32, DitherError> {
    if decay.is_nan() {
        return Err(DitherError::UnsupportedParameter {
            name: "decay",
            value: decay.to_string(),
        });
    }
    Ok(decay.clamp(MIN_DECAY, MAX_DECAY))
}
