//! sRGB decoding table.
//!
//! The table is generated at compile time by build.rs from the exact
//! IEC 61966-2-1 transfer function, one entry per 8-bit code value.

include!(concat!(env!("OUT_DIR"), "/srgb_lut.rs"));

/// Decode an 8-bit sRGB code value to linear light in 0.0..=1.0.
#[inline]
pub fn srgb8_to_linear(value: u8) -> f32 {
    SRGB8_TO_LINEAR[value as usize]
}
