//! Luminance extraction.
//!
//! Dithering decisions are made on a single brightness channel. RGB is
//! decoded to linear light and weighted with the Rec.709 coefficients, so a
//! 50% pattern of black and white pixels corresponds to 50% linear
//! luminance, which is what the eye integrates at viewing distance.

mod luma;
mod lut;

pub use luma::{luminance, LumaPlane};
pub use lut::srgb8_to_linear;
