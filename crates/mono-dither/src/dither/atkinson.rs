//! Atkinson error diffusion dithering algorithm.
//!
//! Atkinson dithering distributes only 75% of the quantization error (6/8).
//! The discarded quarter pushes dark tones toward black and light tones
//! toward white, trading tone accuracy for contrast.

use super::diffusion::diffuse_with_kernel;
use super::{Dither, ATKINSON};
use crate::api::DitherError;
use crate::color::LumaPlane;
use crate::output::MonoRaster;

/// Atkinson error diffusion.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// Each neighbour receives 1/8 of the error, for a total of 6/8 = 75%.
pub struct Atkinson;

impl Dither for Atkinson {
    fn dither(&self, luma: &LumaPlane, out: &mut MonoRaster) -> Result<(), DitherError> {
        diffuse_with_kernel(luma, &ATKINSON, out)
    }
}
