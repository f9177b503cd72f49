//! Floyd-Steinberg error diffusion dithering algorithm.

use super::diffusion::diffuse_with_kernel;
use super::{Dither, FLOYD_STEINBERG};
use crate::api::DitherError;
use crate::color::LumaPlane;
use crate::output::MonoRaster;

/// Floyd-Steinberg error diffusion (100% propagation, 4 neighbours).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(&self, luma: &LumaPlane, out: &mut MonoRaster) -> Result<(), DitherError> {
        diffuse_with_kernel(luma, &FLOYD_STEINBERG, out)
    }
}
