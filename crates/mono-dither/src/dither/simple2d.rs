//! Two-neighbour error diffusion.

use super::diffusion::diffuse_with_kernel;
use super::{Dither, SIMPLE_2D};
use crate::api::DitherError;
use crate::color::LumaPlane;
use crate::output::MonoRaster;

/// Simple 2D error diffusion.
///
/// The cheapest diffusion kernel: half of the error goes right, half goes
/// down. Prone to diagonal texture, but tone is preserved exactly in the
/// interior.
///
/// ```text
///    X   1
///    1
/// ```
pub struct Simple2D;

impl Dither for Simple2D {
    fn dither(&self, luma: &LumaPlane, out: &mut MonoRaster) -> Result<(), DitherError> {
        diffuse_with_kernel(luma, &SIMPLE_2D, out)
    }
}
