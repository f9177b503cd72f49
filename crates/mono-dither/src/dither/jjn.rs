//! Jarvis-Judice-Ninke error diffusion dithering algorithm.

use super::diffusion::diffuse_with_kernel;
use super::{Dither, JARVIS_JUDICE_NINKE};
use crate::api::DitherError;
use crate::color::LumaPlane;
use crate::output::MonoRaster;

/// Jarvis-Judice-Ninke error diffusion (100% propagation, 12 neighbours).
///
/// Spreading the error over three rows produces coarser but less
/// directional texture than Floyd-Steinberg.
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub struct JarvisJudiceNinke;

impl Dither for JarvisJudiceNinke {
    fn dither(&self, luma: &LumaPlane, out: &mut MonoRaster) -> Result<(), DitherError> {
        diffuse_with_kernel(luma, &JARVIS_JUDICE_NINKE, out)
    }
}
