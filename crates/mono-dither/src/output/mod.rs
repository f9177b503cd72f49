//! Image buffers and the binary output compositor.

mod image;
mod raster;

pub use image::RgbaImage;
pub use raster::{mono_pixel, MonoRaster, BLACK, WHITE};

pub(crate) use image::{check_rgba, rgba_len};
pub(crate) use raster::set_in_row;

use crate::api::DitherError;

/// Allocate a zero/default-filled vector, reporting failure instead of aborting.
pub(crate) fn try_alloc<T: Clone + Default>(len: usize) -> Result<Vec<T>, DitherError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| DitherError::AllocationFailure {
            bytes: len.saturating_mul(std::mem::size_of::<T>()),
        })?;
    buf.resize(len, T::default());
    Ok(buf)
}
