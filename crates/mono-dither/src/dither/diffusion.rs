//! Shared error diffusion loop.

use super::kernel::Kernel;
use super::MIDPOINT;
use crate::api::DitherError;
use crate::color::LumaPlane;
use crate::output::{try_alloc, MonoRaster};

/// Sliding window of error rows.
///
/// Only the rows a kernel can reach are stored: `rows[0]` is the current
/// row, `rows[1]` the next, and so on up to `max_dy`.
#[derive(Debug)]
pub struct ErrorBuffer {
    rows: Vec<Vec<f32>>,
    width: usize,
}

impl ErrorBuffer {
    /// Reserve `row_depth` zeroed rows of `width` samples.
    pub fn new(width: usize, row_depth: usize) -> Result<Self, DitherError> {
        let mut rows = Vec::with_capacity(row_depth);
        for _ in 0..row_depth {
            rows.push(try_alloc::<f32>(width)?);
        }
        Ok(Self { rows, width })
    }

    /// Error accumulated so far for `x` in the current row.
    #[inline]
    pub fn get_accumulated(&self, x: usize) -> f32 {
        self.rows[0][x]
    }

    /// Add error to a pixel `row_offset` rows below the current one.
    ///
    /// Out-of-range targets are ignored, which drops that share of the error.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: f32) {
        if x < self.width && row_offset < self.rows.len() {
            self.rows[row_offset][x] += error;
        }
    }

    /// Move to the next row, recycling the finished row as the deepest one.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill(0.0);
        }
    }
}

/// Error diffusion parameterized by kernel.
///
/// Pixels are visited left to right, top to bottom. Each one is quantized
/// against [`MIDPOINT`] after adding the error it has received; the
/// difference between that adjusted value and 0 or 255 is then split over
/// the kernel's targets. Targets outside the image lose their share, and
/// accumulated values are not clamped.
pub(crate) fn diffuse_with_kernel(
    luma: &LumaPlane,
    kernel: &Kernel,
    out: &mut MonoRaster,
) -> Result<(), DitherError> {
    let width = luma.width();
    let height = luma.height();
    let divisor = f32::from(kernel.divisor);
    let mut errors = ErrorBuffer::new(width, kernel.max_dy + 1)?;

    for y in 0..height {
        let row = luma.row(y);
        for (x, &l) in row.iter().enumerate() {
            let adjusted = l + errors.get_accumulated(x);
            let on = adjusted >= MIDPOINT;
            out.set(y * width + x, on);

            let error = adjusted - if on { 255.0 } else { 0.0 };
            if error == 0.0 {
                continue;
            }
            for &(dx, dy, weight) in kernel.entries {
                let Some(tx) = x.checked_add_signed(dx as isize) else {
                    continue;
                };
                if y + (dy as usize) < height {
                    errors.add_error(tx, dy as usize, error * f32::from(weight) / divisor);
                }
            }
        }
        errors.advance_row();
    }
    Ok(())
}
