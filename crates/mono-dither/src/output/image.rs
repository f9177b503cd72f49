//! Owned RGBA8 image buffer.
//!
//! [`RgbaImage`] is both the input and the output type of the typed API.
//! Construction validates the `width * height * 4` invariant once so the
//! algorithms can index without further checks.

use crate::api::DitherError;

/// Compute the RGBA byte length for the given dimensions.
///
/// Fails with [`DitherError::InvalidDimensions`] if either side is zero or
/// the byte count does not fit in `usize`.
pub(crate) fn rgba_len(width: usize, height: usize) -> Result<usize, DitherError> {
    if width == 0 || height == 0 {
        return Err(DitherError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or(DitherError::InvalidDimensions { width, height })
}

/// Validate a borrowed RGBA buffer against its claimed dimensions.
pub(crate) fn check_rgba(pixels: &[u8], width: usize, height: usize) -> Result<(), DitherError> {
    let expected = rgba_len(width, height)?;
    if pixels.len() != expected {
        return Err(DitherError::BufferSize {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// A row-major RGBA8 raster.
///
/// # Example
///
/// ```
/// use mono_dither::RgbaImage;
///
/// let image = RgbaImage::filled(3, 2, [10, 20, 30, 255]).unwrap();
/// assert_eq!(image.width(), 3);
/// assert_eq!(image.as_raw().len(), 3 * 2 * 4);
/// assert_eq!(image.pixel(2, 1), [10, 20, 30, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl RgbaImage {
    /// Wrap an RGBA buffer, checking that its length is `width * height * 4`.
    pub fn new(pixels: Vec<u8>, width: usize, height: usize) -> Result<Self, DitherError> {
        check_rgba(&pixels, width, height)?;
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Create an image where every pixel has the same RGBA value.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Result<Self, DitherError> {
        let len = rgba_len(width, height)?;
        let mut pixels = super::try_alloc::<u8>(len)?;
        for px in pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw RGBA bytes.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image and return its RGBA bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// The RGBA value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = (y * self.width + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Iterate over pixels as `[r, g, b, a]` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.pixels
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Assemble an image from parts already known to be consistent.
    pub(crate) fn from_parts(pixels: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(pixels.len(), width * height * 4);
        Self {
            pixels,
            width,
            height,
        }
    }
}
