//! Binary dithering algorithms.
//!
//! Seven algorithms in three families:
//!
//! - **Ordered**: [`Ordered`] with a Bayer or blue-noise threshold matrix.
//!   Per-pixel and parallel.
//! - **Error diffusion**: [`Simple2D`], [`FloydSteinberg`],
//!   [`JarvisJudiceNinke`] and [`Atkinson`], all driven by one
//!   table-based loop over a [`Kernel`].
//! - **Space-filling curve**: [`Riemersma`], which walks a
//!   [`HilbertPath`] with a decaying error history.
//!
//! # Architecture
//!
//! Every algorithm implements the [`Dither`] trait over a luminance plane
//! and an output raster. [`DitherAlgorithm`] is the tagged selection used by
//! the typed API and by configuration files; it owns validation and the
//! single destination allocation.
//!
//! # Example
//!
//! ```
//! use mono_dither::{DitherAlgorithm, RgbaImage};
//!
//! let image = RgbaImage::filled(8, 8, [128, 128, 128, 255]).unwrap();
//! let out = DitherAlgorithm::FloydSteinberg.apply(&image).unwrap();
//! assert_eq!(out.width(), 8);
//! ```

mod atkinson;
mod diffusion;
mod floyd_steinberg;
mod hilbert;
mod jjn;
mod kernel;
mod options;
mod ordered;
mod riemersma;
mod simple2d;

use std::fmt;
use std::str::FromStr;

pub use atkinson::Atkinson;
pub use diffusion::ErrorBuffer;
pub use floyd_steinberg::FloydSteinberg;
pub use hilbert::HilbertPath;
pub use jjn::JarvisJudiceNinke;
pub use kernel::*;
pub use options::*;
pub use ordered::Ordered;
pub use riemersma::Riemersma;
pub use simple2d::Simple2D;

use crate::api::DitherError;
use crate::color::LumaPlane;
use crate::output::{check_rgba, MonoRaster, RgbaImage};
use crate::threshold::DEFAULT_BLUE_NOISE_SIZE;

/// Quantization midpoint for error-carrying algorithms.
///
/// A pixel whose adjusted luminance is at least this value becomes white.
pub const MIDPOINT: f32 = 128.0;

/// Trait for binary dithering algorithms.
///
/// Implementors read luminance from `luma` and write exactly one decision
/// per pixel into `out`, which has the same dimensions.
pub trait Dither {
    /// Dither the whole plane into `out`.
    ///
    /// Only staging allocations can fail.
    fn dither(&self, luma: &LumaPlane, out: &mut MonoRaster) -> Result<(), DitherError>;
}

/// Dither algorithm selection with its parameters.
///
/// Numeric parameters are clamped when the algorithm runs, so any value
/// is accepted here.
///
/// With the `serde` feature this is an internally tagged enum:
///
/// ```yaml
/// kind: bayer
/// level: 4
/// invert: true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind")
)]
pub enum DitherAlgorithm {
    /// Ordered dithering with a Bayer matrix of side `2^(level + 1)`.
    #[cfg_attr(feature = "serde", serde(rename = "bayer"))]
    Bayer {
        #[cfg_attr(feature = "serde", serde(default = "default_level"))]
        level: u8,
        #[cfg_attr(feature = "serde", serde(default))]
        invert: bool,
    },

    /// Ordered dithering with a blue-noise tile of side 32, 64 or 128.
    #[cfg_attr(feature = "serde", serde(rename = "blue-noise"))]
    BlueNoise {
        #[cfg_attr(feature = "serde", serde(default = "default_size"))]
        size: usize,
    },

    /// Two-neighbour error diffusion.
    #[cfg_attr(feature = "serde", serde(rename = "simple-2d"))]
    Simple2D,

    /// Floyd-Steinberg error diffusion (default).
    #[cfg_attr(feature = "serde", serde(rename = "floyd-steinberg"))]
    #[default]
    FloydSteinberg,

    /// Jarvis-Judice-Ninke error diffusion.
    #[cfg_attr(feature = "serde", serde(rename = "jjn"))]
    JarvisJudiceNinke,

    /// Atkinson error diffusion (75% propagation).
    #[cfg_attr(feature = "serde", serde(rename = "atkinson"))]
    Atkinson,

    /// Hilbert-curve dithering with a decaying error history.
    #[cfg_attr(feature = "serde", serde(rename = "riemersma"))]
    Riemersma {
        #[cfg_attr(feature = "serde", serde(default = "default_list_length"))]
        list_length: usize,
        #[cfg_attr(feature = "serde", serde(default = "default_decay"))]
        decay: f32,
    },
}

#[cfg(feature = "serde")]
fn default_level() -> u8 {
    DEFAULT_BAYER_LEVEL
}

#[cfg(feature = "serde")]
fn default_size() -> usize {
    DEFAULT_BLUE_NOISE_SIZE
}

#[cfg(feature = "serde")]
fn default_list_length() -> usize {
    DEFAULT_LIST_LENGTH
}

#[cfg(feature = "serde")]
fn default_decay() -> f32 {
    DEFAULT_DECAY
}

impl DitherAlgorithm {
    /// Every algorithm with default parameters, in presentation order.
    pub const ALL: [DitherAlgorithm; 7] = [
        DitherAlgorithm::Bayer {
            level: DEFAULT_BAYER_LEVEL,
            invert: false,
        },
        DitherAlgorithm::BlueNoise {
            size: DEFAULT_BLUE_NOISE_SIZE,
        },
        DitherAlgorithm::Simple2D,
        DitherAlgorithm::FloydSteinberg,
        DitherAlgorithm::JarvisJudiceNinke,
        DitherAlgorithm::Atkinson,
        DitherAlgorithm::Riemersma {
            list_length: DEFAULT_LIST_LENGTH,
            decay: DEFAULT_DECAY,
        },
    ];

    /// Stable identifier, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bayer { .. } => "bayer",
            Self::BlueNoise { .. } => "blue-noise",
            Self::Simple2D => "simple-2d",
            Self::FloydSteinberg => "floyd-steinberg",
            Self::JarvisJudiceNinke => "jjn",
            Self::Atkinson => "atkinson",
            Self::Riemersma { .. } => "riemersma",
        }
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Bayer { .. } => {
                "Ordered dithering with a recursive Bayer matrix; regular crosshatch texture"
            }
            Self::BlueNoise { .. } => {
                "Ordered dithering with a blue-noise tile; even, grain-like texture"
            }
            Self::Simple2D => "Error diffusion to the right and below; fast, slightly streaky",
            Self::FloydSteinberg => "Classic four-neighbour error diffusion",
            Self::JarvisJudiceNinke => {
                "Twelve-neighbour error diffusion over three rows; smooth gradients"
            }
            Self::Atkinson => "Error diffusion that keeps a quarter of the error; high contrast",
            Self::Riemersma { .. } => {
                "Hilbert-curve walk with a decaying error history; no directional artifacts"
            }
        }
    }

    /// Dither an RGBA image into a new black and white image.
    pub fn apply(&self, image: &RgbaImage) -> Result<RgbaImage, DitherError> {
        self.run(image.as_raw(), image.width(), image.height())
    }

    /// Dither a borrowed RGBA buffer.
    ///
    /// Validates the buffer, then the parameters, extracts luminance,
    /// reserves the single output buffer and runs one algorithm. The input
    /// is never modified.
    pub fn run(&self, rgba: &[u8], width: usize, height: usize) -> Result<RgbaImage, DitherError> {
        check_rgba(rgba, width, height)?;
        let ditherer = self.ditherer()?;
        let luma = LumaPlane::from_rgba(rgba, width, height)?;
        let mut out = MonoRaster::new(width, height)?;
        ditherer.dither(&luma, &mut out)?;
        Ok(out.into_image())
    }

    /// The configured algorithm behind the [`Dither`] trait.
    pub fn ditherer(&self) -> Result<Box<dyn Dither + Send + Sync>, DitherError> {
        Ok(match *self {
            Self::Bayer { level, invert } => Box::new(Ordered::bayer(level, invert)),
            Self::BlueNoise { size } => Box::new(Ordered::blue_noise(size)),
            Self::Simple2D => Box::new(Simple2D),
            Self::FloydSteinberg => Box::new(FloydSteinberg),
            Self::JarvisJudiceNinke => Box::new(JarvisJudiceNinke),
            Self::Atkinson => Box::new(Atkinson),
            Self::Riemersma { list_length, decay } => {
                Box::new(Riemersma::new(list_length, decay)?)
            }
        })
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an algorithm name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dither algorithm: {0}")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for DitherAlgorithm {
    type Err = ParseAlgorithmError;

    /// Parse a name into an algorithm with default parameters.
    ///
    /// Accepts the names from [`DitherAlgorithm::name`] plus the short
    /// aliases `blue`, `simple`, `floyd` and `fs`. Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let found = match name.as_str() {
            "blue" | "bluenoise" | "blue_noise" => Some(Self::ALL[1]),
            "simple" | "simple2d" | "simple_2d" => Some(Self::ALL[2]),
            "floyd" | "fs" | "floyd_steinberg" => Some(Self::ALL[3]),
            "jarvis" | "jarvis-judice-ninke" => Some(Self::ALL[4]),
            other => Self::ALL.iter().copied().find(|a| a.name() == other),
        };
        found.ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Luminance plane of a flat sRGB gray.
    pub fn gray_plane(width: usize, height: usize, value: u8) -> LumaPlane {
        let rgba = [value, value, value, 255].repeat(width * height);
        LumaPlane::from_rgba(&rgba, width, height).unwrap()
    }

    /// Run an algorithm and return its decisions in row-major order.
    pub fn render(algo: &dyn Dither, plane: &LumaPlane) -> Vec<bool> {
        let mut raster = MonoRaster::new(plane.width(), plane.height()).unwrap();
        algo.dither(plane, &mut raster).unwrap();
        raster
            .into_image()
            .pixels()
            .map(|px| px == crate::output::WHITE)
            .collect()
    }

    /// Fraction of white pixels, ignoring a `border`-pixel frame.
    pub fn interior_white_fraction(out: &[bool], width: usize, height: usize, border: usize) -> f32 {
        let mut on = 0usize;
        let mut total = 0usize;
        for y in border..height - border {
            for x in border..width - border {
                total += 1;
                if out[y * width + x] {
                    on += 1;
                }
            }
        }
        on as f32 / total as f32
    }
}
