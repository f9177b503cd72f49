//! Two-tone recoloring of dithered output.
//!
//! The engine always produces opaque black and white. Presentation maps
//! those two levels onto a user-chosen dark and light color, either as an
//! RGBA raster or as 1-bit palette indices for an indexed PNG.

use std::fmt;
use std::str::FromStr;

use mono_dither::RgbaImage;

use crate::error::ParseColorError;

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque RGBA bytes.
    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl FromStr for Rgb8 {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`. Parsing is
    /// case-insensitive and surrounding whitespace is trimmed.
    ///
    /// ```
    /// use ditherthat::rendering::Rgb8;
    ///
    /// let ink: Rgb8 = "#1b2a4a".parse().unwrap();
    /// assert_eq!(ink, Rgb8::new(0x1b, 0x2a, 0x4a));
    ///
    /// let paper: Rgb8 = "fe9".parse().unwrap();
    /// assert_eq!(paper, Rgb8::new(0xff, 0xee, 0x99));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Dark and light replacement colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoTone {
    pub dark: Rgb8,
    pub light: Rgb8,
}

impl Default for TwoTone {
    fn default() -> Self {
        Self {
            dark: Rgb8::BLACK,
            light: Rgb8::WHITE,
        }
    }
}

/// Whether a dithered pixel is "on". Engine output is pure black or white.
#[inline]
fn is_light(px: [u8; 4]) -> bool {
    px[0] >= 128
}

impl TwoTone {
    pub fn new(dark: Rgb8, light: Rgb8) -> Self {
        Self { dark, light }
    }

    /// The two colors as a PNG PLTE chunk: index 0 dark, index 1 light.
    pub fn palette(&self) -> [u8; 6] {
        [
            self.dark.r,
            self.dark.g,
            self.dark.b,
            self.light.r,
            self.light.g,
            self.light.b,
        ]
    }

    /// Replace black and white with the dark and light colors.
    pub fn recolor(&self, image: &RgbaImage) -> Vec<u8> {
        let dark = self.dark.to_rgba();
        let light = self.light.to_rgba();
        image
            .pixels()
            .flat_map(|px| if is_light(px) { light } else { dark })
            .collect()
    }

    /// Palette indices (0 dark, 1 light), one per pixel.
    pub fn indices(image: &RgbaImage) -> Vec<u8> {
        image.pixels().map(|px| u8::from(is_light(px))).collect()
    }
}
