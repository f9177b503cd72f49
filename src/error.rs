use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported PNG layout: {color_type} at {bit_depth} bits")]
    UnsupportedLayout { color_type: String, bit_depth: u8 },

    #[error("Invalid color: {0}")]
    Color(#[from] ParseColorError),

    #[error("Dither error: {0}")]
    Dither(#[from] mono_dither::DitherError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned when parsing a hex color string fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,

    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}
