//! Unified error type for the mono-dither public API.

use thiserror::Error;

/// Error returned by every dithering entry point.
///
/// The engine is deterministic, so none of these are worth retrying: the
/// same call would fail the same way. Clamping is preferred over rejection
/// for out-of-range parameters; only values that cannot be clamped (a NaN
/// decay) produce [`DitherError::UnsupportedParameter`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DitherError {
    /// Width or height is zero, or `width * height * 4` overflows `usize`.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// The RGBA buffer length does not equal `width * height * 4`.
    #[error("RGBA buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// A destination or staging buffer could not be reserved.
    #[error("failed to allocate {bytes} bytes")]
    AllocationFailure { bytes: usize },

    /// A parameter value that cannot be clamped into range.
    #[error("unsupported value for {name}: {value}")]
    UnsupportedParameter { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_message() {
        let err = DitherError::InvalidDimensions {
            width: 0,
            height: 12,
        };
        assert_eq!(err.to_string(), "invalid image dimensions: 0x12");
    }

    #[test]
    fn test_buffer_size_message() {
        let err = DitherError::BufferSize {
            expected: 16,
            actual: 15,
        };
        assert_eq!(err.to_string(), "RGBA buffer holds 15 bytes, expected 16");
    }

    #[test]
    fn test_allocation_failure_message() {
        let err = DitherError::AllocationFailure { bytes: 1024 };
        assert_eq!(err.to_string(), "failed to allocate 1024 bytes");
    }

    #[test]
    fn test_unsupported_parameter_message() {
        let err = DitherError::UnsupportedParameter {
            name: "decay",
            value: "NaN".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported value for decay: NaN");
    }
}
