//! Public API for the mono-dither crate.
//!
//! This module provides the seven flat entry points in [`ops`] and the
//! unified [`DitherError`] type.

mod error;
pub mod ops;

pub use error::DitherError;
pub use ops::*;
