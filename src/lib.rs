//! DitherThat
//!
//! Command-line front end for the `mono-dither` engine: PNG decoding and
//! encoding, two-tone recoloring and YAML configuration.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
