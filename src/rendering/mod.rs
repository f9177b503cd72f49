//! Image I/O and presentation around the dithering engine.

mod pipeline;
mod png_io;
mod recolor;

pub use pipeline::{
    noise_png, render_file, render_png, OutputFormat, RenderRequest, RenderSummary,
};
pub use png_io::{decode_png, encode_gray8, encode_indexed, encode_rgba, optimize};
pub use recolor::{Rgb8, TwoTone};
