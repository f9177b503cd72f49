use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use mono_dither::{blue_noise_matrix, DitherAlgorithm, RgbaImage};
use serde::Deserialize;

use super::png_io::{decode_png, encode_gray8, encode_indexed, encode_rgba, optimize};
use super::recolor::TwoTone;
use crate::error::RenderError;

/// PNG layout of rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 1-bit indexed with a two-entry palette.
    #[default]
    Indexed,
    /// 8-bit RGBA.
    Rgba,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "indexed" | "palette" => Ok(Self::Indexed),
            "rgba" => Ok(Self::Rgba),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Indexed => "indexed",
            Self::Rgba => "rgba",
        })
    }
}

/// Everything needed to turn one PNG into a dithered PNG.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderRequest {
    pub algorithm: DitherAlgorithm,
    pub tone: TwoTone,
    pub format: OutputFormat,
    /// Run oxipng over the encoded output.
    pub optimize: bool,
}

/// What a file render produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub width: usize,
    pub height: usize,
    pub bytes: usize,
}

fn dither_and_encode(image: &RgbaImage, request: &RenderRequest) -> Result<Vec<u8>, RenderError> {
    let dithered = request.algorithm.apply(image)?;
    match request.format {
        OutputFormat::Indexed => encode_indexed(&dithered, &request.tone),
        OutputFormat::Rgba => encode_rgba(&dithered, &request.tone),
    }
}

/// Decode a PNG held in memory and return the dithered PNG.
pub fn render_png(input: &[u8], request: &RenderRequest) -> Result<Vec<u8>, RenderError> {
    let image = decode_png(input)?;
    let encoded = dither_and_encode(&image, request)?;
    Ok(if request.optimize {
        optimize(encoded)
    } else {
        encoded
    })
}

/// Render `input` to `output` on disk.
pub fn render_file(
    input: &Path,
    output: &Path,
    request: &RenderRequest,
) -> Result<RenderSummary, RenderError> {
    let start = Instant::now();
    let source = std::fs::read(input)?;
    let image = decode_png(&source)?;
    let (width, height) = (image.width(), image.height());
    tracing::debug!(width, height, algorithm = %request.algorithm, "Decoded input");

    let mut encoded = dither_and_encode(&image, request)?;
    if request.optimize {
        let before = encoded.len();
        encoded = optimize(encoded);
        tracing::debug!(before, after = encoded.len(), "Optimized PNG");
    }
    std::fs::write(output, &encoded)?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        algorithm = %request.algorithm,
        format = %request.format,
        bytes = encoded.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Rendered image"
    );

    Ok(RenderSummary {
        width,
        height,
        bytes: encoded.len(),
    })
}

/// The blue-noise tile for `size` as an 8-bit grayscale PNG.
///
/// Unsupported sizes produce the default tile, so the returned side may
/// differ from the request.
pub fn noise_png(size: usize) -> Result<(usize, Vec<u8>), RenderError> {
    let matrix = blue_noise_matrix(size);
    let side = matrix.size();
    let png_bytes = encode_gray8(side, side, &matrix.to_gray8())?;
    Ok((side, png_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::Rgb8;
    use pretty_assertions::assert_eq;

    fn gray_png(width: usize, height: usize, value: u8) -> Vec<u8> {
        encode_gray8(width, height, &vec![value; width * height]).unwrap()
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("indexed".parse::<OutputFormat>(), Ok(OutputFormat::Indexed));
        assert_eq!("RGBA".parse::<OutputFormat>(), Ok(OutputFormat::Rgba));
        assert!("jpeg".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Rgba.to_string(), "rgba");
    }

    #[test]
    fn test_render_png_uses_two_colors() {
        let request = RenderRequest {
            tone: TwoTone::new(Rgb8::new(40, 20, 10), Rgb8::new(250, 245, 230)),
            ..RenderRequest::default()
        };
        let out = render_png(&gray_png(16, 16, 128), &request).unwrap();
        let image = decode_png(&out).unwrap();
        assert_eq!((image.width(), image.height()), (16, 16));

        let dark = image.pixels().filter(|&px| px == [40, 20, 10, 255]).count();
        let light = image.pixels().filter(|&px| px == [250, 245, 230, 255]).count();
        assert_eq!(dark + light, 256);
        assert!(dark > light, "mid-gray is mostly dark in linear light");
        assert!(light > 0);
    }

    #[test]
    fn test_render_png_rgba_matches_indexed() {
        let input = gray_png(12, 7, 90);
        let indexed = render_png(&input, &RenderRequest::default()).unwrap();
        let rgba = render_png(
            &input,
            &RenderRequest {
                format: OutputFormat::Rgba,
                ..RenderRequest::default()
            },
        )
        .unwrap();
        assert_eq!(
            decode_png(&indexed).unwrap().into_raw(),
            decode_png(&rgba).unwrap().into_raw()
        );
    }

    #[test]
    fn test_render_png_surfaces_engine_errors() {
        let request = RenderRequest {
            algorithm: DitherAlgorithm::Riemersma {
                list_length: 32,
                decay: f32::NAN,
            },
            ..RenderRequest::default()
        };
        let err = render_png(&gray_png(4, 4, 0), &request).unwrap_err();
        assert!(matches!(err, RenderError::Dither(_)));
    }

    #[test]
    fn test_render_file_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        std::fs::write(&input, gray_png(10, 6, 200)).unwrap();

        let summary = render_file(&input, &output, &RenderRequest::default()).unwrap();
        assert_eq!((summary.width, summary.height), (10, 6));
        assert_eq!(summary.bytes, std::fs::metadata(&output).unwrap().len() as usize);
    }

    #[test]
    fn test_render_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_file(
            &dir.path().join("missing.png"),
            &dir.path().join("out.png"),
            &RenderRequest::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn test_noise_png_falls_back_to_default_size() {
        let (side, png_bytes) = noise_png(48).unwrap();
        assert_eq!(side, 64);
        let image = decode_png(&png_bytes).unwrap();
        assert_eq!(image.width(), 64);
    }
}
