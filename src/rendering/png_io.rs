//! PNG decoding and encoding.
//!
//! Input PNGs of any common layout are normalized to 8-bit RGBA for the
//! engine. Output is written with fast encoder settings; the optional
//! oxipng pass re-compresses afterwards.

use std::io::Cursor;

use mono_dither::RgbaImage;

use super::recolor::TwoTone;
use crate::error::RenderError;

/// Decode a PNG into an RGBA8 image.
///
/// Palette, low bit depth, 16-bit and `tRNS` inputs are expanded to 8 bits
/// per channel before conversion.
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(unsupported(info.color_type, info.bit_depth));
    }

    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        other => return Err(unsupported(other, info.bit_depth)),
    };

    Ok(RgbaImage::new(
        rgba,
        info.width as usize,
        info.height as usize,
    )?)
}

fn unsupported(color_type: png::ColorType, bit_depth: png::BitDepth) -> RenderError {
    RenderError::UnsupportedLayout {
        color_type: format!("{color_type:?}"),
        bit_depth: bit_depth as u8,
    }
}

/// 1-bit indexed PNG with a two-entry palette (0 dark, 1 light).
pub fn encode_indexed(image: &RgbaImage, tone: &TwoTone) -> Result<Vec<u8>, RenderError> {
    let (width, height) = dimensions(image)?;
    let indices = TwoTone::indices(image);
    let packed = pack_nbits(&indices, width, 1);
    encode_png(
        width,
        height,
        png::ColorType::Indexed,
        png::BitDepth::One,
        Some(&tone.palette()[..]),
        &packed,
    )
}

/// 8-bit RGBA PNG with black and white replaced by the two-tone colors.
pub fn encode_rgba(image: &RgbaImage, tone: &TwoTone) -> Result<Vec<u8>, RenderError> {
    let (width, height) = dimensions(image)?;
    let data = tone.recolor(image);
    encode_png(
        width,
        height,
        png::ColorType::Rgba,
        png::BitDepth::Eight,
        None,
        &data,
    )
}

/// 8-bit grayscale PNG from one byte per pixel.
pub fn encode_gray8(width: usize, height: usize, values: &[u8]) -> Result<Vec<u8>, RenderError> {
    let width = to_u32(width)?;
    let height = to_u32(height)?;
    encode_png(
        width,
        height,
        png::ColorType::Grayscale,
        png::BitDepth::Eight,
        None,
        values,
    )
}

/// Re-compress with oxipng (zopfli + adaptive filter selection).
///
/// Falls back to the input when optimization fails.
pub fn optimize(png_bytes: Vec<u8>) -> Vec<u8> {
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => optimized,
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping encoder output");
            png_bytes
        }
    }
}

fn to_u32(value: usize) -> Result<u32, RenderError> {
    u32::try_from(value)
        .map_err(|_| RenderError::PngEncode(format!("dimension {value} exceeds PNG limits")))
}

fn dimensions(image: &RgbaImage) -> Result<(u32, u32), RenderError> {
    Ok((to_u32(image.width())?, to_u32(image.height())?))
}

/// Encode packed pixel data as a PNG.
fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    packed: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(packed)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
///
/// Rows start on a byte boundary; the tail of a short final byte is zero.
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = indices.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width as usize) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}
