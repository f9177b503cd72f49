//! PNG fixtures in the layouts the decoder has to accept.

use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Encode raw scanlines with an explicit PNG layout.
pub fn encode_raw(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    palette: Option<&[u8]>,
    trns: Option<&[u8]>,
    data: &[u8],
) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        if let Some(palette) = palette {
            encoder.set_palette(palette);
        }
        if let Some(trns) = trns {
            encoder.set_trns(trns);
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    buf.into_inner()
}

/// 8-bit grayscale PNG filled with one value.
pub fn gray_png(width: u32, height: u32, value: u8) -> Vec<u8> {
    let data = vec![value; (width * height) as usize];
    encode_raw(
        width,
        height,
        png::ColorType::Grayscale,
        png::BitDepth::Eight,
        None,
        None,
        &data,
    )
}

/// 8-bit RGB horizontal ramp from black to white.
pub fn ramp_png(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..height {
        for x in 0..width {
            let v = (x * 255 / (width - 1).max(1)) as u8;
            data.extend_from_slice(&[v, v, v]);
        }
    }
    encode_raw(
        width,
        height,
        png::ColorType::Rgb,
        png::BitDepth::Eight,
        None,
        None,
        &data,
    )
}

/// Write `bytes` to `name` inside `dir` and return the path.
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
