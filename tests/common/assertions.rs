//! Assertion helpers for tests.

use ditherthat::rendering::{decode_png, Rgb8};
use mono_dither::RgbaImage;
use pretty_assertions::assert_eq;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Assert the bytes are a PNG and decode them
pub fn assert_png(bytes: &[u8]) -> RgbaImage {
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    decode_png(bytes).expect("output should decode")
}

/// Assert every pixel is one of the two colors; returns (dark, light) counts
pub fn assert_two_tone(image: &RgbaImage, dark: Rgb8, light: Rgb8) -> (usize, usize) {
    let dark_px = dark.to_rgba();
    let light_px = light.to_rgba();
    let mut counts = (0, 0);
    for (i, px) in image.pixels().enumerate() {
        if px == dark_px {
            counts.0 += 1;
        } else if px == light_px {
            counts.1 += 1;
        } else {
            panic!("pixel {i} is {px:?}, expected {dark} or {light}");
        }
    }
    assert_eq!(counts.0 + counts.1, image.width() * image.height());
    counts
}

/// Assert the image is pure black and white
pub fn assert_monochrome(image: &RgbaImage) -> (usize, usize) {
    assert_two_tone(image, Rgb8::BLACK, Rgb8::WHITE)
}
