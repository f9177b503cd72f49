//! End-to-end renders through the file pipeline.

mod common;

use common::*;
use ditherthat::models::{AppConfig, ConfigSource};
use ditherthat::rendering::{render_file, render_png, OutputFormat, RenderRequest, Rgb8, TwoTone};
use mono_dither::DitherAlgorithm;
use pretty_assertions::assert_eq;

#[test]
fn test_every_algorithm_renders_monochrome() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "ramp.png", &ramp_png(33, 9));

    for algorithm in DitherAlgorithm::ALL {
        let output = dir.path().join(format!("{}.png", algorithm.name()));
        let request = RenderRequest {
            algorithm,
            ..RenderRequest::default()
        };
        let summary = render_file(&input, &output, &request).unwrap();
        assert_eq!((summary.width, summary.height), (33, 9));

        let image = assert_png(&std::fs::read(&output).unwrap());
        let (dark, light) = assert_monochrome(&image);
        assert!(dark > 0 && light > 0, "{algorithm}: ramp lost a tone");
    }
}

#[test]
fn test_recolored_output() {
    let dark = Rgb8::new(0x1b, 0x2a, 0x4a);
    let light = Rgb8::new(0xf4, 0xec, 0xd8);
    for format in [OutputFormat::Indexed, OutputFormat::Rgba] {
        let request = RenderRequest {
            algorithm: DitherAlgorithm::Bayer {
                level: 2,
                invert: false,
            },
            tone: TwoTone::new(dark, light),
            format,
            optimize: false,
        };
        let out = render_png(&ramp_png(16, 16), &request).unwrap();
        let image = assert_png(&out);
        let (d, l) = assert_two_tone(&image, dark, light);
        assert!(d > 0 && l > 0, "{format}");
    }
}

#[test]
fn test_solid_inputs_stay_solid() {
    let black = render_png(&gray_png(7, 5, 0), &RenderRequest::default()).unwrap();
    assert_eq!(assert_monochrome(&assert_png(&black)), (35, 0));

    let white = render_png(&gray_png(7, 5, 255), &RenderRequest::default()).unwrap();
    assert_eq!(assert_monochrome(&assert_png(&white)), (0, 35));
}

#[test]
fn test_optimized_output_has_same_pixels() {
    let input = ramp_png(40, 12);
    let plain = render_png(&input, &RenderRequest::default()).unwrap();
    let optimized = render_png(
        &input,
        &RenderRequest {
            optimize: true,
            ..RenderRequest::default()
        },
    )
    .unwrap();
    assert_eq!(
        assert_png(&plain).into_raw(),
        assert_png(&optimized).into_raw()
    );
}

#[test]
fn test_config_file_drives_render() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_fixture(
        dir.path(),
        "ditherthat.yaml",
        br##"
algorithm:
  kind: bayer
  level: 0
colors:
  dark: "#102030"
  light: "#f0e0d0"
output:
  format: rgba
"##,
    );
    let config = AppConfig::load(&ConfigSource::Flag(config_path));
    let request = config.render_request();
    assert_eq!(request.format, OutputFormat::Rgba);

    // 2x2 sRGB 128 at level 0: only the top-left cell clears its threshold
    let input = write_fixture(dir.path(), "gray.png", &gray_png(2, 2, 128));
    let output = dir.path().join("out.png");
    render_file(&input, &output, &request).unwrap();

    let image = assert_png(&std::fs::read(&output).unwrap());
    let light = [0xf0, 0xe0, 0xd0, 255];
    let dark = [0x10, 0x20, 0x30, 255];
    assert_eq!(image.pixels().collect::<Vec<_>>(), vec![light, dark, dark, dark]);
}

#[test]
fn test_render_is_deterministic() {
    let input = ramp_png(24, 24);
    let request = RenderRequest {
        algorithm: DitherAlgorithm::Riemersma {
            list_length: 16,
            decay: 0.5,
        },
        ..RenderRequest::default()
    };
    assert_eq!(
        render_png(&input, &request).unwrap(),
        render_png(&input, &request).unwrap()
    );
}
