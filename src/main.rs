use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ditherthat::models::{AppConfig, ConfigSource, CONFIG_ENV, DEFAULT_CONFIG_FILE};
use ditherthat::rendering::{self, OutputFormat, Rgb8};
use mono_dither::dither::{clamp_level, DEFAULT_BAYER_LEVEL};
use mono_dither::{bayer_matrix, DitherAlgorithm};

#[derive(Parser)]
#[command(name = "ditherthat")]
#[command(version)]
#[command(about = "Binary dithering of PNG images")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (overrides DITHERTHAT_CONFIG and ./ditherthat.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dither a PNG file
    Render {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Algorithm name (see `ditherthat algorithms`)
        #[arg(short, long)]
        algorithm: Option<DitherAlgorithm>,

        /// Bayer level, clamped to 0..=5
        #[arg(long, allow_negative_numbers = true)]
        level: Option<i32>,

        /// Invert the Bayer threshold decision
        #[arg(long)]
        invert: bool,

        /// Blue-noise tile size (32, 64 or 128)
        #[arg(long)]
        size: Option<usize>,

        /// Riemersma error history length, clamped to 8..=256
        #[arg(long)]
        list_length: Option<usize>,

        /// Riemersma decay ratio, clamped to 0.05..=0.9
        #[arg(long)]
        decay: Option<f32>,

        /// Color for black pixels (hex, e.g. "#1b2a4a")
        #[arg(long)]
        dark: Option<Rgb8>,

        /// Color for white pixels (hex, e.g. "#f4ecd8")
        #[arg(long)]
        light: Option<Rgb8>,

        /// Output layout: indexed or rgba
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Re-compress the output with oxipng
        #[arg(long)]
        optimize: bool,
    },
    /// List available algorithms
    Algorithms,
    /// Export a blue-noise threshold tile as a grayscale PNG
    Noise {
        /// Tile size (32, 64 or 128)
        #[arg(short, long, default_value_t = 64)]
        size: usize,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print a Bayer rank matrix
    Matrix {
        /// Matrix level, clamped to 0..=5
        #[arg(short, long, default_value_t = DEFAULT_BAYER_LEVEL as i32, allow_negative_numbers = true)]
        level: i32,
    },
}

/// Parameter flags from the command line, applied on top of the config.
#[derive(Debug, Default)]
struct AlgorithmOverrides {
    algorithm: Option<DitherAlgorithm>,
    level: Option<i32>,
    invert: bool,
    size: Option<usize>,
    list_length: Option<usize>,
    decay: Option<f32>,
}

impl AlgorithmOverrides {
    /// Replace the configured algorithm if one was named, then patch the
    /// parameters that belong to the resulting variant.
    fn apply(self, configured: DitherAlgorithm) -> DitherAlgorithm {
        let mut algorithm = self.algorithm.unwrap_or(configured);
        match &mut algorithm {
            DitherAlgorithm::Bayer { level, invert } => {
                if let Some(l) = self.level {
                    *level = clamp_level(l);
                }
                *invert |= self.invert;
            }
            DitherAlgorithm::BlueNoise { size } => {
                if let Some(s) = self.size {
                    *size = s;
                }
            }
            DitherAlgorithm::Riemersma { list_length, decay } => {
                if let Some(n) = self.list_length {
                    *list_length = n;
                }
                if let Some(r) = self.decay {
                    *decay = r;
                }
            }
            _ => {}
        }
        algorithm
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            algorithm,
            level,
            invert,
            size,
            list_length,
            decay,
            dark,
            light,
            format,
            optimize,
        }) => {
            init_tracing();
            let source = ConfigSource::discover(cli.config);
            let config = AppConfig::load(&source);
            let mut request = config.render_request();
            request.algorithm = AlgorithmOverrides {
                algorithm,
                level,
                invert,
                size,
                list_length,
                decay,
            }
            .apply(request.algorithm);
            if let Some(dark) = dark {
                request.tone.dark = dark;
            }
            if let Some(light) = light {
                request.tone.light = light;
            }
            if let Some(format) = format {
                request.format = format;
            }
            request.optimize |= optimize;

            let summary = rendering::render_file(&input, &output, &request)
                .with_context(|| format!("Failed to render {}", input.display()))?;
            println!(
                "Rendered {}x{} image with {} to {} ({} bytes)",
                summary.width,
                summary.height,
                request.algorithm,
                output.display(),
                summary.bytes
            );
            Ok(())
        }
        Some(Commands::Algorithms) => {
            run_algorithms_command();
            Ok(())
        }
        Some(Commands::Noise { size, output }) => {
            init_tracing();
            run_noise_command(size, &output)
        }
        Some(Commands::Matrix { level }) => {
            run_matrix_command(level);
            Ok(())
        }
        None => {
            run_status_command(cli.config);
            Ok(())
        }
    }
}

/// Logging for CLI commands, filtered by RUST_LOG
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ditherthat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn run_algorithms_command() {
    println!("Algorithms:");
    for algorithm in DitherAlgorithm::ALL {
        println!("  {:<16} {}", algorithm.name(), algorithm.description());
    }
}

fn run_noise_command(size: usize, output: &Path) -> anyhow::Result<()> {
    let (side, png_bytes) =
        rendering::noise_png(size).context("Failed to encode blue-noise tile")?;
    if side != size {
        tracing::warn!(requested = size, used = side, "Unsupported tile size");
    }
    std::fs::write(output, &png_bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(size = side, output = %output.display(), "Wrote blue-noise tile");
    Ok(())
}

fn run_matrix_command(level: i32) {
    let level = clamp_level(level);
    let matrix = bayer_matrix(level);
    let side = matrix.size();
    let width = (side * side - 1).to_string().len();
    println!("Bayer level {level} ({side}x{side}):");
    for row in matrix.ranks().chunks(side) {
        let line: Vec<String> = row.iter().map(|r| format!("{r:>width$}")).collect();
        println!("  {}", line.join(" "));
    }
}

/// Display status and configuration information
fn run_status_command(flag: Option<PathBuf>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_env = std::env::var(CONFIG_ENV).ok();

    // Header
    println!("DitherThat v{VERSION}");
    println!("Binary dithering of PNG images\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        config_env.as_deref().unwrap_or("(not set)")
    );

    // Config section
    let source = ConfigSource::discover(flag);
    let config = AppConfig::load(&source);
    println!("\nConfiguration:");
    println!("  Source:    {source}");
    if matches!(source, ConfigSource::Defaults) {
        println!("             (create ./{DEFAULT_CONFIG_FILE} to customize)");
    }
    println!("  Algorithm: {}", config.algorithm);
    println!(
        "  Colors:    dark {} / light {}",
        config.colors.dark, config.colors.light
    );
    println!(
        "  Output:    {}{}",
        config.output.format,
        if config.output.optimize {
            ", optimized"
        } else {
            ""
        }
    );

    // Commands section
    println!("\nCommands:");
    println!("  ditherthat render      Dither a PNG file");
    println!("  ditherthat algorithms  List available algorithms");
    println!("  ditherthat noise       Export the blue-noise tile");
    println!("  ditherthat matrix      Print a Bayer rank matrix");
    println!("\nRun 'ditherthat --help' for more details.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_arguments_parse() {
        let cli = Cli::try_parse_from([
            "ditherthat",
            "render",
            "in.png",
            "-o",
            "out.png",
            "-a",
            "bayer",
            "--level",
            "-1",
            "--dark",
            "#102030",
            "--format",
            "rgba",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Render {
                algorithm,
                level,
                dark,
                format,
                ..
            }) => {
                assert!(matches!(algorithm, Some(DitherAlgorithm::Bayer { .. })));
                assert_eq!(level, Some(-1));
                assert_eq!(dark, Some(Rgb8::new(0x10, 0x20, 0x30)));
                assert_eq!(format, Some(OutputFormat::Rgba));
            }
            _ => panic!("Expected render command"),
        }
    }

    #[test]
    fn test_bad_color_rejected() {
        let result = Cli::try_parse_from([
            "ditherthat",
            "render",
            "in.png",
            "-o",
            "out.png",
            "--light",
            "#zzzzzz",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_patch_matching_variant() {
        let overrides = AlgorithmOverrides {
            level: Some(9),
            invert: true,
            decay: Some(0.5),
            ..Default::default()
        };
        let patched = overrides.apply(DitherAlgorithm::Bayer {
            level: 1,
            invert: false,
        });
        assert_eq!(
            patched,
            DitherAlgorithm::Bayer {
                level: 5,
                invert: true
            }
        );
    }

    #[test]
    fn test_overrides_replace_algorithm() {
        let overrides = AlgorithmOverrides {
            algorithm: Some(DitherAlgorithm::Riemersma {
                list_length: 32,
                decay: 0.75,
            }),
            list_length: Some(64),
            level: Some(2),
            ..Default::default()
        };
        let patched = overrides.apply(DitherAlgorithm::Atkinson);
        assert_eq!(
            patched,
            DitherAlgorithm::Riemersma {
                list_length: 64,
                decay: 0.75
            }
        );
    }

    #[test]
    fn test_overrides_ignore_unrelated_flags() {
        let overrides = AlgorithmOverrides {
            size: Some(128),
            ..Default::default()
        };
        assert_eq!(
            overrides.apply(DitherAlgorithm::FloydSteinberg),
            DitherAlgorithm::FloydSteinberg
        );
    }
}
