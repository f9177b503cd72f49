use mono_dither::DitherAlgorithm;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::rendering::{OutputFormat, RenderRequest, Rgb8, TwoTone};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "DITHERTHAT_CONFIG";

/// Config file picked up from the working directory when nothing else is set.
pub const DEFAULT_CONFIG_FILE: &str = "ditherthat.yaml";

/// Application configuration loaded from ditherthat.yaml
///
/// Every section is optional; missing keys take their defaults.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Algorithm and parameters, tagged by `kind`
    pub algorithm: DitherAlgorithm,

    /// Replacement colors for black and white
    pub colors: ColorsConfig,

    /// PNG output settings
    pub output: OutputConfig,
}

/// Dark and light colors as hex strings
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ColorsConfig {
    pub dark: Rgb8,
    pub light: Rgb8,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            dark: Rgb8::BLACK,
            light: Rgb8::WHITE,
        }
    }
}

/// PNG output settings
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// `indexed` (1-bit palette) or `rgba`
    pub format: OutputFormat,

    /// Re-compress with oxipng
    pub optimize: bool,
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` on the command line
    Flag(PathBuf),
    /// The `DITHERTHAT_CONFIG` environment variable
    Env(PathBuf),
    /// `ditherthat.yaml` in the working directory
    WorkingDir(PathBuf),
    /// Nothing found
    Defaults,
}

impl ConfigSource {
    /// Pick the config file by precedence: flag, environment, working directory.
    ///
    /// The working-directory file is only used if it exists; explicit paths
    /// are returned as given so a missing file can be reported.
    pub fn resolve(flag: Option<PathBuf>, env: Option<PathBuf>, local: &Path) -> Self {
        if let Some(path) = flag {
            Self::Flag(path)
        } else if let Some(path) = env {
            Self::Env(path)
        } else if local.is_file() {
            Self::WorkingDir(local.to_path_buf())
        } else {
            Self::Defaults
        }
    }

    /// Resolve against the real environment and working directory.
    pub fn discover(flag: Option<PathBuf>) -> Self {
        let env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::resolve(flag, env, Path::new(DEFAULT_CONFIG_FILE))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Flag(path) | Self::Env(path) | Self::WorkingDir(path) => Some(path),
            Self::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(path) => write!(f, "{} (--config)", path.display()),
            Self::Env(path) => write!(f, "{} ({CONFIG_ENV})", path.display()),
            Self::WorkingDir(path) => write!(f, "{} (working directory)", path.display()),
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

impl AppConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load configuration from `source`, falling back to defaults on any failure.
    pub fn load(source: &ConfigSource) -> Self {
        let Some(path) = source.path() else {
            tracing::debug!("No config file, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        algorithm = %config.algorithm,
                        format = %config.output.format,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// The render request described by this configuration.
    pub fn render_request(&self) -> RenderRequest {
        RenderRequest {
            algorithm: self.algorithm,
            tone: TwoTone::new(self.colors.dark, self.colors.light),
            format: self.output.format,
            optimize: self.output.optimize,
        }
    }
}
