pub mod config;

pub use config::{
    AppConfig, ColorsConfig, ConfigSource, OutputConfig, CONFIG_ENV, DEFAULT_CONFIG_FILE,
};
