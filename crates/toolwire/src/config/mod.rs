//! Configuration loading and resolution.

pub mod loader;

pub use loader::{
    load_config, parse_config, resolve_config_path, CommandConfig, ConfigError, FilesystemConfig,
    ServerConfig, CONFIG_ENV_VAR,
};
