//! TOML configuration loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::framing::DEFAULT_MAX_HEADER_BYTES;

/// Environment variable naming a config file when no path is given.
pub const CONFIG_ENV_VAR: &str = "TOOLWIRE_CONFIG";

/// Default timeout for `execute_command`, in seconds.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 60;

/// Errors while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`ServerConfig`].
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range.
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Worker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,
    /// Write logs to this file instead of stderr.
    pub log_file: Option<PathBuf>,
    /// Inbound header byte cap.
    pub max_header_bytes: usize,
    /// Settings for the command worker.
    pub command: CommandConfig,
    /// Settings for the filesystem worker.
    pub filesystem: FilesystemConfig,
}

/// Settings for the command worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Timeout applied when a call does not pass `timeout_secs`.
    pub default_timeout_secs: u64,
}

/// Settings for the filesystem worker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesystemConfig {
    /// Base directory for relative paths; the working directory when unset.
    pub root: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            command: CommandConfig::default(),
            filesystem: FilesystemConfig::default(),
        }
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_header_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_header_bytes must be greater than zero".to_string(),
            ));
        }
        if self.command.default_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "command.default_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Pick the config file: the explicit path, else [`CONFIG_ENV_VAR`].
pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }
    std::env::var_os(CONFIG_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Load configuration from `path`, or defaults when there is none.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    let Some(path) = path else {
        tracing::debug!("No config file; using defaults");
        return Ok(ServerConfig::default());
    };

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text).map_err(|e| match e {
        ConfigError::Parse { source, .. } => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Parse and validate configuration text.
pub fn parse_config(text: &str) -> Result<ServerConfig, ConfigError> {
    let config: ServerConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: PathBuf::new(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}
