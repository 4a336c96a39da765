//! Process configuration.
//!
//! Settings are layered, highest precedence first:
//!
//! 1. command-line flags
//! 2. environment variables (`LOG_PATH`, `LOGREV_HOST`, `PORT`, `CORS_ORIGIN`,
//!    `LOGREV_CHUNK_SIZE`); the CLI reads these through clap's `env` support,
//!    so they arrive here as part of [`ConfigOverrides`]
//! 3. a TOML file (only with the `config` feature)
//! 4. built-in defaults
//!
//! None of this affects scan correctness; it only decides where files are
//! looked up and where the server listens.

use crate::file_handler::DEFAULT_CHUNK_SIZE;
use crate::scan::ReverseLineScanner;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_LOG_DIR: &str = "/var/log";
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3001";

/// Errors raised while assembling the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Config file {path} given, but logrev was built without the `config` feature")]
    FileSupportDisabled { path: PathBuf },
}

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory that file identifiers are resolved against
    pub log_dir: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    /// Value sent in `Access-Control-Allow-Origin`
    pub cors_origin: String,
    /// Chunk ceiling for backward reads
    pub chunk_size: NonZeroUsize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub log_dir: Option<PathBuf>,
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub cors_origin: Option<String>,
    pub chunk_size: Option<NonZeroUsize>,
    /// Explicit config file; a missing explicit file is an error
    pub config_file: Option<PathBuf>,
}

/// Shape of the optional TOML file; every key may be omitted
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub log_dir: Option<PathBuf>,
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub cors_origin: Option<String>,
    pub chunk_size: Option<NonZeroUsize>,
}

impl Config {
    /// Resolve the configuration from overrides, the config file and defaults
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let file = load_file_config(overrides.config_file.as_deref())?;
        Ok(Self::merge(overrides, file))
    }

    /// Layer overrides over file values over defaults
    pub fn merge(overrides: ConfigOverrides, file: FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            log_dir: overrides
                .log_dir
                .or(file.log_dir)
                .unwrap_or(defaults.log_dir),
            host: overrides.host.or(file.host).unwrap_or(defaults.host),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
            cors_origin: overrides
                .cors_origin
                .or(file.cors_origin)
                .unwrap_or(defaults.cors_origin),
            chunk_size: overrides
                .chunk_size
                .or(file.chunk_size)
                .unwrap_or(defaults.chunk_size),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Build the scanner these settings describe
    pub fn scanner(&self) -> ReverseLineScanner {
        ReverseLineScanner::new(&self.log_dir).with_chunk_size(self.chunk_size)
    }
}

/// Default config file location: `<config_dir>/logrev/config.toml`
#[cfg(feature = "config")]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("logrev").join("config.toml"))
}

#[cfg(feature = "config")]
fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    match explicit {
        Some(path) => read_file_config(path),
        None => match default_config_path() {
            Some(path) if path.is_file() => read_file_config(&path),
            _ => Ok(FileConfig::default()),
        },
    }
}

#[cfg(not(feature = "config"))]
fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    match explicit {
        Some(path) => Err(ConfigError::FileSupportDisabled {
            path: path.to_path_buf(),
        }),
        None => Ok(FileConfig::default()),
    }
}

#[cfg(feature = "config")]
fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
