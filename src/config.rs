//! Lane configuration.
//!
//! Three layers, later wins: built-in defaults, an optional TOML file,
//! CLI flags.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use relay_worker::{WorkerConfig, DEFAULT_MAX_FRAME_BYTES};

/// Default relay endpoint the worker connects to.
pub const DEFAULT_ENDPOINT: &str = "localhost:9999";

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Effective lane configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaneConfig {
    /// Relay endpoint (host:port).
    pub connect: String,
    /// Cap on a single encoded frame in bytes.
    pub max_frame_bytes: usize,
    /// Log filter used when RUST_LOG is unset.
    pub log_filter: String,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            connect: DEFAULT_ENDPOINT.to_string(),
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
            log_filter: "info".to_string(),
        }
    }
}

impl LaneConfig {
    /// Load configuration from a TOML file. Missing keys keep their
    /// defaults; unknown keys are rejected.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load from a file when one is given, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// The worker-crate view of this configuration.
    pub fn worker_config(&self) -> WorkerConfig {
        WorkerConfig {
            max_frame_bytes: self.max_frame_bytes,
            ..WorkerConfig::default()
        }
    }
}
