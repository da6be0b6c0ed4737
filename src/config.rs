// Mon Oct 19 2026 - Alex

use crate::engine::Mode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub mode: Mode,
    pub size_limit: usize,
    pub dfa_size_limit: usize,
    pub max_patterns: usize,
    pub scan_threads: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Vectored,
            size_limit: 10 * (1 << 20),
            dfa_size_limit: 2 * (1 << 20),
            max_patterns: 100_000,
            scan_threads: num_cpus::get(),
        }
    }
}

impl MatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_patterns(mut self, max_patterns: usize) -> Self {
        self.max_patterns = max_patterns;
        self
    }

    pub fn with_scan_threads(mut self, threads: usize) -> Self {
        self.scan_threads = threads;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.mode == Mode::Stream {
            return Err("stream mode is not supported".to_string());
        }
        if self.size_limit == 0 {
            return Err("size_limit must be greater than 0".to_string());
        }
        if self.dfa_size_limit == 0 {
            return Err("dfa_size_limit must be greater than 0".to_string());
        }
        if self.max_patterns == 0 {
            return Err("max_patterns must be greater than 0".to_string());
        }
        if self.scan_threads == 0 {
            return Err("scan_threads must be greater than 0".to_string());
        }
        Ok(())
    }
}
