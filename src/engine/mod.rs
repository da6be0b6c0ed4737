// Mon Oct 19 2026 - Alex

//! Seam between the matcher and the engine that compiles and executes patterns.

pub mod platform;
pub mod regex_engine;

pub use platform::{CpuFeatures, Platform};
pub use regex_engine::{RegexEngine, RegexLimits};

use crate::pattern::Pattern;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{0}")]
    Syntax(String),
    #[error("{0}")]
    Build(String),
    #[error("scan terminated by match handler")]
    ScanTerminated,
    #[error("{0}")]
    Scan(String),
}

/// How a database expects its corpus to be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Block,
    Vectored,
    Stream,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Vectored
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Block => write!(f, "BLOCK"),
            Mode::Vectored => write!(f, "VECTORED"),
            Mode::Stream => write!(f, "STREAM"),
        }
    }
}

/// Returned by a match handler to continue or stop the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matching {
    Continue,
    Terminate,
}

/// One match occurrence reported by a database scan.
///
/// `from` and `to` are offsets into the logical stream formed by all blocks of
/// the scan. `flags` is reserved and currently always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEvent {
    pub id: usize,
    pub from: u64,
    pub to: u64,
    pub flags: u32,
}

/// A compiled, immutable pattern database.
pub trait VectoredDatabase: Send + Sync + fmt::Debug {
    fn mode(&self) -> Mode;

    fn platform(&self) -> &Platform;

    fn pattern_count(&self) -> usize;

    fn scan_vectored(
        &self,
        blocks: &[&[u8]],
        on_match: &mut dyn FnMut(MatchEvent) -> Matching,
    ) -> Result<(), EngineError>;
}

pub trait MatchEngine: Send + Sync {
    fn name(&self) -> &str;

    /// Parses one pattern string. The returned pattern has id 0; callers
    /// assign the real identifier.
    fn parse_pattern(&self, text: &str) -> Result<Pattern, EngineError>;

    fn build_database(
        &self,
        patterns: &[Pattern],
        mode: Mode,
        platform: &Platform,
    ) -> Result<Box<dyn VectoredDatabase>, EngineError>;
}
