// Mon Oct 19 2026 - Alex

//! Concurrent multi-pattern matching.
//!
//! Patterns are compiled into one database; corpora made of several text
//! elements are scanned against it in a single vectored pass. The database can
//! be replaced while scans are running.

pub mod config;
pub mod engine;
pub mod pattern;
pub mod ui;
pub mod utils;

pub use config::{ConfigError, MatcherConfig};
pub use engine::{EngineError, MatchEngine, Mode, Platform, RegexEngine, VectoredDatabase};
pub use pattern::{MatchResult, MatcherError, MatcherStore, Pattern, PatternCompiler, PatternMatcher};
