// Mon Oct 19 2026 - Alex

use crate::config::MatcherConfig;
use crate::engine::{MatchEngine, RegexEngine};
use crate::pattern::{to_byte_blocks, MatchResult, MatcherError, MatcherStore, PatternCompiler, PatternScanner, ReloadEvent};
use std::sync::Arc;

/// Multi-pattern matcher whose pattern set can be replaced while scans run.
///
/// Share it between threads behind an `Arc`; `load` and `scan` both take `&self`.
///
/// ```
/// use hypermatcher::PatternMatcher;
///
/// let matcher = PatternMatcher::new();
/// matcher.load(&["foo", "bar"])?;
/// assert_eq!(matcher.scan(&["a foo string", "nothing"])?, vec!["foo".to_string()]);
/// # Ok::<(), hypermatcher::MatcherError>(())
/// ```
#[derive(Debug)]
pub struct PatternMatcher {
    store: MatcherStore,
    scanner: PatternScanner,
}

impl PatternMatcher {
    pub fn new() -> Self {
        Self::with_engine(Arc::new(RegexEngine::new()))
    }

    pub fn with_engine(engine: Arc<dyn MatchEngine>) -> Self {
        Self::with_compiler(PatternCompiler::new(engine))
    }

    pub fn with_compiler(compiler: PatternCompiler) -> Self {
        Self {
            store: MatcherStore::new(compiler),
            scanner: PatternScanner::new(),
        }
    }

    pub fn from_config(config: &MatcherConfig) -> Self {
        let compiler = PatternCompiler::new(Arc::new(RegexEngine::from_config(config))).with_mode(config.mode);
        Self::with_compiler(compiler)
    }

    pub fn on_reload<F>(mut self, callback: F) -> Self
    where
        F: Fn(ReloadEvent) + Send + Sync + 'static,
    {
        self.store = self.store.on_reload(callback);
        self
    }

    /// Replaces the pattern set, returning the new generation number.
    pub fn load<S: AsRef<str>>(&self, patterns: &[S]) -> Result<u64, MatcherError> {
        self.store.load(patterns)
    }

    /// Returns the distinct expressions that match anywhere in `corpus`.
    pub fn scan<S: AsRef<str>>(&self, corpus: &[S]) -> Result<Vec<String>, MatcherError> {
        self.scan_result(corpus).map(MatchResult::into_expressions)
    }

    pub fn scan_result<S: AsRef<str>>(&self, corpus: &[S]) -> Result<MatchResult, MatcherError> {
        self.scan_blocks(&to_byte_blocks(corpus))
    }

    pub fn scan_blocks(&self, blocks: &[&[u8]]) -> Result<MatchResult, MatcherError> {
        let generation = self.store.current_generation()?;
        self.scanner.scan(&generation, blocks)
    }

    pub fn generation(&self) -> u64 {
        self.store.generation()
    }

    pub fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    pub fn store(&self) -> &MatcherStore {
        &self.store
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}
