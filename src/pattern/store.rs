// Mon Oct 19 2026 - Alex

//! Holds the installed database generation and swaps it on reload.
//!
//! A [`Generation`] pairs a database with the pattern list it was built from
//! and is never modified after construction. Readers clone the `Arc` under a
//! short read lock and scan without holding any lock, so a reload only waits
//! for those clones, never for a scan in progress.

use crate::engine::VectoredDatabase;
use crate::pattern::{CompiledDatabase, MatcherError, Pattern, PatternCompiler};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub struct Generation {
    number: u64,
    database: Box<dyn VectoredDatabase>,
    patterns: Vec<Pattern>,
}

impl Generation {
    pub fn new(number: u64, compiled: CompiledDatabase) -> Self {
        Self {
            number,
            database: compiled.database,
            patterns: compiled.patterns,
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn database(&self) -> &dyn VectoredDatabase {
        self.database.as_ref()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn pattern(&self, id: usize) -> Option<&Pattern> {
        self.patterns.get(id)
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

impl fmt::Debug for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generation")
            .field("number", &self.number)
            .field("mode", &self.database.mode())
            .field("patterns", &self.patterns.len())
            .finish()
    }
}

/// Outcome of one `load` attempt, passed to the reload callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadEvent {
    pub success: bool,
    pub error: Option<String>,
    /// Generation installed after this attempt; unchanged on failure.
    pub generation: u64,
    pub pattern_count: usize,
}

pub type ReloadCallback = Arc<dyn Fn(ReloadEvent) + Send + Sync>;

pub struct MatcherStore {
    compiler: PatternCompiler,
    current: RwLock<Option<Arc<Generation>>>,
    generation: AtomicU64,
    reload_callback: Option<ReloadCallback>,
}

impl MatcherStore {
    pub fn new(compiler: PatternCompiler) -> Self {
        Self {
            compiler,
            current: RwLock::new(None),
            generation: AtomicU64::new(0),
            reload_callback: None,
        }
    }

    pub fn on_reload<F>(mut self, callback: F) -> Self
    where
        F: Fn(ReloadEvent) + Send + Sync + 'static,
    {
        self.reload_callback = Some(Arc::new(callback));
        self
    }

    pub fn compiler(&self) -> &PatternCompiler {
        &self.compiler
    }

    /// Compiles `patterns` and installs them as the current generation.
    ///
    /// On error the previous generation, if any, stays installed.
    pub fn load<S: AsRef<str>>(&self, patterns: &[S]) -> Result<u64, MatcherError> {
        let compiled = match self.compiler.compile(patterns) {
            Ok(compiled) => compiled,
            Err(e) => {
                log::warn!("pattern load failed, keeping generation {}: {}", self.generation(), e);
                self.notify(ReloadEvent {
                    success: false,
                    error: Some(e.to_string()),
                    generation: self.generation(),
                    pattern_count: patterns.len(),
                });
                return Err(e);
            }
        };

        let pattern_count = compiled.patterns.len();
        let (number, previous) = {
            let mut current = self.current.write();
            let number = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
            let previous = current.replace(Arc::new(Generation::new(number, compiled)));
            (number, previous)
        };
        // The superseded generation is freed here, or by the last scan holding it.
        drop(previous);

        log::info!("installed generation {} with {} patterns", number, pattern_count);
        self.notify(ReloadEvent {
            success: true,
            error: None,
            generation: number,
            pattern_count,
        });

        Ok(number)
    }

    pub fn current_generation(&self) -> Result<Arc<Generation>, MatcherError> {
        self.current.read().clone().ok_or(MatcherError::NotLoaded)
    }

    /// Number of the installed generation, 0 before the first successful load.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    fn notify(&self, event: ReloadEvent) {
        if let Some(callback) = &self.reload_callback {
            callback(event);
        }
    }
}

impl Default for MatcherStore {
    fn default() -> Self {
        Self::new(PatternCompiler::default())
    }
}

impl fmt::Debug for MatcherStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatcherStore")
            .field("generation", &self.generation())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
