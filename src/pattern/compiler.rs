// Mon Oct 19 2026 - Alex

use crate::engine::{EngineError, MatchEngine, Mode, Platform, RegexEngine, VectoredDatabase};
use crate::pattern::{MatcherError, Pattern};
use crate::utils::scoped_timer;
use std::fmt;
use std::sync::Arc;

/// A freshly built database and the patterns it was built from, in id order.
pub struct CompiledDatabase {
    pub database: Box<dyn VectoredDatabase>,
    pub patterns: Vec<Pattern>,
}

impl fmt::Debug for CompiledDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledDatabase")
            .field("mode", &self.database.mode())
            .field("patterns", &self.patterns.len())
            .finish()
    }
}

pub struct PatternCompiler {
    engine: Arc<dyn MatchEngine>,
    mode: Mode,
    platform: Platform,
}

impl PatternCompiler {
    pub fn new(engine: Arc<dyn MatchEngine>) -> Self {
        Self {
            engine,
            mode: Mode::Vectored,
            platform: Platform::populate(),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn engine(&self) -> &Arc<dyn MatchEngine> {
        &self.engine
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Parses every pattern and builds one database from them.
    ///
    /// Pattern ids are positions in `patterns`. The first pattern that fails to
    /// parse aborts the whole compilation.
    pub fn compile<S: AsRef<str>>(&self, patterns: &[S]) -> Result<CompiledDatabase, MatcherError> {
        if patterns.is_empty() {
            return Err(MatcherError::NoPatterns);
        }

        let _timer = scoped_timer("pattern compilation");

        let mut parsed = Vec::with_capacity(patterns.len());
        for (index, text) in patterns.iter().enumerate() {
            let text = text.as_ref();
            let pattern = self.engine.parse_pattern(text).map_err(|e| MatcherError::PatternSyntax {
                index,
                text: text.to_string(),
                message: e.to_string(),
            })?;
            parsed.push(pattern.with_id(index));
        }

        let database = self
            .engine
            .build_database(&parsed, self.mode, &self.platform)
            .map_err(|e| match e {
                EngineError::Build(message) => MatcherError::DatabaseBuild(message),
                other => MatcherError::DatabaseBuild(other.to_string()),
            })?;

        log::debug!(
            "compiled {} patterns with the {} engine ({} mode)",
            parsed.len(),
            self.engine.name(),
            self.mode
        );

        Ok(CompiledDatabase {
            database,
            patterns: parsed,
        })
    }
}

impl Default for PatternCompiler {
    fn default() -> Self {
        Self::new(Arc::new(RegexEngine::new()))
    }
}
