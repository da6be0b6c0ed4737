// Mon Oct 19 2026 - Alex

//! Default engine built on the lazy DFA from `regex-automata`.
//!
//! All patterns share one forward DFA that is stepped byte by byte across
//! the blocks of a scan, so the blocks behave as one logical stream: a match
//! may cross a block boundary and anchors only see the ends of the stream.
//! Match starts are found with a per-pattern reverse DFA, and only for
//! patterns flagged `L`.

use super::{EngineError, MatchEngine, MatchEvent, Matching, Mode, Platform, VectoredDatabase};
use crate::config::MatcherConfig;
use crate::pattern::{Pattern, PatternFlags};
use regex_automata::hybrid::dfa::{Cache, DFA};
use regex_automata::hybrid::LazyStateID;
use regex_automata::nfa::thompson;
use regex_automata::util::{start, syntax};
use regex_automata::{Anchored, MatchKind, PatternID};
use regex_syntax::ParserBuilder;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegexLimits {
    /// Heap limit for the compiled NFA.
    pub size_limit: usize,
    /// Cache capacity of each lazy DFA.
    pub dfa_size_limit: usize,
    pub max_patterns: usize,
}

impl Default for RegexLimits {
    fn default() -> Self {
        Self {
            size_limit: 10 * (1 << 20),
            dfa_size_limit: 2 * (1 << 20),
            max_patterns: 100_000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegexEngine {
    limits: RegexLimits,
}

impl RegexEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: RegexLimits) -> Self {
        Self { limits }
    }

    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::with_limits(RegexLimits {
            size_limit: config.size_limit,
            dfa_size_limit: config.dfa_size_limit,
            max_patterns: config.max_patterns,
        })
    }

    pub fn limits(&self) -> RegexLimits {
        self.limits
    }

    fn build_dfa(&self, expressions: &[String], reverse: bool) -> Result<DFA, EngineError> {
        DFA::builder()
            .configure(
                DFA::config()
                    .match_kind(MatchKind::All)
                    .unicode_word_boundary(true)
                    .starts_for_each_pattern(reverse)
                    .cache_capacity(self.limits.dfa_size_limit)
                    .skip_cache_capacity_check(true),
            )
            .syntax(syntax::Config::new().utf8(false))
            .thompson(
                thompson::Config::new()
                    .utf8(false)
                    .reverse(reverse)
                    .nfa_size_limit(Some(self.limits.size_limit)),
            )
            .build_many(expressions)
            .map_err(|e| EngineError::Build(e.to_string()))
    }
}

impl MatchEngine for RegexEngine {
    fn name(&self) -> &str {
        "regex"
    }

    fn parse_pattern(&self, text: &str) -> Result<Pattern, EngineError> {
        let pattern = Pattern::parse(text)?;
        check_supported(&pattern).map_err(EngineError::Syntax)?;
        parse_hir(&pattern)?;
        Ok(pattern)
    }

    fn build_database(
        &self,
        patterns: &[Pattern],
        mode: Mode,
        platform: &Platform,
    ) -> Result<Box<dyn VectoredDatabase>, EngineError> {
        if mode == Mode::Stream {
            return Err(EngineError::Build("stream mode is not supported by the regex engine".to_string()));
        }
        if patterns.is_empty() {
            return Err(EngineError::Build("no patterns to compile".to_string()));
        }
        if patterns.len() > self.limits.max_patterns {
            return Err(EngineError::Build(format!(
                "{} patterns exceeds the limit of {}",
                patterns.len(),
                self.limits.max_patterns
            )));
        }

        for pattern in patterns {
            check_supported(pattern).map_err(|e| EngineError::Build(format!("pattern {}: {}", pattern.id(), e)))?;
            let hir = parse_hir(pattern).map_err(|e| {
                EngineError::Build(format!("pattern {}: {}", pattern.id(), e))
            })?;
            if hir.properties().minimum_len() == Some(0) && !pattern.has_flag(PatternFlags::ALLOWEMPTY) {
                return Err(EngineError::Build(format!(
                    "pattern {} matches the empty buffer; use the V flag to allow it",
                    pattern.id()
                )));
            }
        }

        let expressions: Vec<String> = patterns.iter().map(engine_expression).collect();
        let flags: Vec<PatternFlags> = patterns.iter().map(Pattern::flags).collect();

        let forward = self.build_dfa(&expressions, false)?;
        let reverse = if flags.iter().any(|f| f.contains(PatternFlags::SOM_LEFTMOST)) {
            Some(self.build_dfa(&expressions, true)?)
        } else {
            None
        };

        log::debug!(
            "regex engine built {} database with {} patterns for {}",
            mode,
            patterns.len(),
            platform
        );

        Ok(Box::new(RegexDatabase {
            forward,
            reverse,
            flags,
            mode,
            platform: platform.clone(),
        }))
    }
}

#[derive(Debug)]
pub struct RegexDatabase {
    forward: DFA,
    reverse: Option<DFA>,
    flags: Vec<PatternFlags>,
    mode: Mode,
    platform: Platform,
}

impl VectoredDatabase for RegexDatabase {
    fn mode(&self) -> Mode {
        self.mode
    }

    fn platform(&self) -> &Platform {
        &self.platform
    }

    fn pattern_count(&self) -> usize {
        self.flags.len()
    }

    fn scan_vectored(
        &self,
        blocks: &[&[u8]],
        on_match: &mut dyn FnMut(MatchEvent) -> Matching,
    ) -> Result<(), EngineError> {
        if self.mode == Mode::Block && blocks.len() > 1 {
            return Err(EngineError::Scan(format!(
                "block mode database cannot scan {} blocks",
                blocks.len()
            )));
        }
        if blocks.is_empty() {
            return Ok(());
        }

        StreamScan {
            db: self,
            blocks,
            cache: self.forward.create_cache(),
            reverse_cache: self.reverse.as_ref().map(DFA::create_cache),
            reported: vec![false; self.pattern_count()],
            on_match,
        }
        .run()
    }
}

/// State of one scan. Caches are per scan, so databases stay shareable.
struct StreamScan<'a, 'f> {
    db: &'a RegexDatabase,
    blocks: &'a [&'a [u8]],
    cache: Cache,
    reverse_cache: Option<Cache>,
    reported: Vec<bool>,
    on_match: &'f mut dyn FnMut(MatchEvent) -> Matching,
}

impl StreamScan<'_, '_> {
    fn run(&mut self) -> Result<(), EngineError> {
        let db = self.db;
        let dfa = &db.forward;
        let blocks = self.blocks;

        let mut sid = dfa
            .start_state(&mut self.cache, &start::Config::new().anchored(Anchored::No))
            .map_err(scan_error)?;
        let mut at = 0;

        // Match states lag one byte: a match seen after byte `at` ends at `at`.
        for block in blocks {
            for &byte in block.iter() {
                sid = dfa.next_state(&mut self.cache, sid, byte).map_err(scan_error)?;
                if sid.is_tagged() {
                    if sid.is_dead() {
                        return Ok(());
                    }
                    self.visit(sid, at)?;
                }
                at += 1;
            }
        }

        sid = dfa.next_eoi_state(&mut self.cache, sid).map_err(scan_error)?;
        if sid.is_tagged() && !sid.is_dead() {
            self.visit(sid, at)?;
        }
        Ok(())
    }

    fn visit(&mut self, sid: LazyStateID, end: usize) -> Result<(), EngineError> {
        if sid.is_quit() {
            return Err(EngineError::Scan(format!(
                "gave up at offset {}: Unicode word boundary over non-ASCII input",
                end
            )));
        }
        if !sid.is_match() {
            return Ok(());
        }

        let db = self.db;
        let dfa = &db.forward;
        for index in 0..dfa.match_len(&self.cache, sid) {
            let id = dfa.match_pattern(&self.cache, sid, index).as_usize();
            let flags = db.flags[id];
            if flags.contains(PatternFlags::QUIET) {
                continue;
            }
            if flags.contains(PatternFlags::SINGLEMATCH) {
                if self.reported[id] {
                    continue;
                }
                self.reported[id] = true;
            }

            let from = if flags.contains(PatternFlags::SOM_LEFTMOST) { self.leftmost_start(id, end)? } else { 0 };
            let event = MatchEvent {
                id,
                from: from as u64,
                to: end as u64,
                flags: 0,
            };
            if (self.on_match)(event) == Matching::Terminate {
                return Err(EngineError::ScanTerminated);
            }
        }
        Ok(())
    }

    /// Walks backwards from `end` with pattern `id` anchored there.
    fn leftmost_start(&mut self, id: usize, end: usize) -> Result<usize, EngineError> {
        let db = self.db;
        let (Some(dfa), Some(cache)) = (db.reverse.as_ref(), self.reverse_cache.as_mut()) else {
            return Ok(0);
        };

        let pattern = PatternID::new(id).map_err(scan_error)?;
        let config = start::Config::new()
            .anchored(Anchored::Pattern(pattern))
            .look_behind(byte_at(self.blocks, end));
        let mut sid = dfa.start_state(cache, &config).map_err(scan_error)?;
        let mut start = end;
        let mut at = end;

        for byte in bytes_before(self.blocks, end) {
            sid = dfa.next_state(cache, sid, byte).map_err(scan_error)?;
            if sid.is_match() {
                start = at;
            } else if sid.is_dead() || sid.is_quit() {
                return Ok(start);
            }
            at -= 1;
        }

        sid = dfa.next_eoi_state(cache, sid).map_err(scan_error)?;
        if sid.is_match() {
            start = 0;
        }
        Ok(start)
    }
}

fn scan_error<E: fmt::Display>(e: E) -> EngineError {
    EngineError::Scan(e.to_string())
}

fn byte_at(blocks: &[&[u8]], mut offset: usize) -> Option<u8> {
    for block in blocks {
        if offset < block.len() {
            return Some(block[offset]);
        }
        offset -= block.len();
    }
    None
}

/// Stream bytes before `end`, nearest first.
fn bytes_before<'a>(blocks: &[&'a [u8]], end: usize) -> impl Iterator<Item = u8> + 'a {
    let mut pieces = Vec::new();
    let mut base = 0;
    for block in blocks {
        if base >= end {
            break;
        }
        pieces.push(&block[..(end - base).min(block.len())]);
        base += block.len();
    }
    pieces.into_iter().rev().flat_map(|piece| piece.iter().rev().copied())
}

fn check_supported(pattern: &Pattern) -> Result<(), String> {
    if pattern.has_flag(PatternFlags::COMBINATION) {
        return Err("logical combination patterns (flag C) are not supported".to_string());
    }
    Ok(())
}

fn uses_unicode(pattern: &Pattern) -> bool {
    pattern.has_flag(PatternFlags::UTF8)
        || pattern.has_flag(PatternFlags::UCP)
        || !pattern.expression().is_ascii()
}

fn parse_hir(pattern: &Pattern) -> Result<regex_syntax::hir::Hir, EngineError> {
    ParserBuilder::new()
        .utf8(false)
        .unicode(uses_unicode(pattern))
        .case_insensitive(pattern.has_flag(PatternFlags::CASELESS))
        .multi_line(pattern.has_flag(PatternFlags::MULTILINE))
        .dot_matches_new_line(pattern.has_flag(PatternFlags::DOTALL))
        .build()
        .parse(pattern.expression())
        .map_err(|e| EngineError::Syntax(e.to_string()))
}

/// The expression with its flags folded into an inline group, so patterns with
/// different flags can share one set.
fn engine_expression(pattern: &Pattern) -> String {
    let mut enabled = String::new();
    if pattern.has_flag(PatternFlags::CASELESS) {
        enabled.push('i');
    }
    if pattern.has_flag(PatternFlags::MULTILINE) {
        enabled.push('m');
    }
    if pattern.has_flag(PatternFlags::DOTALL) {
        enabled.push('s');
    }

    if uses_unicode(pattern) {
        enabled.push('u');
        format!("(?{}:{})", enabled, pattern.expression())
    } else {
        format!("(?{}-u:{})", enabled, pattern.expression())
    }
}
