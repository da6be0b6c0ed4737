// Mon Oct 19 2026 - Alex

use crate::engine::{EngineError, MatchEvent, Matching};
use crate::pattern::corpus::total_len;
use crate::pattern::{Generation, MatchResult, MatcherError};
use crate::utils::scoped_timer;
use ahash::AHashSet;
use std::collections::BTreeSet;

/// Collects pattern ids reported during a single scan.
#[derive(Debug, Default)]
pub struct MatchAccumulator {
    ids: Vec<usize>,
}

impl MatchAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match handler body: offsets and flags are not kept.
    pub fn record(&mut self, event: MatchEvent) -> Matching {
        self.ids.push(event.id);
        Matching::Continue
    }

    pub fn occurrences(&self) -> usize {
        self.ids.len()
    }

    /// Folds the recorded ids into a set and maps each one to its expression.
    pub fn resolve(self, generation: &Generation) -> MatchResult {
        let occurrences = self.ids.len();
        let sieve: BTreeSet<usize> = self.ids.into_iter().collect();

        let mut ids = Vec::with_capacity(sieve.len());
        let mut expressions = Vec::with_capacity(sieve.len());
        let mut seen = AHashSet::with_capacity(sieve.len());

        for id in sieve {
            match generation.pattern(id) {
                Some(pattern) => {
                    ids.push(id);
                    if seen.insert(pattern.expression()) {
                        expressions.push(pattern.expression().to_string());
                    }
                }
                None => log::warn!(
                    "generation {} has no pattern with id {}, dropping match",
                    generation.number(),
                    id
                ),
            }
        }

        MatchResult::new(generation.number(), ids, expressions, occurrences)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PatternScanner;

impl PatternScanner {
    pub fn new() -> Self {
        Self
    }

    /// Scans `blocks` as one vectored corpus against `generation`.
    pub fn scan(&self, generation: &Generation, blocks: &[&[u8]]) -> Result<MatchResult, MatcherError> {
        let _timer = scoped_timer("vectored scan");

        let mut accumulator = MatchAccumulator::new();
        generation
            .database()
            .scan_vectored(blocks, &mut |event| accumulator.record(event))
            .map_err(|e| match e {
                EngineError::Scan(message) => MatcherError::Scan(message),
                other => MatcherError::Scan(other.to_string()),
            })?;

        log::trace!(
            "scanned {} blocks ({} bytes) against generation {}: {} events",
            blocks.len(),
            total_len(blocks),
            generation.number(),
            accumulator.occurrences()
        );

        Ok(accumulator.resolve(generation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Mode, Platform, VectoredDatabase};
    use crate::pattern::{to_byte_blocks, CompiledDatabase, Pattern, PatternCompiler};

    #[derive(Debug)]
    struct ScriptedDatabase {
        events: Vec<usize>,
        platform: Platform,
    }

    impl VectoredDatabase for ScriptedDatabase {
        fn mode(&self) -> Mode {
            Mode::Vectored
        }

        fn platform(&self) -> &Platform {
            &self.platform
        }

        fn pattern_count(&self) -> usize {
            2
        }

        fn scan_vectored(
            &self,
            _blocks: &[&[u8]],
            on_match: &mut dyn FnMut(MatchEvent) -> Matching,
        ) -> Result<(), EngineError> {
            for (i, &id) in self.events.iter().enumerate() {
                let event = MatchEvent {
                    id,
                    from: 0,
                    to: i as u64,
                    flags: 0,
                };
                if on_match(event) == Matching::Terminate {
                    return Err(EngineError::ScanTerminated);
                }
            }
            Ok(())
        }
    }

    fn scripted(events: Vec<usize>, patterns: &[&str]) -> Generation {
        let compiled = CompiledDatabase {
            database: Box::new(ScriptedDatabase {
                events,
                platform: Platform::populate(),
            }),
            patterns: patterns
                .iter()
                .enumerate()
                .map(|(i, p)| Pattern::parse(p).unwrap().with_id(i))
                .collect(),
        };
        Generation::new(7, compiled)
    }

    fn compiled(patterns: &[&str]) -> Generation {
        Generation::new(1, PatternCompiler::default().compile(patterns).unwrap())
    }

    #[test]
    fn test_single_match() {
        let generation = compiled(&["foo", "bar"]);
        let corpus = ["a foo string", "nothing"];
        let result = PatternScanner::new().scan(&generation, &to_byte_blocks(&corpus)).unwrap();

        assert_eq!(result.expressions(), ["foo".to_string()]);
        assert_eq!(result.ids(), [0]);
        assert_eq!(result.generation(), 1);
    }

    #[test]
    fn test_repeated_matches_deduplicated() {
        let generation = compiled(&["foo", "bar"]);
        let corpus = ["foo and bar", "barbar"];
        let result = PatternScanner::new().scan(&generation, &to_byte_blocks(&corpus)).unwrap();

        assert_eq!(result.expressions(), ["foo".to_string(), "bar".to_string()]);
        assert_eq!(result.occurrences(), 4);
    }

    #[test]
    fn test_no_match_is_empty() {
        let generation = compiled(&["foo"]);
        let result = PatternScanner::new().scan(&generation, &to_byte_blocks(&["xyz"])).unwrap();
        assert!(result.is_empty());

        let result = PatternScanner::new().scan(&generation, &[]).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.occurrences(), 0);
    }

    #[test]
    fn test_result_ordered_by_id() {
        let generation = scripted(vec![1, 0, 1, 1, 0], &["first", "second"]);
        let result = PatternScanner::new().scan(&generation, &[]).unwrap();

        assert_eq!(result.ids(), [0, 1]);
        assert_eq!(result.expressions(), ["first".to_string(), "second".to_string()]);
        assert_eq!(result.generation(), 7);
        assert_eq!(result.occurrences(), 5);
    }

    #[test]
    fn test_unknown_ids_dropped() {
        let generation = scripted(vec![0, 9], &["only"]);
        let result = PatternScanner::new().scan(&generation, &[]).unwrap();
        assert_eq!(result.ids(), [0]);
        assert!(result.contains("only"));
    }

    #[test]
    fn test_shared_expression_reported_once() {
        let generation = scripted(vec![0, 1], &["foo", "/foo/i"]);
        let result = PatternScanner::new().scan(&generation, &[]).unwrap();
        assert_eq!(result.ids(), [0, 1]);
        assert_eq!(result.expressions(), ["foo".to_string()]);
    }

    #[test]
    fn test_engine_scan_error_mapped() {
        let generation = Generation::new(
            1,
            PatternCompiler::default().with_mode(Mode::Block).compile(&["foo"]).unwrap(),
        );
        let err = PatternScanner::new()
            .scan(&generation, &to_byte_blocks(&["foo", "foo"]))
            .unwrap_err();
        assert!(matches!(err, MatcherError::Scan(_)));
    }
}
