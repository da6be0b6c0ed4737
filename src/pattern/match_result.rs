// Mon Oct 19 2026 - Alex

use serde::Serialize;

/// Distinct expressions matched by one scan, ordered by pattern id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    generation: u64,
    ids: Vec<usize>,
    expressions: Vec<String>,
    occurrences: usize,
}

impl MatchResult {
    pub fn new(generation: u64, ids: Vec<usize>, expressions: Vec<String>, occurrences: usize) -> Self {
        Self {
            generation,
            ids,
            expressions,
            occurrences,
        }
    }

    /// Generation of the database that produced this result.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    pub fn expressions(&self) -> &[String] {
        &self.expressions
    }

    pub fn into_expressions(self) -> Vec<String> {
        self.expressions
    }

    /// Raw match events seen before deduplication.
    pub fn occurrences(&self) -> usize {
        self.occurrences
    }

    pub fn contains(&self, expression: &str) -> bool {
        self.expressions.iter().any(|e| e == expression)
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}
