// Mon Oct 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatcherError {
    #[error("no patterns specified")]
    NoPatterns,
    #[error("error parsing pattern {index} ({text}): {message}")]
    PatternSyntax {
        index: usize,
        text: String,
        message: String,
    },
    #[error("error updating pattern database: {0}")]
    DatabaseBuild(String),
    #[error("database not loaded")]
    NotLoaded,
    #[error("scan failed: {0}")]
    Scan(String),
}
