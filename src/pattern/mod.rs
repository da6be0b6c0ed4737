// Mon Oct 19 2026 - Alex

pub mod pattern;
pub mod error;
pub mod compiler;
pub mod corpus;
pub mod store;
pub mod scanner;
pub mod match_result;
pub mod matcher;

pub use pattern::{Pattern, PatternFlags};
pub use error::MatcherError;
pub use compiler::{CompiledDatabase, PatternCompiler};
pub use corpus::{to_byte_blocks, total_len};
pub use store::{Generation, MatcherStore, ReloadCallback, ReloadEvent};
pub use scanner::{MatchAccumulator, PatternScanner};
pub use match_result::MatchResult;
pub use matcher::PatternMatcher;
