// Mon Oct 19 2026 - Alex

use super::args::{Args, CheckArgs, Command, ScanArgs};
use crate::config::MatcherConfig;
use crate::engine::{MatchEngine, RegexEngine};
use crate::pattern::{to_byte_blocks, total_len, MatchResult, MatcherError, PatternCompiler, PatternMatcher};
use crate::ui::{print_error, print_info, print_success, print_warning};
use crate::utils::{format_bytes, format_duration, pluralize, scoped_timer, LoggingUtils};
use ahash::AHashMap;
use anyhow::Context;
use colored::Colorize;
use rayon::prelude::*;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        if args.no_color {
            colored::control::set_override(false);
        }

        LoggingUtils::init_logger(LoggingUtils::level_from_str(&args.log_level));

        match args.command {
            Command::Check(check_args) => self.handle_check(check_args),
            Command::Scan(scan_args) => self.handle_scan(scan_args),
        }
    }

    fn load_config(&self, path: Option<&Path>) -> anyhow::Result<MatcherConfig> {
        match path {
            Some(path) => MatcherConfig::from_file(path).with_context(|| format!("loading config {:?}", path)),
            None => Ok(MatcherConfig::default()),
        }
    }

    fn handle_check(&self, args: CheckArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let config = self.load_config(args.config.as_deref())?;
        let patterns = read_pattern_file(&args.patterns)?;
        let engine = Arc::new(RegexEngine::from_config(&config));

        for (index, first) in duplicate_patterns(&patterns) {
            print_warning(&format!("pattern {} duplicates pattern {}: {}", index, first, patterns[index]));
        }

        let mut failures = 0;
        for (index, text) in patterns.iter().enumerate() {
            if let Err(e) = engine.parse_pattern(text) {
                failures += 1;
                print_error(&format!("pattern {} ({}): {}", index, text.bold(), e));
            }
        }
        if failures > 0 {
            anyhow::bail!("{} of {} failed to parse", failures, pluralize(patterns.len(), "pattern", "patterns"));
        }

        let compiler = PatternCompiler::new(engine).with_mode(config.mode);
        let timer = scoped_timer("check build");
        let compiled = compiler.compile(&patterns)?;

        print_success(&format!(
            "{} compiled in {} ({} mode, {})",
            pluralize(compiled.patterns.len(), "pattern", "patterns"),
            format_duration(timer.elapsed()),
            compiled.database.mode(),
            compiled.database.platform()
        ));

        Ok(())
    }

    fn handle_scan(&self, args: ScanArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let mut config = self.load_config(args.config.as_deref())?;
        if let Some(threads) = args.threads {
            config = config.with_scan_threads(threads);
        }

        let patterns = read_pattern_file(&args.patterns)?;
        let matcher = PatternMatcher::from_config(&config);
        matcher.load(&patterns)?;
        print_info(&format!("loaded {}", pluralize(patterns.len(), "pattern", "patterns")));

        let lines = match &args.input {
            Some(path) => read_lines(BufReader::new(
                File::open(path).with_context(|| format!("opening input {:?}", path))?,
            ))?,
            None => read_lines(io::stdin().lock())?,
        };

        let timer = scoped_timer("scan command");
        let scanned = format_bytes(total_len(&to_byte_blocks(&lines)) as u64);

        if args.per_line {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.scan_threads)
                .build()?;
            let results: Vec<(usize, MatchResult)> = pool.install(|| {
                lines
                    .par_iter()
                    .enumerate()
                    .map(|(index, line)| matcher.scan_result(std::slice::from_ref(line)).map(|r| (index + 1, r)))
                    .filter(|r| r.as_ref().map_or(true, |(_, result)| !result.is_empty()))
                    .collect::<Result<Vec<_>, MatcherError>>()
            })?;

            if args.json {
                let rows: Vec<_> = results
                    .iter()
                    .map(|(line, result)| serde_json::json!({ "line": line, "matches": result.expressions() }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for (line, result) in &results {
                    println!("{}: {}", line.to_string().cyan(), result.expressions().join(", "));
                }
            }

            print_success(&format!(
                "{} of {} ({}) matched in {}",
                results.len(),
                pluralize(lines.len(), "line", "lines"),
                scanned,
                format_duration(timer.elapsed())
            ));
        } else {
            let result = matcher.scan_result(&lines)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for expression in result.expressions() {
                    println!("{}", expression);
                }
            }

            print_success(&format!(
                "{} from {} in {} of input in {}",
                pluralize(result.len(), "pattern matched", "patterns matched"),
                pluralize(result.occurrences(), "occurrence", "occurrences"),
                scanned,
                format_duration(timer.elapsed())
            ));
        }

        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads lines without their `\n` or `\r\n` terminators.
pub fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader.lines().collect()
}

/// One pattern per line. Blank lines are skipped, as are comments: a `#`
/// alone or followed by whitespace. `#\d+` is a pattern.
pub fn read_patterns<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    Ok(read_lines(reader)?
        .into_iter()
        .filter(|line| !line.trim().is_empty() && !is_comment(line))
        .collect())
}

fn is_comment(line: &str) -> bool {
    match line.strip_prefix('#') {
        Some(rest) => rest.chars().next().map_or(true, char::is_whitespace),
        None => false,
    }
}

/// `(index, first_index)` for every pattern that repeats an earlier line.
fn duplicate_patterns(patterns: &[String]) -> Vec<(usize, usize)> {
    let mut first_seen = AHashMap::new();
    let mut duplicates = Vec::new();
    for (index, text) in patterns.iter().enumerate() {
        match first_seen.entry(text.as_str()) {
            Entry::Occupied(entry) => duplicates.push((index, *entry.get())),
            Entry::Vacant(entry) => {
                entry.insert(index);
            }
        }
    }
    duplicates
}

pub fn read_pattern_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("opening pattern file {:?}", path))?;
    Ok(read_patterns(BufReader::new(file))?)
}
