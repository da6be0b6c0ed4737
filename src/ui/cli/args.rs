// Mon Oct 19 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hypermatcher")]
#[command(author = "Alex")]
#[command(version)]
#[command(about = "Scan text against thousands of regular expressions in one pass", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that every pattern parses and that the set builds
    Check(CheckArgs),
    /// Scan input lines against a pattern file
    Scan(ScanArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Pattern file, one per line; blank lines and `#` followed by whitespace are skipped
    #[arg(short, long)]
    pub patterns: PathBuf,

    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Pattern file, one per line; blank lines and `#` followed by whitespace are skipped
    #[arg(short, long)]
    pub patterns: PathBuf,

    /// Input file; standard input when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scan each line as its own corpus instead of all lines as one
    #[arg(long)]
    pub per_line: bool,

    #[arg(long)]
    pub json: bool,

    /// Worker threads for --per-line; overrides the config file
    #[arg(short, long)]
    pub threads: Option<usize>,
}

impl ScanArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.patterns.exists() {
            return Err(format!("Pattern file does not exist: {:?}", self.patterns));
        }
        if let Some(input) = &self.input {
            if !input.exists() {
                return Err(format!("Input file does not exist: {:?}", input));
            }
        }
        if self.threads == Some(0) {
            return Err("Thread count must be at least 1".to_string());
        }
        Ok(())
    }
}

impl CheckArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.patterns.exists() {
            return Err(format!("Pattern file does not exist: {:?}", self.patterns));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scan() {
        let args = Args::try_parse_from([
            "hypermatcher",
            "scan",
            "--patterns",
            "sigs.txt",
            "--per-line",
            "--json",
            "-t",
            "4",
        ])
        .unwrap();

        match args.command {
            Command::Scan(scan) => {
                assert_eq!(scan.patterns, PathBuf::from("sigs.txt"));
                assert!(scan.per_line);
                assert!(scan.json);
                assert_eq!(scan.threads, Some(4));
                assert!(scan.input.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_parse_check_with_global_flags() {
        let args = Args::try_parse_from(["hypermatcher", "check", "-p", "sigs.txt", "--log-level", "debug", "--no-color"])
            .unwrap();
        assert!(matches!(args.command, Command::Check(_)));
        assert_eq!(args.log_level, "debug");
        assert!(args.no_color);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let args = ScanArgs {
            patterns: PathBuf::from("Cargo.toml"),
            input: None,
            config: None,
            per_line: true,
            json: false,
            threads: Some(0),
        };
        assert!(args.validate().is_err());
    }
}
