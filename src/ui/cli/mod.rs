// Mon Oct 19 2026 - Alex

pub mod args;
pub mod handler;

pub use args::{Args, CheckArgs, Command, ScanArgs};
pub use handler::{read_lines, read_pattern_file, CommandHandler};

use clap::Parser;

pub fn run() -> anyhow::Result<()> {
    CommandHandler::new().execute(Args::parse())
}
