// Mon Oct 19 2026 - Alex

pub mod cli;

pub use cli::{Args, Command, CommandHandler};

use colored::Colorize;

pub fn print_info(message: &str) {
    eprintln!("{} {}", "[*]".blue(), message);
}

pub fn print_success(message: &str) {
    eprintln!("{} {}", "[+]".green(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "[WARN]".yellow(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "[!]".red(), message);
}
