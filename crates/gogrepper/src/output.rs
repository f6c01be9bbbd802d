use colored::Colorize;
use std::fmt::Display;
use std::io::{self, Write};

pub fn print_json(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}

/// Transient notice for aborted actions
pub fn warn(msg: impl Display) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

pub fn error(msg: impl Display) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

pub fn notice(msg: impl Display) {
    eprintln!("{} {}", "info:".green().bold(), msg);
}
