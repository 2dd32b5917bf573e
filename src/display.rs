//! Colored console output for tail activity.
//!
//! Every observed line, offer and delivery outcome is printed here, prefixed
//! with a timestamp and the watch target's label.

use std::io::{self, Write};

use chrono::Local;
use owo_colors::OwoColorize;

/// Get current local timestamp.
fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Maximum length for observed log lines.
const LINE_MAX_LEN: usize = 160;

/// Truncate a string to a maximum number of characters, adding ellipsis if truncated.
#[must_use]
pub fn truncate(s: &str, max_len: usize, raw_mode: bool) -> String {
    if raw_mode || s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return "...".to_string();
    }
    let head: String = s.chars().take(max_len - 3).collect();
    format!("{head}...")
}

fn tag(label: &str) -> String {
    format!("[{label}]")
}

/// Print the start of a tail.
pub fn print_tail_start(label: &str, path: &str) {
    println!(
        "{} {} watching {}",
        timestamp().dimmed(),
        tag(label).blue().bold(),
        path.cyan()
    );
    let _ = io::stdout().flush();
}

/// Print a line observed in a log.
pub fn print_line(label: &str, line: &str, raw_mode: bool) {
    println!(
        "{} {} {}",
        timestamp().dimmed(),
        tag(label).blue(),
        truncate(line, LINE_MAX_LEN, raw_mode).dimmed()
    );
    let _ = io::stdout().flush();
}

/// Print a recognised trade offer.
pub fn print_offer(label: &str, message: &str) {
    println!(
        "{} {} {} {}",
        timestamp().dimmed(),
        tag(label).blue().bold(),
        "[TRADE]".yellow().bold(),
        message
    );
    let _ = io::stdout().flush();
}

/// Print a whisper that looked like a trade but could not be parsed.
pub fn print_unparseable(label: &str, line: &str, raw_mode: bool) {
    println!(
        "{} {} {} {}",
        timestamp().dimmed(),
        tag(label).blue().bold(),
        "[UNPARSED]".magenta().bold(),
        truncate(line, LINE_MAX_LEN, raw_mode)
    );
    let _ = io::stdout().flush();
}

/// Print a successful delivery.
pub fn print_delivered(label: &str) {
    println!(
        "{} {} {}",
        timestamp().dimmed(),
        tag(label).blue().bold(),
        "[SENT]".green().bold()
    );
    let _ = io::stdout().flush();
}

/// Print a failed delivery.
pub fn print_delivery_failed(label: &str, reason: &str) {
    println!(
        "{} {} {} {}",
        timestamp().dimmed(),
        tag(label).blue().bold(),
        "[NOT SENT]".red().bold(),
        reason.red()
    );
    let _ = io::stdout().flush();
}

/// Print a tail that stopped for good.
pub fn print_tail_failed(label: &str, reason: &str) {
    println!(
        "{} {} {} {}",
        timestamp().dimmed(),
        tag(label).blue().bold(),
        "[STOPPED]".red().bold(),
        reason
    );
    let _ = io::stdout().flush();
}

/// Print a warning.
pub fn print_warning(message: &str) {
    println!(
        "{} {} {}",
        timestamp().dimmed(),
        "[WARN]".yellow().bold(),
        message
    );
    let _ = io::stdout().flush();
}

/// Print an error message.
pub fn print_error(message: &str) {
    println!(
        "{} {} {}",
        timestamp().dimmed(),
        "[ERROR]".red().bold(),
        message
    );
    let _ = io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("hello", 10, false), "hello");
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(truncate("hello", 5, false), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("hello world", 8, false), "hello...");
    }

    #[test]
    fn test_truncate_very_short_max() {
        assert_eq!(truncate("hello", 3, false), "...");
        assert_eq!(truncate("hello", 0, false), "...");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("привет мир", 9, false), "привет...");
        assert_eq!(truncate("привет", 6, false), "привет");
    }

    #[test]
    fn test_truncate_raw_mode_no_truncation() {
        let long_string = "a".repeat(200);
        assert_eq!(truncate(&long_string, 10, true), long_string);
    }

    #[test]
    fn test_tag() {
        assert_eq!(tag("PoE 2"), "[PoE 2]");
    }
}
