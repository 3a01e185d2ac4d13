//! CLI presenter for output formatting

use colored::*;

/// Severity of an operator message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warn,
    Error,
    /// Connection state change
    Status,
}

/// Presenter for CLI output formatting.
///
/// Stateless, so it can be copied into callbacks running on other threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print a message with the glyph matching `tone`
    pub fn show(&self, tone: Tone, message: &str) {
        match tone {
            Tone::Info => self.info(message),
            Tone::Success => self.success(message),
            Tone::Warn => self.warn(message),
            Tone::Error => self.error(message),
            Tone::Status => self.status(message),
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a connection status line
    pub fn status(&self, message: &str) {
        eprintln!("{} {}", "●".cyan(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}
