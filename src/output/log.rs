//! Diagnostic sinks
//!
//! The merge and report steps talk to a [`Log`] rather than printing directly,
//! so the CLI can colour and gate messages while tests can inspect them.

use ansi_term::Colour::{Cyan, Yellow};
use ansi_term::Style;
use std::cell::RefCell;

/// Level of a diagnostic line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Verbose,
    Info,
    Warn,
}

/// Receiver for informational diagnostics
pub trait Log {
    fn log(&self, level: LogLevel, message: &str);

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn verbose(&self, message: &str) {
        self.log(LogLevel::Verbose, message);
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }
}

/// Console logger honouring quiet and verbose modes
#[derive(Debug, Clone)]
pub struct ConsoleLog {
    quiet: bool,
    verbose: bool,
    use_colors: bool,
}

impl ConsoleLog {
    pub fn new(quiet: bool, verbose: bool, use_colors: bool) -> Self {
        Self {
            quiet,
            verbose,
            use_colors,
        }
    }
}

impl Log for ConsoleLog {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Verbose if self.verbose => {
                if self.use_colors {
                    println!("{}", Style::new().dimmed().paint(message));
                } else {
                    println!("{}", message);
                }
            }
            LogLevel::Info if !self.quiet => {
                if self.use_colors {
                    println!("{} {}", Cyan.paint("[INFO]"), message);
                } else {
                    println!("[INFO] {}", message);
                }
            }
            // Warnings are printed even in quiet mode
            LogLevel::Warn => {
                if self.use_colors {
                    eprintln!("{} {}", Yellow.bold().paint("[WARNING]"), message);
                } else {
                    eprintln!("[WARNING] {}", message);
                }
            }
            _ => {}
        }
    }
}

/// Logger that keeps every line in memory
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: RefCell<Vec<(LogLevel, String)>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.borrow().clone()
    }

    /// Whether any line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|(_, line)| line.contains(needle))
    }
}

impl Log for MemoryLog {
    fn log(&self, level: LogLevel, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}
