//! Output formatting and terminal rendering
//!
//! The summary reporter writes through [`ReportSink`] so it can be driven
//! against the terminal or a capturing buffer in tests.

use colored::Colorize;

/// Destination for a rendered report.
pub trait ReportSink {
    /// Write one raw line of the table stream
    fn line(&mut self, text: &str);

    /// Emit a positive/informational notice
    fn good(&mut self, text: &str);
}

/// Output handler for terminal display
pub struct OutputHandler;

impl OutputHandler {
    /// `color = false` forces plain output; otherwise `colored` decides from
    /// the terminal and `NO_COLOR` / `CLICOLOR`.
    pub fn new(color: bool) -> Self {
        if !color {
            colored::control::set_override(false);
        }
        Self
    }

    /// Print a section header
    pub fn print_header(&self, text: &str) {
        println!();
        println!("{}", format!("▶ {}", text).bright_yellow().bold());
        println!("{}", "─".repeat(60).dimmed());
    }

    /// Print an info message
    pub fn print_info(&self, text: &str) {
        println!("{} {}", "[*]".bright_blue(), text);
    }
}

impl ReportSink for OutputHandler {
    fn line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn good(&mut self, text: &str) {
        println!("{} {}", "[+]".bright_green(), text);
    }
}

/// A single captured sink event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Line(String),
    Good(String),
}

/// Sink that records everything in memory
#[derive(Debug, Default)]
pub struct CaptureSink {
    pub events: Vec<SinkEvent>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw table lines only
    pub fn lines(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Line(s) => Some(s.as_str()),
                SinkEvent::Good(_) => None,
            })
            .collect()
    }

    /// Informational notices only
    pub fn notices(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Good(s) => Some(s.as_str()),
                SinkEvent::Line(_) => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl ReportSink for CaptureSink {
    fn line(&mut self, text: &str) {
        self.events.push(SinkEvent::Line(text.to_string()));
    }

    fn good(&mut self, text: &str) {
        self.events.push(SinkEvent::Good(text.to_string()));
    }
}
