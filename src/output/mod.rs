//! Output formatting and writing functionality

mod formatters;
pub mod log;
mod progress;
mod writers;

pub use self::log::{ConsoleLog, Log, LogLevel, MemoryLog};
pub use self::progress::ProgressReporter;
pub use self::writers::{FileWriter, OutputWriter, StdoutWriter};

use crate::core::pipeline::{ReportContext, ReportRenderer};
use crate::error::Result;
use crate::models::config::OutputFormat;
use std::path::PathBuf;

/// Base name of the summary file written into the report directory
pub const SUMMARY_FILE_STEM: &str = "index";

/// Trait for different output formatters
pub trait Formatter {
    /// Format a report context into a string
    fn format(&self, context: &ReportContext) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, context: &ReportContext) -> Result<String> {
        Ok(formatters::format_report_text(context, self.use_colors))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, context: &ReportContext) -> Result<String> {
        formatters::format_report_json(context)
    }
}

/// CSV formatter for spreadsheet analysis
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, context: &ReportContext) -> Result<String> {
        formatters::format_report_csv(context)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(format: OutputFormat, use_colors: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Renderer writing `index.<ext>` into the report directory and a summary to
/// the console
pub struct SummaryRenderer {
    format: OutputFormat,
    use_colors: bool,
    verbose: bool,
    quiet: bool,
}

impl SummaryRenderer {
    pub fn new(format: OutputFormat, use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            format,
            use_colors,
            verbose,
            quiet,
        }
    }

    /// Path of the summary file for `context`
    pub fn summary_file(&self, context: &ReportContext) -> PathBuf {
        context
            .output_directory
            .join(format!("{}.{}", SUMMARY_FILE_STEM, self.format.extension()))
    }

    /// Text shown on the console after the report was written
    pub fn console_summary(&self, context: &ReportContext) -> String {
        if self.quiet {
            return formatters::format_summary_line(&context.bundle.name, &context.bundle.summary());
        }
        if self.verbose {
            formatters::format_report_text(context, self.use_colors)
        } else {
            formatters::format_summary_text(context, self.use_colors)
        }
    }
}

impl ReportRenderer for SummaryRenderer {
    fn render(&self, context: &ReportContext) -> Result<()> {
        // Report files never carry color codes
        let content = create_formatter(self.format, false).format(context)?;
        FileWriter::new(self.summary_file(context)).write(&content)?;

        StdoutWriter.write(&self.console_summary(context))
    }
}
