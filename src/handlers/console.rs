//! Console handler implementation

use crate::backend::{BackendLevel, Handler, LogRecord};
use crate::error::Result;
use colored::Colorize;

/// Output encoding for the console handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleFormat {
    #[default]
    Text,
    Json,
}

pub struct ConsoleHandler {
    use_colors: bool,
    format: ConsoleFormat,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            format: ConsoleFormat::default(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            format: ConsoleFormat::default(),
        }
    }

    /// Set the output format for this handler
    ///
    /// # Example
    ///
    /// ```
    /// use logbridge::handlers::{ConsoleFormat, ConsoleHandler};
    ///
    /// let handler = ConsoleHandler::new().with_format(ConsoleFormat::Json);
    /// ```
    #[must_use]
    pub fn with_format(mut self, format: ConsoleFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn publish(&self, record: &LogRecord) -> Result<()> {
        let output = match self.format {
            ConsoleFormat::Text => self.format_text(record),
            ConsoleFormat::Json => serde_json::to_string(record)?,
        };

        // Route ERROR and above to stderr, others to stdout
        if record.level >= BackendLevel::ERROR {
            eprintln!("{}", output);
        } else {
            println!("{}", output);
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        use std::io::Write;
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

impl ConsoleHandler {
    /// Format as text with optional colors
    fn format_text(&self, record: &LogRecord) -> String {
        let level_str = if self.use_colors {
            format!("{:6}", record.level.name())
                .color(record.level.color_code())
                .to_string()
        } else {
            format!("{:6}", record.level.name())
        };

        let mut output = format!(
            "[{}] [{}] {} - {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            level_str,
            record.logger_name,
            record.message
        );

        if !record.mdc.is_empty() {
            let mut fields: Vec<_> = record
                .mdc
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            fields.sort();
            output.push(' ');
            output.push_str(&fields.join(" "));
        }
        if !record.ndc.is_empty() {
            output.push_str(" [");
            output.push_str(&record.ndc);
            output.push(']');
        }
        if let Some(cause) = record.cause_text() {
            output.push_str(": ");
            output.push_str(&cause);
        }

        output
    }
}
