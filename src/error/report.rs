//! Diagnostic rendering for the command line
//!
//! This module formats diagnostics with color, the offending source line and
//! a caret under the reported column.

use colored::Colorize;

use super::{Diagnostic, SourceLocation};

/// Renders diagnostics of one compilation unit
pub struct Report<'a> {
    filename: Option<&'a str>,
    source: Option<&'a str>,
}

impl<'a> Report<'a> {
    /// Create a report without source context
    pub fn new(filename: Option<&'a str>) -> Self {
        Self {
            filename,
            source: None,
        }
    }

    /// Create a report that quotes the offending source lines
    pub fn with_source(filename: Option<&'a str>, source: &'a str) -> Self {
        Self {
            filename,
            source: Some(source),
        }
    }

    /// Format one diagnostic with color and context
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();

        let header = format!("{}[{}]", diagnostic.severity, diagnostic.code.code());
        output.push_str(&format!(
            "{} {}: {}\n",
            header.red().bold(),
            diagnostic.code.name().bold(),
            diagnostic.message
        ));

        output.push_str(&format!(
            "  {} {}\n",
            "-->".blue().bold(),
            self.position(&diagnostic.location)
        ));

        if let Some(source) = self.source {
            output.push_str(&Self::source_context(source, &diagnostic.location));
        }

        if let Some(related) = &diagnostic.related {
            output.push_str(&format!(
                "  {} first declared at {}\n",
                "note:".cyan().bold(),
                self.position(related)
            ));
        }

        output
    }

    /// Format every diagnostic followed by a one-line summary
    pub fn render_all(&self, diagnostics: &[Diagnostic]) -> String {
        let mut output = String::new();
        for diagnostic in diagnostics {
            output.push_str(&self.render(diagnostic));
            output.push('\n');
        }
        output.push_str(&Self::summary(diagnostics.len()));
        output.push('\n');
        output
    }

    pub fn summary(count: usize) -> String {
        let noun = if count == 1 { "error" } else { "errors" };
        format!("{}: compilation failed with {} {}", "error".red().bold(), count, noun)
    }

    fn position(&self, location: &SourceLocation) -> String {
        match self.filename {
            Some(filename) => format!("{}:{}", filename, location),
            None => location.to_string(),
        }
    }

    /// Format source code context around the error location
    fn source_context(source: &str, location: &SourceLocation) -> String {
        let mut output = String::new();
        let lines: Vec<&str> = source.lines().collect();

        if location.line == 0 || location.line > lines.len() {
            return output;
        }

        let line_idx = location.line - 1;
        let width = (location.line + 1).to_string().len();

        if line_idx > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{:width$} |", line_idx, width = width).blue(),
                lines[line_idx - 1]
            ));
        }

        output.push_str(&format!(
            "  {} {}\n",
            format!("{:width$} |", location.line, width = width).blue().bold(),
            lines[line_idx]
        ));

        let padding = " ".repeat(location.column.saturating_sub(1));
        output.push_str(&format!(
            "  {} {}{}\n",
            format!("{:width$} |", "", width = width).blue(),
            padding,
            "^".red().bold()
        ));

        if line_idx + 1 < lines.len() {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{:width$} |", line_idx + 2, width = width).blue(),
                lines[line_idx + 1]
            ));
        }

        output
    }
}
