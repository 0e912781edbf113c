//! Error handling and diagnostics for MiniLang
//!
//! Every stage reports problems as [`Diagnostic`] values. The lexer and parser
//! stop at their first problem and return it through [`MiniResult`]; the
//! semantic analyzer collects a list instead.

use std::fmt;

pub mod diagnostic;
pub mod report;

pub use diagnostic::{Diagnostic, ErrorCode, Severity};
pub use report::Report;

/// Result type alias for the lexer and parser
pub type MiniResult<T> = Result<T, Diagnostic>;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, in characters)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Location of the first character of a compilation unit
    pub fn start() -> Self {
        Self::new(1, 1)
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_source_location_display() {
        let loc = SourceLocation::new(10, 5);
        assert_eq!(loc.to_string(), "10:5");
    }

    #[test]
    fn test_source_location_ordering() {
        assert!(SourceLocation::new(1, 9) < SourceLocation::new(2, 1));
        assert!(SourceLocation::new(3, 2) < SourceLocation::new(3, 4));
        assert_eq!(SourceLocation::default(), SourceLocation::start());
    }
}
