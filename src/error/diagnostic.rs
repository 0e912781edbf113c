//! Diagnostic records produced by every compilation stage

use std::fmt;

use thiserror::Error;

use super::SourceLocation;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
        }
    }
}

/// Stable diagnostic codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Lexer
    LexicalError,

    // Parser
    SyntaxError,

    // Semantic analyzer
    UndeclaredIdentifier,
    Redeclaration,
    TypeMismatch,
    ConstantReassignment,
    ArityMismatch,
    MissingMainSubroutine,
    InvalidMainSignature,
    VoidValueUsedInExpression,
    NotASubroutine,
    NotAValue,
}

impl ErrorCode {
    /// Short code printed in reports, e.g. `E0104`
    pub fn code(&self) -> &'static str {
        match self {
            Self::LexicalError => "E0001",
            Self::SyntaxError => "E0002",
            Self::UndeclaredIdentifier => "E0101",
            Self::Redeclaration => "E0102",
            Self::TypeMismatch => "E0103",
            Self::ConstantReassignment => "E0104",
            Self::ArityMismatch => "E0105",
            Self::MissingMainSubroutine => "E0106",
            Self::InvalidMainSignature => "E0107",
            Self::VoidValueUsedInExpression => "E0108",
            Self::NotASubroutine => "E0109",
            Self::NotAValue => "E0110",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LexicalError => "LexicalError",
            Self::SyntaxError => "SyntaxError",
            Self::UndeclaredIdentifier => "UndeclaredIdentifier",
            Self::Redeclaration => "Redeclaration",
            Self::TypeMismatch => "TypeMismatch",
            Self::ConstantReassignment => "ConstantReassignment",
            Self::ArityMismatch => "ArityMismatch",
            Self::MissingMainSubroutine => "MissingMainSubroutine",
            Self::InvalidMainSignature => "InvalidMainSignature",
            Self::VoidValueUsedInExpression => "VoidValueUsedInExpression",
            Self::NotASubroutine => "NotASubroutine",
            Self::NotAValue => "NotAValue",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A reported lexical, syntactic or semantic problem
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message} at {location}")]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: ErrorCode,
    pub message: String,
    pub location: SourceLocation,
    /// First declaration of a redeclared name, rendered as a
    /// "first declared at" note
    pub related: Option<SourceLocation>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            location,
            related: None,
        }
    }

    /// Create a new lexical error
    pub fn lexical(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::error(ErrorCode::LexicalError, message, location)
    }

    /// Create a new syntax error
    pub fn syntax(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::error(ErrorCode::SyntaxError, message, location)
    }

    /// Attach the location of the declaration a redeclaration clashes with
    pub fn with_related(mut self, related: SourceLocation) -> Self {
        self.related = Some(related);
        self
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }
}
