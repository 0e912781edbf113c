//! Type definitions
//!
//! This module defines the type system for MiniLang.

use std::fmt;

/// A MiniLang type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Real,
    Bool,
    String,
    /// Only valid as a subroutine return type
    Void,
}

impl Type {
    /// Keyword spelling used in source and in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Real => "REAL",
            Self::Bool => "BOOL",
            Self::String => "STRING",
            Self::Void => "VOID",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Real)
    }

    /// Whether a value of type `actual` may be stored where `self` is expected
    ///
    /// Types must match exactly, except that REAL accepts INT.
    pub fn accepts(&self, actual: Type) -> bool {
        match (self, actual) {
            (Self::Void, _) | (_, Self::Void) => false,
            (Self::Real, Self::Int) => true,
            (expected, actual) => *expected == actual,
        }
    }

    /// Result type of arithmetic over two numeric operands
    pub fn wider(self, other: Type) -> Option<Type> {
        match (self, other) {
            (Self::Int, Self::Int) => Some(Self::Int),
            (a, b) if a.is_numeric() && b.is_numeric() => Some(Self::Real),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
