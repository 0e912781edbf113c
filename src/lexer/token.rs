//! Token definitions for MiniLang
//!
//! This module defines all token types used in lexical analysis.

use crate::error::SourceLocation;
use std::fmt;

/// A token in MiniLang source
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    /// Create a new token
    pub fn new(token_type: TokenType, lexeme: String, location: SourceLocation) -> Self {
        Self {
            token_type,
            lexeme,
            location,
        }
    }

    /// How the token is named in syntax errors
    pub fn describe(&self) -> String {
        match self.token_type {
            TokenType::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

/// Token types in MiniLang
#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    // Literals
    Literal(Literal),

    // Identifiers and keywords
    Identifier,
    Keyword(Keyword),

    // Operators
    // Arithmetic
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /

    // Comparison
    Equal,          // ==
    NotEqual,       // !=
    Less,           // <
    LessEqual,      // <=
    Greater,        // >
    GreaterEqual,   // >=

    // Assignment
    Assign,         // =

    // Punctuation
    LeftParen,      // (
    RightParen,     // )
    Comma,          // ,
    Semicolon,      // ;

    // Special
    Eof,
}

impl TokenType {
    /// Broad token class, as shown by `--tokens`
    pub fn category(&self) -> &'static str {
        match self {
            Self::Literal(Literal::Integer(_)) => "integer-literal",
            Self::Literal(Literal::Real(_)) => "real-literal",
            Self::Literal(Literal::String(_)) => "string-literal",
            Self::Identifier => "identifier",
            Self::Keyword(_) => "keyword",
            Self::Plus
            | Self::Minus
            | Self::Star
            | Self::Slash
            | Self::Equal
            | Self::NotEqual
            | Self::Less
            | Self::LessEqual
            | Self::Greater
            | Self::GreaterEqual
            | Self::Assign => "operator",
            Self::LeftParen | Self::RightParen | Self::Comma | Self::Semicolon => "punctuation",
            Self::Eof => "end-of-input",
        }
    }
}

/// Reserved words of MiniLang
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Declarations
    Const,
    Subroutine,

    // Blocks and control flow
    Do,
    End,
    If,
    Then,
    Else,
    While,
    Return,
    Print,

    // Types
    Void,
    Int,
    Real,
    Bool,
    String,

    // Boolean literals
    True,
    False,

    // Logical operators
    And,
    Or,
    Not,
}

impl Keyword {
    /// Get keyword from an exact lexeme match
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CONST" => Some(Self::Const),
            "SUBROUTINE" => Some(Self::Subroutine),
            "DO" => Some(Self::Do),
            "END" => Some(Self::End),
            "IF" => Some(Self::If),
            "THEN" => Some(Self::Then),
            "ELSE" => Some(Self::Else),
            "WHILE" => Some(Self::While),
            "RETURN" => Some(Self::Return),
            "PRINT" => Some(Self::Print),
            "VOID" => Some(Self::Void),
            "INT" => Some(Self::Int),
            "REAL" => Some(Self::Real),
            "BOOL" => Some(Self::Bool),
            "STRING" => Some(Self::String),
            "TRUE" => Some(Self::True),
            "FALSE" => Some(Self::False),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            _ => None,
        }
    }

    /// Get string representation of keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Const => "CONST",
            Self::Subroutine => "SUBROUTINE",
            Self::Do => "DO",
            Self::End => "END",
            Self::If => "IF",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::While => "WHILE",
            Self::Return => "RETURN",
            Self::Print => "PRINT",
            Self::Void => "VOID",
            Self::Int => "INT",
            Self::Real => "REAL",
            Self::Bool => "BOOL",
            Self::String => "STRING",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Literal token values
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Real(f64),
    String(String),
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(Literal::Integer(_)) => write!(f, "integer literal"),
            Self::Literal(Literal::Real(_)) => write!(f, "real literal"),
            Self::Literal(Literal::String(_)) => write!(f, "string literal"),
            Self::Identifier => write!(f, "identifier"),
            Self::Keyword(kw) => write!(f, "'{}'", kw),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::Equal => write!(f, "'=='"),
            Self::NotEqual => write!(f, "'!='"),
            Self::Less => write!(f, "'<'"),
            Self::LessEqual => write!(f, "'<='"),
            Self::Greater => write!(f, "'>'"),
            Self::GreaterEqual => write!(f, "'>='"),
            Self::Assign => write!(f, "'='"),
            Self::LeftParen => write!(f, "'('"),
            Self::RightParen => write!(f, "')'"),
            Self::Comma => write!(f, "','"),
            Self::Semicolon => write!(f, "';'"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}
