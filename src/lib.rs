//! # MiniLang
//!
//! Front end of a compiler for MiniLang, a small imperative teaching language
//! with constants, typed variables and subroutines.
//!
//! ## Architecture
//!
//! Source text flows forward through three stages:
//! - `lexer`: lazy tokenization of source text
//! - `parser`: recursive-descent parsing into an Abstract Syntax Tree (AST)
//! - `semantic`: scope resolution and type checking
//!
//! Supporting modules:
//! - `types`: the type enumeration and operator signatures
//! - `error`: diagnostics and their rendering
//!
//! Lexical and syntax errors stop compilation at the first problem. Semantic
//! errors are collected, so [`compile`] reports all of them at once.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod types;

use tracing::debug;

// Re-export commonly used types
pub use error::{Diagnostic, ErrorCode, MiniResult, Report, Severity, SourceLocation};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{parse, Parser, Program};
pub use semantic::analyze;
pub use types::Type;

/// Version of the MiniLang front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compile a MiniLang compilation unit
///
/// Runs lexical analysis, parsing and semantic analysis on `source`.
///
/// # Returns
///
/// The validated program when no stage reports a problem. Otherwise the
/// diagnostics: a single lexical or syntax error, or every semantic error in
/// traversal order.
pub fn compile(source: &str) -> Result<Program, Vec<Diagnostic>> {
    debug!(bytes = source.len(), "compiling");

    let program = parse(source).map_err(|diagnostic| {
        debug!(code = diagnostic.code.code(), "front end stopped");
        vec![diagnostic]
    })?;

    let diagnostics = analyze(&program);
    if diagnostics.is_empty() {
        debug!(declarations = program.declarations.len(), "program is valid");
        Ok(program)
    } else {
        Err(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_compile_valid_program() {
        let program = compile("SUBROUTINE VOID main() DO PRINT(\"hi\"); END").unwrap();
        assert_eq!(program.declarations.len(), 1);
    }

    #[test]
    fn test_lexical_error_skips_later_stages() {
        let errors = compile("SUBROUTINE VOID main() DO @ END").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::LexicalError);
        assert_eq!(errors[0].location, SourceLocation::new(1, 27));
    }

    #[test]
    fn test_syntax_error_skips_analysis() {
        // Missing `main` would be a semantic error too, but analysis never runs.
        let errors = compile("SUBROUTINE VOID start( DO END").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::SyntaxError);
    }

    #[test]
    fn test_semantic_errors_are_collected() {
        let errors = compile("INT a;\nINT a;\nSUBROUTINE VOID start() DO END").unwrap_err();
        let codes: Vec<ErrorCode> = errors.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![ErrorCode::Redeclaration, ErrorCode::MissingMainSubroutine]);
    }
}
