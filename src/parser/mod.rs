//! Parser module
//!
//! This module handles parsing tokens into an Abstract Syntax Tree (AST).

pub mod ast;
pub mod parser;
pub mod printer;

pub use ast::{
    BinaryOp, ConstDecl, Declaration, Expr, Literal, Param, Program, Stmt, SubroutineDecl, Type,
    UnaryOp, VarDecl,
};
pub use parser::{Parser, MAX_EXPR_DEPTH, MAX_NESTING};

use crate::error::MiniResult;
use crate::lexer::Lexer;

/// Lex and parse `source`, stopping at the first lexical or syntax error
pub fn parse(source: &str) -> MiniResult<Program> {
    Parser::new(Lexer::new(source))?.parse()
}
