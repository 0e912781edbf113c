//! Semantic analysis module
//!
//! This module resolves names through nested scopes and type-checks the AST.

pub mod analyzer;
pub mod scope;

pub use analyzer::{analyze, SemanticAnalyzer, ENTRY_POINT};
pub use scope::{ScopeId, ScopeKind, ScopeStack, Symbol, SymbolKind};
