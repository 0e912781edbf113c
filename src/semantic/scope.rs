//! Nested scopes for name resolution
//!
//! Scopes form a stack that follows lexical nesting: the global scope at the
//! bottom, then a subroutine scope, then one scope per nested block. Each
//! scope refers to its parent by id, so lookups walk outward from the
//! innermost scope.

use std::collections::HashMap;

use tracing::trace;

use crate::error::SourceLocation;
use crate::types::Type;

/// Index of a scope on the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub usize);

impl ScopeId {
    pub const GLOBAL: ScopeId = ScopeId(0);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Subroutine { name: String, return_type: Type },
    /// DO ... END, an IF branch or a WHILE body
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Constant,
    /// Variables and parameters
    Variable,
    Subroutine { params: Vec<Type> },
}

impl SymbolKind {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Variable => "variable",
            Self::Subroutine { .. } => "subroutine",
        }
    }
}

/// A declared name
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Declared type; the return type for subroutines
    pub symbol_type: Type,
    pub location: SourceLocation,
    pub scope: ScopeId,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, symbol_type: Type, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            kind,
            symbol_type,
            location,
            scope: ScopeId::GLOBAL,
        }
    }
}

#[derive(Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    symbols: HashMap<String, Symbol>,
}

/// Error when declaring a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclareError {
    /// The name is already bound in the innermost scope
    AlreadyDeclared { name: String, existing: SourceLocation },
}

/// LIFO stack of scopes
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    /// Create a stack holding only the global scope
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                id: ScopeId::GLOBAL,
                kind: ScopeKind::Global,
                parent: None,
                symbols: HashMap::new(),
            }],
        }
    }

    /// Enter a scope nested in the current one
    pub fn push(&mut self, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        trace!(?kind, depth = self.scopes.len(), "enter scope");
        self.scopes.push(Scope {
            id,
            kind,
            parent: Some(self.current_id()),
            symbols: HashMap::new(),
        });
        id
    }

    /// Leave the innermost scope. The global scope is never popped.
    pub fn pop(&mut self) -> Option<Scope> {
        if self.scopes.len() == 1 {
            return None;
        }
        let scope = self.scopes.pop();
        trace!(depth = self.scopes.len(), "exit scope");
        scope
    }

    pub fn current_id(&self) -> ScopeId {
        ScopeId(self.scopes.len() - 1)
    }

    /// Number of live scopes, including the global one
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Bind a symbol in the innermost scope
    ///
    /// On a clash the existing binding is kept.
    pub fn declare(&mut self, mut symbol: Symbol) -> Result<(), DeclareError> {
        let id = self.current_id();
        let scope = &mut self.scopes[id.0];

        if let Some(existing) = scope.symbols.get(&symbol.name) {
            return Err(DeclareError::AlreadyDeclared {
                name: symbol.name,
                existing: existing.location,
            });
        }

        symbol.scope = id;
        scope.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Name and return type of the innermost enclosing subroutine
    pub fn enclosing_subroutine(&self) -> Option<(&str, Type)> {
        let mut id = Some(self.current_id());

        while let Some(ScopeId(index)) = id {
            let scope = &self.scopes[index];
            if let ScopeKind::Subroutine { name, return_type } = &scope.kind {
                return Some((name.as_str(), *return_type));
            }
            id = scope.parent;
        }

        None
    }

    /// Resolve a name from the innermost scope outward
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        let mut id = Some(self.current_id());

        while let Some(ScopeId(index)) = id {
            let scope = &self.scopes[index];
            if let Some(symbol) = scope.symbols.get(name) {
                return Some(symbol);
            }
            id = scope.parent;
        }

        None
    }
}
