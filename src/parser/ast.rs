//! Abstract Syntax Tree definitions
//!
//! This module defines the AST node types for MiniLang. Every node owns its
//! children and records the location of its first token.

use std::fmt;

use crate::error::SourceLocation;
pub use crate::types::Type;

/// Root AST node representing a complete compilation unit
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

impl Program {
    /// Iterate over the top-level subroutines in source order
    pub fn subroutines(&self) -> impl Iterator<Item = &SubroutineDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Subroutine(sub) => Some(sub),
            _ => None,
        })
    }
}

/// Top-level declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Const(ConstDecl),
    Var(VarDecl),
    Subroutine(SubroutineDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Const(decl) => &decl.name,
            Declaration::Var(decl) => &decl.name,
            Declaration::Subroutine(decl) => &decl.name,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Declaration::Const(decl) => decl.location,
            Declaration::Var(decl) => decl.location,
            Declaration::Subroutine(decl) => decl.location,
        }
    }
}

/// Constant declaration: CONST INT limit = 10;
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: String,
    pub declared_type: Type,
    pub value: Literal,
    pub location: SourceLocation,
}

/// Variable declaration: INT count = 0;
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub declared_type: Type,
    pub initializer: Option<Expr>,
    pub location: SourceLocation,
}

/// Subroutine parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub param_type: Type,
    pub location: SourceLocation,
}

/// Subroutine declaration: SUBROUTINE INT add(INT a, INT b) DO ... END
#[derive(Debug, Clone, PartialEq)]
pub struct SubroutineDecl {
    pub name: String,
    pub return_type: Type,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub location: SourceLocation,
}

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Local constant declaration
    Const(ConstDecl),

    /// Local variable declaration
    Var(VarDecl),

    /// Assignment: x = expr;
    Assign {
        target: String,
        value: Expr,
        location: SourceLocation,
    },

    /// IF cond THEN ... ELSE ... END
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
        location: SourceLocation,
    },

    /// WHILE cond DO ... END
    While {
        condition: Expr,
        body: Vec<Stmt>,
        location: SourceLocation,
    },

    /// RETURN; or RETURN expr;
    Return {
        value: Option<Expr>,
        location: SourceLocation,
    },

    /// Subroutine call in statement position: f(a, b);
    Call {
        callee: String,
        arguments: Vec<Expr>,
        location: SourceLocation,
    },

    /// PRINT(expr);
    Print {
        value: Expr,
        location: SourceLocation,
    },

    /// DO ... END, introduces a new scope
    Block {
        statements: Vec<Stmt>,
        location: SourceLocation,
    },
}

impl Stmt {
    pub fn location(&self) -> SourceLocation {
        match self {
            Stmt::Const(decl) => decl.location,
            Stmt::Var(decl) => decl.location,
            Stmt::Assign { location, .. }
            | Stmt::If { location, .. }
            | Stmt::While { location, .. }
            | Stmt::Return { location, .. }
            | Stmt::Call { location, .. }
            | Stmt::Print { location, .. }
            | Stmt::Block { location, .. } => *location,
        }
    }
}

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value
    Literal {
        value: Literal,
        location: SourceLocation,
    },

    /// Constant, variable or parameter reference
    Identifier {
        name: String,
        location: SourceLocation,
    },

    /// Unary operation
    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },

    /// Binary operation
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        location: SourceLocation,
    },

    /// Subroutine call used as a value
    Call {
        callee: String,
        arguments: Vec<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::Literal { location, .. }
            | Expr::Identifier { location, .. }
            | Expr::Unary { location, .. }
            | Expr::Binary { location, .. }
            | Expr::Call { location, .. } => *location,
        }
    }

    /// Height of the expression tree; a literal or identifier has depth 1
    pub fn depth(&self) -> usize {
        match self {
            Expr::Literal { .. } | Expr::Identifier { .. } => 1,
            Expr::Unary { operand, .. } => 1 + operand.depth(),
            Expr::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
            Expr::Call { arguments, .. } => {
                1 + arguments.iter().map(Expr::depth).max().unwrap_or(0)
            }
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Not,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "NOT",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Real(f64),
    String(String),
    Boolean(bool),
}

impl Literal {
    /// A literal's type follows from its lexical form
    pub fn value_type(&self) -> Type {
        match self {
            Literal::Integer(_) => Type::Int,
            Literal::Real(_) => Type::Real,
            Literal::String(_) => Type::String,
            Literal::Boolean(_) => Type::Bool,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Real(r) => write!(f, "{:?}", r),
            Literal::String(s) => write!(f, "{:?}", s),
            Literal::Boolean(true) => write!(f, "TRUE"),
            Literal::Boolean(false) => write!(f, "FALSE"),
        }
    }
}
