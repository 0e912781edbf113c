//! Parser implementation
//!
//! A recursive-descent parser over a lazily scanned token stream. Binary
//! operators are parsed by precedence level, lowest first:
//! `OR`, `AND`, equality, relational, additive, multiplicative; all of them
//! are left-associative. The first syntax error aborts the parse.
//!
//! Nesting is bounded: blocks, parentheses, call arguments and unary
//! operators may nest at most [`MAX_NESTING`] levels, and no expression tree
//! may be deeper than [`MAX_EXPR_DEPTH`]. Deeper input is a syntax error.

use tracing::debug;

use crate::error::{Diagnostic, MiniResult};
use crate::lexer::{Keyword, Lexer, Literal as TokenLiteral, Token, TokenType};
use super::ast::*;

/// Deepest nesting of blocks, parentheses, call arguments and unary operators
pub const MAX_NESTING: usize = 64;

/// Deepest expression tree, counting left-associative operator chains
pub const MAX_EXPR_DEPTH: usize = 256;

/// Parser for MiniLang source code
pub struct Parser {
    lexer: Lexer,
    current: Token,
    /// Current nesting level, see [`MAX_NESTING`]
    depth: usize,
}

impl Parser {
    /// Create a new parser, pulling the first token from the lexer
    pub fn new(mut lexer: Lexer) -> MiniResult<Self> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
        })
    }

    /// Parse the whole compilation unit
    pub fn parse(mut self) -> MiniResult<Program> {
        let mut declarations = Vec::new();

        while !self.is_at_end() {
            declarations.push(self.declaration()?);
        }

        debug!(declarations = declarations.len(), "parsed program");
        Ok(Program { declarations })
    }

    // ===== Declarations =====

    fn declaration(&mut self) -> MiniResult<Declaration> {
        if self.check_keyword(Keyword::Const) {
            Ok(Declaration::Const(self.const_declaration()?))
        } else if self.check_keyword(Keyword::Subroutine) {
            Ok(Declaration::Subroutine(self.subroutine_declaration()?))
        } else if self.check_type_keyword() {
            Ok(Declaration::Var(self.var_declaration()?))
        } else {
            Err(self.unexpected("a declaration (CONST, SUBROUTINE or a type name)"))
        }
    }

    fn const_declaration(&mut self) -> MiniResult<ConstDecl> {
        let location = self.expect_keyword(Keyword::Const)?.location;
        let declared_type = self.value_type()?;
        let name = self.expect_identifier("constant name")?;
        self.expect(TokenType::Assign)?;
        let value = self.const_literal()?;
        self.expect(TokenType::Semicolon)?;

        Ok(ConstDecl {
            name,
            declared_type,
            value,
            location,
        })
    }

    /// A literal, optionally negated when numeric
    fn const_literal(&mut self) -> MiniResult<Literal> {
        let negative = self.match_token(TokenType::Minus)?;

        let value = match literal_of(&self.current.token_type) {
            Some(Literal::Integer(n)) if negative => Literal::Integer(-n),
            Some(Literal::Real(r)) if negative => Literal::Real(-r),
            Some(value @ (Literal::Integer(_) | Literal::Real(_))) => value,
            Some(value) if !negative => value,
            _ if negative => return Err(self.unexpected("a numeric literal after '-'")),
            _ => return Err(self.unexpected("a literal value")),
        };

        self.advance()?;
        Ok(value)
    }

    fn var_declaration(&mut self) -> MiniResult<VarDecl> {
        let location = self.current.location;
        let declared_type = self.value_type()?;
        let name = self.expect_identifier("variable name")?;

        let initializer = if self.match_token(TokenType::Assign)? {
            Some(self.expression()?)
        } else {
            None
        };

        self.expect(TokenType::Semicolon)?;

        Ok(VarDecl {
            name,
            declared_type,
            initializer,
            location,
        })
    }

    fn subroutine_declaration(&mut self) -> MiniResult<SubroutineDecl> {
        let location = self.expect_keyword(Keyword::Subroutine)?.location;
        let return_type = self.return_type()?;
        let name = self.expect_identifier("subroutine name")?;

        self.expect(TokenType::LeftParen)?;

        let mut params = Vec::new();
        if !self.check(&TokenType::RightParen) {
            loop {
                let param_location = self.current.location;
                let param_type = self.value_type()?;
                let param_name = self.expect_identifier("parameter name")?;

                params.push(Param {
                    name: param_name,
                    param_type,
                    location: param_location,
                });

                if !self.match_token(TokenType::Comma)? {
                    break;
                }
            }
        }

        self.expect(TokenType::RightParen)?;
        self.expect_keyword(Keyword::Do)?;
        let body = self.statements()?;
        self.expect_keyword(Keyword::End)?;

        Ok(SubroutineDecl {
            name,
            return_type,
            params,
            body,
            location,
        })
    }

    // ===== Statements =====

    /// Statements up to (not including) the closing END or ELSE
    fn statements(&mut self) -> MiniResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check_keyword(Keyword::End)
            && !self.check_keyword(Keyword::Else)
            && !self.is_at_end()
        {
            statements.push(self.statement()?);
        }

        Ok(statements)
    }

    fn statement(&mut self) -> MiniResult<Stmt> {
        if self.check_type_keyword() {
            return Ok(Stmt::Var(self.var_declaration()?));
        }

        match self.current.token_type {
            TokenType::Keyword(Keyword::Const) => Ok(Stmt::Const(self.const_declaration()?)),
            TokenType::Keyword(Keyword::If) => self.nested(Self::if_statement),
            TokenType::Keyword(Keyword::While) => self.nested(Self::while_statement),
            TokenType::Keyword(Keyword::Return) => self.return_statement(),
            TokenType::Keyword(Keyword::Print) => self.print_statement(),
            TokenType::Keyword(Keyword::Do) => self.nested(Self::block_statement),
            TokenType::Identifier => self.identifier_statement(),
            _ => Err(self.unexpected("a statement")),
        }
    }

    /// Assignment or call statement, both starting with an identifier
    fn identifier_statement(&mut self) -> MiniResult<Stmt> {
        let Token { lexeme: name, location, .. } = self.advance()?;

        if self.match_token(TokenType::Assign)? {
            let value = self.expression()?;
            self.expect(TokenType::Semicolon)?;
            Ok(Stmt::Assign {
                target: name,
                value,
                location,
            })
        } else if self.match_token(TokenType::LeftParen)? {
            let arguments = self.arguments()?;
            self.expect(TokenType::Semicolon)?;
            Ok(Stmt::Call {
                callee: name,
                arguments,
                location,
            })
        } else {
            Err(self.unexpected(&format!("'=' or '(' after '{}'", name)))
        }
    }

    fn if_statement(&mut self) -> MiniResult<Stmt> {
        let location = self.expect_keyword(Keyword::If)?.location;
        let condition = self.expression()?;

        self.expect_keyword(Keyword::Then)?;
        let then_branch = self.statements()?;

        let else_branch = if self.match_keyword(Keyword::Else)? {
            Some(self.statements()?)
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location,
        })
    }

    fn while_statement(&mut self) -> MiniResult<Stmt> {
        let location = self.expect_keyword(Keyword::While)?.location;
        let condition = self.expression()?;

        self.expect_keyword(Keyword::Do)?;
        let body = self.statements()?;
        self.expect_keyword(Keyword::End)?;

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    fn return_statement(&mut self) -> MiniResult<Stmt> {
        let location = self.expect_keyword(Keyword::Return)?.location;

        let value = if self.check(&TokenType::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };

        self.expect(TokenType::Semicolon)?;
        Ok(Stmt::Return { value, location })
    }

    fn print_statement(&mut self) -> MiniResult<Stmt> {
        let location = self.expect_keyword(Keyword::Print)?.location;

        self.expect(TokenType::LeftParen)?;
        let value = self.expression()?;
        self.expect(TokenType::RightParen)?;
        self.expect(TokenType::Semicolon)?;

        Ok(Stmt::Print { value, location })
    }

    fn block_statement(&mut self) -> MiniResult<Stmt> {
        let location = self.expect_keyword(Keyword::Do)?.location;
        let statements = self.statements()?;
        self.expect_keyword(Keyword::End)?;
        Ok(Stmt::Block {
            statements,
            location,
        })
    }

    // ===== Expressions =====

    fn expression(&mut self) -> MiniResult<Expr> {
        self.logical_or()
    }

    fn logical_or(&mut self) -> MiniResult<Expr> {
        self.binary_level(&[BinaryOp::Or], Self::logical_and)
    }

    fn logical_and(&mut self) -> MiniResult<Expr> {
        self.binary_level(&[BinaryOp::And], Self::equality)
    }

    fn equality(&mut self) -> MiniResult<Expr> {
        self.binary_level(&[BinaryOp::Equal, BinaryOp::NotEqual], Self::relational)
    }

    fn relational(&mut self) -> MiniResult<Expr> {
        self.binary_level(
            &[
                BinaryOp::Less,
                BinaryOp::LessEqual,
                BinaryOp::Greater,
                BinaryOp::GreaterEqual,
            ],
            Self::additive,
        )
    }

    fn additive(&mut self) -> MiniResult<Expr> {
        self.binary_level(&[BinaryOp::Add, BinaryOp::Subtract], Self::multiplicative)
    }

    fn multiplicative(&mut self) -> MiniResult<Expr> {
        self.binary_level(&[BinaryOp::Multiply, BinaryOp::Divide], Self::unary)
    }

    /// One left-associative precedence level
    fn binary_level(
        &mut self,
        operators: &[BinaryOp],
        operand: fn(&mut Self) -> MiniResult<Expr>,
    ) -> MiniResult<Expr> {
        let mut expr = operand(self)?;

        while let Some(operator) = self.current_binary_op().filter(|op| operators.contains(op)) {
            self.advance()?;
            let right = operand(self)?;
            let location = expr.location();
            expr = self.bounded(Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
                location,
            })?;
        }

        Ok(expr)
    }

    fn unary(&mut self) -> MiniResult<Expr> {
        let operator = match self.current.token_type {
            TokenType::Minus => Some(UnaryOp::Negate),
            TokenType::Keyword(Keyword::Not) => Some(UnaryOp::Not),
            _ => None,
        };

        if let Some(operator) = operator {
            let location = self.advance()?.location;
            let operand = Box::new(self.nested(Self::unary)?);
            return self.bounded(Expr::Unary {
                operator,
                operand,
                location,
            });
        }

        self.primary()
    }

    fn primary(&mut self) -> MiniResult<Expr> {
        let location = self.current.location;

        if let Some(value) = literal_of(&self.current.token_type) {
            self.advance()?;
            return Ok(Expr::Literal { value, location });
        }

        match self.current.token_type {
            TokenType::Identifier => {
                let name = self.advance()?.lexeme;
                if self.match_token(TokenType::LeftParen)? {
                    let arguments = self.nested(Self::arguments)?;
                    self.bounded(Expr::Call {
                        callee: name,
                        arguments,
                        location,
                    })
                } else {
                    Ok(Expr::Identifier { name, location })
                }
            }

            TokenType::LeftParen => {
                self.advance()?;
                let expr = self.nested(Self::expression)?;
                self.expect(TokenType::RightParen)?;
                Ok(expr)
            }

            _ => Err(self.unexpected("an expression")),
        }
    }

    /// Argument list after the opening '(' up to and including ')'
    fn arguments(&mut self) -> MiniResult<Vec<Expr>> {
        let mut arguments = Vec::new();

        if !self.check(&TokenType::RightParen) {
            loop {
                arguments.push(self.expression()?);
                if !self.match_token(TokenType::Comma)? {
                    break;
                }
            }
        }

        self.expect(TokenType::RightParen)?;
        Ok(arguments)
    }

    fn current_binary_op(&self) -> Option<BinaryOp> {
        match self.current.token_type {
            TokenType::Plus => Some(BinaryOp::Add),
            TokenType::Minus => Some(BinaryOp::Subtract),
            TokenType::Star => Some(BinaryOp::Multiply),
            TokenType::Slash => Some(BinaryOp::Divide),
            TokenType::Equal => Some(BinaryOp::Equal),
            TokenType::NotEqual => Some(BinaryOp::NotEqual),
            TokenType::Less => Some(BinaryOp::Less),
            TokenType::LessEqual => Some(BinaryOp::LessEqual),
            TokenType::Greater => Some(BinaryOp::Greater),
            TokenType::GreaterEqual => Some(BinaryOp::GreaterEqual),
            TokenType::Keyword(Keyword::And) => Some(BinaryOp::And),
            TokenType::Keyword(Keyword::Or) => Some(BinaryOp::Or),
            _ => None,
        }
    }

    // ===== Type Parsing =====

    /// INT, REAL, BOOL or STRING
    fn value_type(&mut self) -> MiniResult<Type> {
        if let Some(parsed) = type_of_keyword(&self.current.token_type) {
            self.advance()?;
            return Ok(parsed);
        }

        if self.check_keyword(Keyword::Void) {
            return Err(Diagnostic::syntax(
                "expected INT, REAL, BOOL or STRING, found 'VOID' \
                 (VOID is only valid as a subroutine return type)",
                self.current.location,
            ));
        }

        Err(self.unexpected("a type (INT, REAL, BOOL or STRING)"))
    }

    /// VOID or a value type
    fn return_type(&mut self) -> MiniResult<Type> {
        if self.match_keyword(Keyword::Void)? {
            return Ok(Type::Void);
        }

        if let Some(parsed) = type_of_keyword(&self.current.token_type) {
            self.advance()?;
            return Ok(parsed);
        }

        Err(self.unexpected("a return type (VOID, INT, REAL, BOOL or STRING)"))
    }

    // ===== Helper Methods =====

    /// Whether the current token starts a variable declaration
    fn check_type_keyword(&self) -> bool {
        type_of_keyword(&self.current.token_type).is_some() || self.check_keyword(Keyword::Void)
    }

    fn match_token(&mut self, token_type: TokenType) -> MiniResult<bool> {
        if self.check(&token_type) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn match_keyword(&mut self, keyword: Keyword) -> MiniResult<bool> {
        if self.check_keyword(keyword) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn check(&self, token_type: &TokenType) -> bool {
        std::mem::discriminant(&self.current.token_type) == std::mem::discriminant(token_type)
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.current.token_type, TokenType::Keyword(k) if k == keyword)
    }

    /// Move to the next token, returning the one just consumed
    fn advance(&mut self) -> MiniResult<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current.token_type, TokenType::Eof)
    }

    fn expect(&mut self, token_type: TokenType) -> MiniResult<Token> {
        if self.check(&token_type) {
            self.advance()
        } else {
            Err(self.unexpected(&token_type.to_string()))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> MiniResult<Token> {
        if self.check_keyword(keyword) {
            self.advance()
        } else {
            Err(self.unexpected(&format!("'{}'", keyword)))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> MiniResult<String> {
        if self.check(&TokenType::Identifier) {
            Ok(self.advance()?.lexeme)
        } else {
            Err(self.unexpected(what))
        }
    }

    /// Run `parse` one nesting level deeper
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> MiniResult<T>) -> MiniResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(Diagnostic::syntax(
                format!("nested too deeply (more than {} levels)", MAX_NESTING),
                self.current.location,
            ));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Reject expression trees deeper than [`MAX_EXPR_DEPTH`]
    fn bounded(&self, expr: Expr) -> MiniResult<Expr> {
        if expr.depth() > MAX_EXPR_DEPTH {
            return Err(Diagnostic::syntax(
                format!("expression nested too deeply (more than {} levels)", MAX_EXPR_DEPTH),
                expr.location(),
            ));
        }
        Ok(expr)
    }

    /// Syntax error naming what was expected and the token actually found
    fn unexpected(&self, expected: &str) -> Diagnostic {
        Diagnostic::syntax(
            format!("expected {}, found {}", expected, self.current.describe()),
            self.current.location,
        )
    }
}

fn literal_of(token_type: &TokenType) -> Option<Literal> {
    match token_type {
        TokenType::Literal(TokenLiteral::Integer(n)) => Some(Literal::Integer(*n)),
        TokenType::Literal(TokenLiteral::Real(r)) => Some(Literal::Real(*r)),
        TokenType::Literal(TokenLiteral::String(s)) => Some(Literal::String(s.clone())),
        TokenType::Keyword(Keyword::True) => Some(Literal::Boolean(true)),
        TokenType::Keyword(Keyword::False) => Some(Literal::Boolean(false)),
        _ => None,
    }
}

fn type_of_keyword(token_type: &TokenType) -> Option<Type> {
    match token_type {
        TokenType::Keyword(Keyword::Int) => Some(Type::Int),
        TokenType::Keyword(Keyword::Real) => Some(Type::Real),
        TokenType::Keyword(Keyword::Bool) => Some(Type::Bool),
        TokenType::Keyword(Keyword::String) => Some(Type::String),
        _ => None,
    }
}
