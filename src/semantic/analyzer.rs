//! Semantic analyzer
//!
//! Walks a parsed [`Program`] once, resolving names through a [`ScopeStack`]
//! and checking every statement and expression against the type rules.
//! Problems are collected rather than returned early, so one run reports
//! every independent error. An expression whose type cannot be determined
//! is typed `None`, and whatever consumes it skips its own check.

use tracing::{debug, trace};

use crate::error::{Diagnostic, ErrorCode, SourceLocation};
use crate::parser::ast::*;
use crate::types::{binary_result, unary_result};

use super::scope::{DeclareError, ScopeKind, ScopeStack, Symbol, SymbolKind};

/// Name of the entry-point subroutine
pub const ENTRY_POINT: &str = "main";

/// Where a call appears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallContext {
    /// `f(x);` any return type is fine
    Statement,
    /// `y = f(x) + 1;` the callee must return a value
    Expression,
}

/// Analyze a program and return its semantic diagnostics in traversal order
pub fn analyze(program: &Program) -> Vec<Diagnostic> {
    SemanticAnalyzer::new().analyze(program)
}

pub struct SemanticAnalyzer {
    scopes: ScopeStack,
    diagnostics: Vec<Diagnostic>,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            scopes: ScopeStack::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn analyze(mut self, program: &Program) -> Vec<Diagnostic> {
        for decl in &program.declarations {
            self.register_global(decl);
        }

        self.check_entry_point(program);

        for decl in &program.declarations {
            match decl {
                Declaration::Const(c) => self.check_const_value(c),
                Declaration::Var(v) => self.check_initializer(v),
                Declaration::Subroutine(s) => self.check_subroutine(s),
            }
        }

        debug!(diagnostics = self.diagnostics.len(), "semantic analysis finished");
        self.diagnostics
    }

    // ===== Declarations =====

    fn register_global(&mut self, decl: &Declaration) {
        let (kind, symbol_type) = match decl {
            Declaration::Const(c) => (SymbolKind::Constant, c.declared_type),
            Declaration::Var(v) => (SymbolKind::Variable, v.declared_type),
            Declaration::Subroutine(s) => {
                let params = s.params.iter().map(|p| p.param_type).collect();
                (SymbolKind::Subroutine { params }, s.return_type)
            }
        };
        self.declare(decl.name(), kind, symbol_type, decl.location());
    }

    fn declare(&mut self, name: &str, kind: SymbolKind, symbol_type: Type, location: SourceLocation) {
        let symbol = Symbol::new(name, kind, symbol_type, location);

        if let Err(DeclareError::AlreadyDeclared { name, existing }) = self.scopes.declare(symbol) {
            let message = format!(
                "'{}' is declared twice in the same scope: first at {}, again at {}",
                name, existing, location
            );
            self.diagnostics
                .push(Diagnostic::error(ErrorCode::Redeclaration, message, location).with_related(existing));
        }
    }

    fn check_entry_point(&mut self, program: &Program) {
        let main = program.subroutines().find(|s| s.name == ENTRY_POINT);

        let Some(main) = main else {
            match program
                .subroutines()
                .find(|s| s.name.eq_ignore_ascii_case(ENTRY_POINT))
            {
                Some(near_miss) => self.error(
                    ErrorCode::MissingMainSubroutine,
                    format!(
                        "no subroutine named 'main'; found '{}', but the entry point must be spelled in lowercase",
                        near_miss.name
                    ),
                    near_miss.location,
                ),
                None => self.error(
                    ErrorCode::MissingMainSubroutine,
                    "program has no 'main' subroutine",
                    SourceLocation::start(),
                ),
            }
            return;
        };

        if main.return_type != Type::Void {
            self.error(
                ErrorCode::InvalidMainSignature,
                format!("'main' must return VOID, found {}", main.return_type),
                main.location,
            );
        }

        if !main.params.is_empty() {
            self.error(
                ErrorCode::InvalidMainSignature,
                format!("'main' must take no parameters, found {}", main.params.len()),
                main.location,
            );
        }
    }

    fn check_const_value(&mut self, decl: &ConstDecl) {
        let actual = decl.value.value_type();
        if !decl.declared_type.accepts(actual) {
            self.error(
                ErrorCode::TypeMismatch,
                format!(
                    "constant '{}' has type {} but its value is {}",
                    decl.name, decl.declared_type, actual
                ),
                decl.location,
            );
        }
    }

    fn check_initializer(&mut self, decl: &VarDecl) {
        let Some(init) = &decl.initializer else {
            return;
        };

        if let Some(actual) = self.check_expr(init) {
            if !decl.declared_type.accepts(actual) {
                self.error(
                    ErrorCode::TypeMismatch,
                    format!(
                        "variable '{}' has type {} but is initialized with {}",
                        decl.name, decl.declared_type, actual
                    ),
                    init.location(),
                );
            }
        }
    }

    fn check_subroutine(&mut self, sub: &SubroutineDecl) {
        debug!(name = %sub.name, params = sub.params.len(), "checking subroutine");

        self.scopes.push(ScopeKind::Subroutine {
            name: sub.name.clone(),
            return_type: sub.return_type,
        });

        for param in &sub.params {
            self.declare(&param.name, SymbolKind::Variable, param.param_type, param.location);
        }

        // The body shares the parameters' scope.
        self.check_statements(&sub.body);
        self.scopes.pop();
    }

    // ===== Statements =====

    fn check_block(&mut self, statements: &[Stmt]) {
        self.scopes.push(ScopeKind::Block);
        trace!(depth = self.scopes.depth(), statements = statements.len(), "checking block");
        self.check_statements(statements);
        self.scopes.pop();
    }

    fn check_statements(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.check_stmt(stmt);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Const(decl) => {
                self.check_const_value(decl);
                self.declare(&decl.name, SymbolKind::Constant, decl.declared_type, decl.location);
            }

            Stmt::Var(decl) => {
                self.check_initializer(decl);
                self.declare(&decl.name, SymbolKind::Variable, decl.declared_type, decl.location);
            }

            Stmt::Assign { target, value, location } => self.check_assignment(target, value, *location),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.check_condition(condition, "IF");
                self.check_block(then_branch);
                if let Some(else_branch) = else_branch {
                    self.check_block(else_branch);
                }
            }

            Stmt::While { condition, body, .. } => {
                self.check_condition(condition, "WHILE");
                self.check_block(body);
            }

            Stmt::Return { value, location } => self.check_return(value.as_ref(), *location),

            Stmt::Call {
                callee,
                arguments,
                location,
            } => {
                self.check_call(callee, arguments, *location, CallContext::Statement);
            }

            Stmt::Print { value, .. } => {
                self.check_expr(value);
            }

            Stmt::Block { statements, .. } => self.check_block(statements),
        }
    }

    fn check_assignment(&mut self, target: &str, value: &Expr, location: SourceLocation) {
        let actual = self.check_expr(value);

        let Some(symbol) = self.resolve(target) else {
            self.error(
                ErrorCode::UndeclaredIdentifier,
                format!("undeclared identifier '{}'", target),
                location,
            );
            return;
        };

        match symbol.kind {
            SymbolKind::Constant => self.error(
                ErrorCode::ConstantReassignment,
                format!("cannot assign to constant '{}' declared at {}", target, symbol.location),
                location,
            ),
            SymbolKind::Subroutine { .. } => self.error(
                ErrorCode::NotAValue,
                format!("cannot assign to subroutine '{}'", target),
                location,
            ),
            SymbolKind::Variable => {
                if let Some(actual) = actual {
                    if !symbol.symbol_type.accepts(actual) {
                        self.error(
                            ErrorCode::TypeMismatch,
                            format!(
                                "cannot assign a {} value to '{}' of type {}",
                                actual, target, symbol.symbol_type
                            ),
                            location,
                        );
                    }
                }
            }
        }
    }

    fn check_condition(&mut self, condition: &Expr, keyword: &str) {
        if let Some(actual) = self.check_expr(condition) {
            if actual != Type::Bool {
                self.error(
                    ErrorCode::TypeMismatch,
                    format!("{} condition must be BOOL, found {}", keyword, actual),
                    condition.location(),
                );
            }
        }
    }

    fn check_return(&mut self, value: Option<&Expr>, location: SourceLocation) {
        let Some((name, expected)) = self
            .scopes
            .enclosing_subroutine()
            .map(|(name, return_type)| (name.to_string(), return_type))
        else {
            return;
        };

        match value {
            None if expected == Type::Void => {}
            None => self.error(
                ErrorCode::TypeMismatch,
                format!("RETURN without a value in '{}', which returns {}", name, expected),
                location,
            ),
            Some(value) => {
                let actual = self.check_expr(value);
                if expected == Type::Void {
                    self.error(
                        ErrorCode::TypeMismatch,
                        format!("'{}' returns VOID and cannot RETURN a value", name),
                        location,
                    );
                } else if let Some(actual) = actual {
                    if !expected.accepts(actual) {
                        self.error(
                            ErrorCode::TypeMismatch,
                            format!("'{}' returns {}, but RETURN gives {}", name, expected, actual),
                            location,
                        );
                    }
                }
            }
        }
    }

    // ===== Expressions =====

    /// Type of an expression, or `None` when it cannot be determined
    fn check_expr(&mut self, expr: &Expr) -> Option<Type> {
        match expr {
            Expr::Literal { value, .. } => Some(value.value_type()),

            Expr::Identifier { name, location } => {
                let Some(symbol) = self.resolve(name) else {
                    self.error(
                        ErrorCode::UndeclaredIdentifier,
                        format!("undeclared identifier '{}'", name),
                        *location,
                    );
                    return None;
                };

                if let SymbolKind::Subroutine { .. } = symbol.kind {
                    self.error(
                        ErrorCode::NotAValue,
                        format!("subroutine '{}' used as a value; call it with '(...)'", name),
                        *location,
                    );
                    return None;
                }

                trace!(name = %name, ty = %symbol.symbol_type, "resolved identifier");
                Some(symbol.symbol_type)
            }

            Expr::Unary {
                operator,
                operand,
                location,
            } => {
                let operand = self.check_expr(operand)?;
                let result = unary_result(*operator, operand);
                if result.is_none() {
                    self.error(
                        ErrorCode::TypeMismatch,
                        format!("operator '{}' cannot be applied to {}", operator, operand),
                        *location,
                    );
                }
                result
            }

            Expr::Binary {
                left,
                operator,
                right,
                location,
            } => {
                let left = self.check_expr(left);
                let right = self.check_expr(right);
                let (left, right) = (left?, right?);

                let result = binary_result(*operator, left, right);
                if result.is_none() {
                    self.error(
                        ErrorCode::TypeMismatch,
                        format!("operator '{}' cannot be applied to {} and {}", operator, left, right),
                        *location,
                    );
                }
                result
            }

            Expr::Call {
                callee,
                arguments,
                location,
            } => self.check_call(callee, arguments, *location, CallContext::Expression),
        }
    }

    fn check_call(
        &mut self,
        callee: &str,
        arguments: &[Expr],
        location: SourceLocation,
        context: CallContext,
    ) -> Option<Type> {
        let argument_types: Vec<Option<Type>> = arguments.iter().map(|arg| self.check_expr(arg)).collect();

        let Some(symbol) = self.resolve(callee) else {
            self.error(
                ErrorCode::UndeclaredIdentifier,
                format!("undeclared subroutine '{}'", callee),
                location,
            );
            return None;
        };

        let SymbolKind::Subroutine { params } = &symbol.kind else {
            self.error(
                ErrorCode::NotASubroutine,
                format!("'{}' is a {}, not a subroutine", callee, symbol.kind.describe()),
                location,
            );
            return None;
        };

        if params.len() != arguments.len() {
            self.error(
                ErrorCode::ArityMismatch,
                format!(
                    "'{}' expects {} argument(s), found {}",
                    callee,
                    params.len(),
                    arguments.len()
                ),
                location,
            );
        } else {
            for (index, (expected, arg)) in params.iter().zip(arguments).enumerate() {
                if let Some(actual) = argument_types[index] {
                    if !expected.accepts(actual) {
                        self.error(
                            ErrorCode::TypeMismatch,
                            format!(
                                "argument {} of '{}' expects {}, found {}",
                                index + 1,
                                callee,
                                expected,
                                actual
                            ),
                            arg.location(),
                        );
                    }
                }
            }
        }

        if context == CallContext::Expression && symbol.symbol_type == Type::Void {
            self.error(
                ErrorCode::VoidValueUsedInExpression,
                format!("'{}' returns VOID and cannot be used as a value", callee),
                location,
            );
            return None;
        }

        Some(symbol.symbol_type)
    }

    // ===== Helpers =====

    fn resolve(&self, name: &str) -> Option<Symbol> {
        self.scopes.lookup(name).cloned()
    }

    fn error(&mut self, code: ErrorCode, message: impl Into<String>, location: SourceLocation) {
        let diagnostic = Diagnostic::error(code, message, location);
        trace!(%diagnostic, "semantic error");
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn check(source: &str) -> Vec<Diagnostic> {
        let program = parse(source).unwrap();
        analyze(&program)
    }

    fn codes(source: &str) -> Vec<ErrorCode> {
        check(source).into_iter().map(|d| d.code).collect()
    }

    /// Wrap statements in a valid `main`
    fn in_main(body: &str) -> String {
        format!("SUBROUTINE VOID main() DO\n{}\nEND\n", body)
    }

    #[test]
    fn test_valid_program() {
        let source = "\
CONST INT LIMIT = 10;
REAL scale = 1.5;
SUBROUTINE INT twice(INT n) DO
  RETURN n * 2;
END
SUBROUTINE VOID main() DO
  INT i = 0;
  WHILE i < LIMIT DO
    i = i + twice(1);
    scale = scale * i;
  END
  IF i >= LIMIT AND NOT (scale == 0) THEN
    PRINT(\"done\");
  ELSE
    PRINT(i);
  END
  RETURN;
END
";
        assert_eq!(check(source), vec![]);
    }

    #[test]
    fn test_missing_main() {
        let diagnostics = check("SUBROUTINE VOID start() DO END");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, ErrorCode::MissingMainSubroutine);
        assert_eq!(diagnostics[0].location, SourceLocation::new(1, 1));
    }

    #[test]
    fn test_main_with_wrong_case() {
        let diagnostics = check("INT x;\nSUBROUTINE VOID Main() DO END");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, ErrorCode::MissingMainSubroutine);
        assert_eq!(diagnostics[0].location, SourceLocation::new(2, 1));
        assert!(diagnostics[0].message.contains("'Main'"));
    }

    #[test]
    fn test_main_must_be_a_subroutine() {
        assert_eq!(codes("INT main;"), vec![ErrorCode::MissingMainSubroutine]);
    }

    #[test]
    fn test_invalid_main_signature() {
        assert_eq!(
            codes("SUBROUTINE INT main() DO RETURN 0; END"),
            vec![ErrorCode::InvalidMainSignature]
        );
        assert_eq!(
            codes("SUBROUTINE VOID main(INT argc) DO END"),
            vec![ErrorCode::InvalidMainSignature]
        );
        assert_eq!(
            codes("SUBROUTINE BOOL main(INT a, INT b) DO RETURN TRUE; END"),
            vec![ErrorCode::InvalidMainSignature, ErrorCode::InvalidMainSignature]
        );
    }

    #[test]
    fn test_global_redeclaration() {
        let source = "INT x;\nSTRING x;\nSUBROUTINE VOID main() DO x = 1; END";
        let diagnostics = check(source);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, ErrorCode::Redeclaration);
        assert_eq!(diagnostics[0].location, SourceLocation::new(2, 1));
        assert_eq!(diagnostics[0].related, Some(SourceLocation::new(1, 1)));
        assert!(diagnostics[0].message.contains("1:1"));
        assert!(diagnostics[0].message.contains("2:1"));
    }

    #[test]
    fn test_constant_and_subroutine_share_namespace() {
        let source = "CONST INT f = 1;\nSUBROUTINE VOID f() DO END\nSUBROUTINE VOID main() DO END";
        assert_eq!(codes(source), vec![ErrorCode::Redeclaration]);
    }

    #[test]
    fn test_local_repeating_parameter() {
        let source = "SUBROUTINE VOID f(INT a) DO INT a = 1; END\nSUBROUTINE VOID main() DO f(1); END";
        assert_eq!(codes(source), vec![ErrorCode::Redeclaration]);
    }

    #[test]
    fn test_block_redeclaration_only_within_block() {
        let body = "INT x = 1;\nDO\n  STRING x = \"a\";\n  STRING x = \"b\";\nEND";
        let diagnostics = check(&in_main(body));

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, ErrorCode::Redeclaration);
        assert_eq!(diagnostics[0].location, SourceLocation::new(5, 3));
        assert_eq!(diagnostics[0].related, Some(SourceLocation::new(4, 3)));
    }

    #[test]
    fn test_shadowing_resolves_innermost() {
        let body = "\
INT x = 1;
DO
  STRING x = \"inner\";
  x = \"still a string\";
END
x = 2;";
        assert_eq!(check(&in_main(body)), vec![]);
    }

    #[test]
    fn test_block_locals_are_not_visible_outside() {
        let body = "IF TRUE THEN INT y = 1; END\ny = 2;";
        assert_eq!(codes(&in_main(body)), vec![ErrorCode::UndeclaredIdentifier]);
    }

    #[test]
    fn test_local_not_visible_in_own_initializer() {
        assert_eq!(codes(&in_main("INT z = z + 1;")), vec![ErrorCode::UndeclaredIdentifier]);
    }

    #[test]
    fn test_forward_reference_to_subroutine() {
        let source = "\
SUBROUTINE VOID main() DO PRINT(later(2)); END
SUBROUTINE INT later(INT n) DO RETURN later(n - 1); END";
        assert_eq!(check(source), vec![]);
    }

    #[test]
    fn test_undeclared_identifier_does_not_cascade() {
        let diagnostics = check(&in_main("INT x = missing + 1;\nx = missing * 2 + \"s\";"));
        let codes: Vec<ErrorCode> = diagnostics.iter().map(|d| d.code).collect();

        assert_eq!(
            codes,
            vec![ErrorCode::UndeclaredIdentifier, ErrorCode::UndeclaredIdentifier]
        );
    }

    #[test]
    fn test_assignment_type_mismatch() {
        let diagnostics = check(&in_main("INT x;\n  x = \"text\";"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, ErrorCode::TypeMismatch);
        assert_eq!(diagnostics[0].location, SourceLocation::new(3, 3));
        assert!(diagnostics[0].message.contains("INT"));
        assert!(diagnostics[0].message.contains("STRING"));
    }

    #[test]
    fn test_real_accepts_int() {
        assert_eq!(check(&in_main("REAL r = 1;\nr = r + 2;")), vec![]);
        assert_eq!(codes(&in_main("INT i = 1.5;")), vec![ErrorCode::TypeMismatch]);
    }

    #[test]
    fn test_constant_reassignment_takes_precedence() {
        let source = "CONST INT LIMIT = 1;\nSUBROUTINE VOID main() DO LIMIT = \"x\"; END";
        assert_eq!(codes(source), vec![ErrorCode::ConstantReassignment]);
    }

    #[test]
    fn test_constant_literal_type() {
        assert_eq!(
            codes("CONST BOOL FLAG = 1;\nSUBROUTINE VOID main() DO END"),
            vec![ErrorCode::TypeMismatch]
        );
        assert_eq!(
            check("CONST REAL PI = 3;\nSUBROUTINE VOID main() DO CONST STRING S = \"s\"; END"),
            vec![]
        );
    }

    #[test]
    fn test_conditions_must_be_bool() {
        let body = "IF 1 THEN END\nWHILE \"s\" DO END\nIF 1 < 2 THEN END";
        assert_eq!(
            codes(&in_main(body)),
            vec![ErrorCode::TypeMismatch, ErrorCode::TypeMismatch]
        );
    }

    #[test]
    fn test_operator_signatures() {
        assert_eq!(codes(&in_main("PRINT(1 + TRUE);")), vec![ErrorCode::TypeMismatch]);
        assert_eq!(codes(&in_main("PRINT(1 AND TRUE);")), vec![ErrorCode::TypeMismatch]);
        assert_eq!(codes(&in_main("PRINT(NOT 1);")), vec![ErrorCode::TypeMismatch]);
        assert_eq!(codes(&in_main("PRINT(-\"s\");")), vec![ErrorCode::TypeMismatch]);
        assert_eq!(codes(&in_main("PRINT(TRUE < FALSE);")), vec![ErrorCode::TypeMismatch]);
        assert_eq!(check(&in_main("PRINT(\"a\" < \"b\" OR 1 == 1.0);")), vec![]);
    }

    #[test]
    fn test_nested_mismatch_reported_once() {
        // The inner mismatch makes the outer operand unknown.
        assert_eq!(codes(&in_main("PRINT((1 + TRUE) * 2 - 3);")), vec![ErrorCode::TypeMismatch]);
    }

    #[test]
    fn test_return_rules() {
        let source = "\
SUBROUTINE INT a() DO RETURN; END
SUBROUTINE VOID b() DO RETURN 1; END
SUBROUTINE INT c() DO RETURN \"s\"; END
SUBROUTINE REAL d() DO RETURN 1; END
SUBROUTINE VOID main() DO RETURN; END";
        let diagnostics = check(source);
        let lines: Vec<(ErrorCode, usize)> = diagnostics.iter().map(|d| (d.code, d.line())).collect();

        assert_eq!(
            lines,
            vec![
                (ErrorCode::TypeMismatch, 1),
                (ErrorCode::TypeMismatch, 2),
                (ErrorCode::TypeMismatch, 3),
            ]
        );
    }

    #[test]
    fn test_void_call_contexts() {
        let source = "\
SUBROUTINE VOID log(STRING s) DO PRINT(s); END
SUBROUTINE VOID main() DO
  log(\"as a statement\");
  PRINT(log(\"as a value\"));
END";
        let diagnostics = check(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, ErrorCode::VoidValueUsedInExpression);
        assert_eq!(diagnostics[0].location, SourceLocation::new(4, 9));
    }

    #[test]
    fn test_value_call_in_statement_position() {
        let source = "SUBROUTINE INT one() DO RETURN 1; END\nSUBROUTINE VOID main() DO one(); END";
        assert_eq!(check(source), vec![]);
    }

    #[test]
    fn test_arity_mismatch_skips_argument_types() {
        let source = "\
SUBROUTINE INT add(INT a, INT b) DO RETURN a + b; END
SUBROUTINE VOID main() DO
  add(1);
  PRINT(add(\"x\", 2, 3));
END";
        assert_eq!(codes(source), vec![ErrorCode::ArityMismatch, ErrorCode::ArityMismatch]);
    }

    #[test]
    fn test_argument_type_mismatch() {
        let source = "\
SUBROUTINE VOID show(INT n, REAL r) DO END
SUBROUTINE VOID main() DO show(1, \"r\"); show(1, 2); END";
        let diagnostics = check(source);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, ErrorCode::TypeMismatch);
        assert_eq!(diagnostics[0].location, SourceLocation::new(2, 35));
        assert!(diagnostics[0].message.contains("argument 2"));
    }

    #[test]
    fn test_arguments_are_analyzed() {
        let source = "SUBROUTINE VOID f(INT n) DO END\nSUBROUTINE VOID main() DO f(nope); END";
        assert_eq!(codes(source), vec![ErrorCode::UndeclaredIdentifier]);
    }

    #[test]
    fn test_symbol_kind_misuse() {
        let source = "\
INT counter;
SUBROUTINE VOID tick() DO END
SUBROUTINE VOID main() DO
  counter();
  tick = 1;
  counter = tick + 1;
  undefined();
END";
        assert_eq!(
            codes(source),
            vec![
                ErrorCode::NotASubroutine,
                ErrorCode::NotAValue,
                ErrorCode::NotAValue,
                ErrorCode::UndeclaredIdentifier,
            ]
        );
    }

    #[test]
    fn test_global_initializer_may_reference_any_global() {
        let source = "\
INT total = base * 2;
INT base = 21;
SUBROUTINE VOID main() DO END";
        assert_eq!(check(source), vec![]);
    }

    #[test]
    fn test_diagnostics_are_deterministic() {
        let source = "\
INT a;
INT a;
SUBROUTINE INT main(INT x) DO
  b = 1;
  a = TRUE;
  RETURN;
END";
        let first = check(source);
        let second = check(source);

        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|d| d.code).collect::<Vec<_>>(),
            vec![
                ErrorCode::Redeclaration,
                ErrorCode::InvalidMainSignature,
                ErrorCode::InvalidMainSignature,
                ErrorCode::UndeclaredIdentifier,
                ErrorCode::TypeMismatch,
                ErrorCode::TypeMismatch,
            ]
        );
    }

    #[test]
    fn test_only_redeclarations_carry_related_location() {
        let source = "\
INT a;
INT a;
SUBROUTINE VOID main() DO
  CONST INT K = 1;
  K = 2;
  missing = 3;
END";
        let diagnostics = check(source);

        assert_eq!(diagnostics.len(), 3);
        for diagnostic in &diagnostics {
            assert_eq!(
                diagnostic.related.is_some(),
                diagnostic.code == ErrorCode::Redeclaration,
                "{}",
                diagnostic
            );
        }
    }
}
