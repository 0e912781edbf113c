//! Indented tree rendering of a program, used by `minilang --ast`

use std::fmt::{self, Write};

use super::ast::*;

const INDENT: &str = "  ";

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program")?;
        for decl in &self.declarations {
            match decl {
                Declaration::Const(c) => write_const(f, c, 1)?,
                Declaration::Var(v) => write_var(f, v, 1)?,
                Declaration::Subroutine(s) => write_subroutine(f, s, 1)?,
            }
        }
        Ok(())
    }
}

fn indent(f: &mut impl Write, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

fn write_const(f: &mut impl Write, decl: &ConstDecl, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    writeln!(f, "Const {} {} = {} @{}", decl.declared_type, decl.name, decl.value, decl.location)
}

fn write_var(f: &mut impl Write, decl: &VarDecl, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    writeln!(f, "Var {} {} @{}", decl.declared_type, decl.name, decl.location)?;
    if let Some(init) = &decl.initializer {
        write_expr(f, init, depth + 1)?;
    }
    Ok(())
}

fn write_subroutine(f: &mut impl Write, sub: &SubroutineDecl, depth: usize) -> fmt::Result {
    let params: Vec<String> = sub
        .params
        .iter()
        .map(|p| format!("{} {}", p.param_type, p.name))
        .collect();

    indent(f, depth)?;
    writeln!(
        f,
        "Subroutine {} {}({}) @{}",
        sub.return_type,
        sub.name,
        params.join(", "),
        sub.location
    )?;
    write_block(f, &sub.body, depth + 1)
}

fn write_block(f: &mut impl Write, statements: &[Stmt], depth: usize) -> fmt::Result {
    for stmt in statements {
        write_stmt(f, stmt, depth)?;
    }
    Ok(())
}

fn write_stmt(f: &mut impl Write, stmt: &Stmt, depth: usize) -> fmt::Result {
    match stmt {
        Stmt::Const(decl) => write_const(f, decl, depth),
        Stmt::Var(decl) => write_var(f, decl, depth),
        Stmt::Assign { target, value, location } => {
            indent(f, depth)?;
            writeln!(f, "Assign {} @{}", target, location)?;
            write_expr(f, value, depth + 1)
        }
        Stmt::If { condition, then_branch, else_branch, location } => {
            indent(f, depth)?;
            writeln!(f, "If @{}", location)?;
            write_expr(f, condition, depth + 1)?;
            indent(f, depth)?;
            writeln!(f, "Then")?;
            write_block(f, then_branch, depth + 1)?;
            if let Some(else_branch) = else_branch {
                indent(f, depth)?;
                writeln!(f, "Else")?;
                write_block(f, else_branch, depth + 1)?;
            }
            Ok(())
        }
        Stmt::While { condition, body, location } => {
            indent(f, depth)?;
            writeln!(f, "While @{}", location)?;
            write_expr(f, condition, depth + 1)?;
            indent(f, depth)?;
            writeln!(f, "Do")?;
            write_block(f, body, depth + 1)
        }
        Stmt::Return { value, location } => {
            indent(f, depth)?;
            writeln!(f, "Return @{}", location)?;
            match value {
                Some(value) => write_expr(f, value, depth + 1),
                None => Ok(()),
            }
        }
        Stmt::Call { callee, arguments, location } => {
            indent(f, depth)?;
            writeln!(f, "CallStatement {} @{}", callee, location)?;
            for arg in arguments {
                write_expr(f, arg, depth + 1)?;
            }
            Ok(())
        }
        Stmt::Print { value, location } => {
            indent(f, depth)?;
            writeln!(f, "Print @{}", location)?;
            write_expr(f, value, depth + 1)
        }
        Stmt::Block { statements, location } => {
            indent(f, depth)?;
            writeln!(f, "Block @{}", location)?;
            write_block(f, statements, depth + 1)
        }
    }
}

fn write_expr(f: &mut impl Write, expr: &Expr, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    match expr {
        Expr::Literal { value, .. } => writeln!(f, "Literal {} {}", value.value_type(), value),
        Expr::Identifier { name, .. } => writeln!(f, "Identifier {}", name),
        Expr::Unary { operator, operand, .. } => {
            writeln!(f, "Unary {}", operator)?;
            write_expr(f, operand, depth + 1)
        }
        Expr::Binary { left, operator, right, .. } => {
            writeln!(f, "Binary {}", operator)?;
            write_expr(f, left, depth + 1)?;
            write_expr(f, right, depth + 1)
        }
        Expr::Call { callee, arguments, .. } => {
            writeln!(f, "CallExpression {}", callee)?;
            for arg in arguments {
                write_expr(f, arg, depth + 1)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_print_program_tree() {
        let source = "\
CONST INT LIMIT = 3;
INT total = LIMIT * 2;
SUBROUTINE VOID main() DO
  IF total > 1 THEN
    show(total);
  END
  RETURN;
END
";
        let program = parse(source).unwrap();
        let expected = "\
Program
  Const INT LIMIT = 3 @1:1
  Var INT total @2:1
    Binary *
      Identifier LIMIT
      Literal INT 2
  Subroutine VOID main() @3:1
    If @4:3
      Binary >
        Identifier total
        Literal INT 1
    Then
      CallStatement show @5:5
        Identifier total
    Return @7:3
";
        assert_eq!(program.to_string(), expected);
    }

    #[test]
    fn test_print_literals() {
        let program = parse("SUBROUTINE STRING s(REAL r) DO PRINT(NOT TRUE); RETURN \"a\\\"b\"; END").unwrap();
        let printed = program.to_string();

        assert!(printed.contains("Subroutine STRING s(REAL r) @1:1"));
        assert!(printed.contains("Unary NOT"));
        assert!(printed.contains("Literal BOOL TRUE"));
        assert!(printed.contains("Literal STRING \"a\\\"b\""));
    }
}
