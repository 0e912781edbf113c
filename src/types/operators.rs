//! Operator signature table
//!
//! Each operator is defined only over specific operand types. A `None` result
//! means the operator cannot be applied to the given operands.

use crate::parser::ast::{BinaryOp, UnaryOp};

use super::Type;

/// Result type of `left <op> right`
pub fn binary_result(operator: BinaryOp, left: Type, right: Type) -> Option<Type> {
    if left == Type::Void || right == Type::Void {
        return None;
    }

    match operator {
        BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide => {
            left.wider(right)
        }

        BinaryOp::Equal | BinaryOp::NotEqual => {
            if (left.is_numeric() && right.is_numeric()) || left == right {
                Some(Type::Bool)
            } else {
                None
            }
        }

        BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
            match (left, right) {
                (l, r) if l.is_numeric() && r.is_numeric() => Some(Type::Bool),
                (Type::String, Type::String) => Some(Type::Bool),
                _ => None,
            }
        }

        BinaryOp::And | BinaryOp::Or => match (left, right) {
            (Type::Bool, Type::Bool) => Some(Type::Bool),
            _ => None,
        },
    }
}

/// Result type of `<op> operand`
pub fn unary_result(operator: UnaryOp, operand: Type) -> Option<Type> {
    match operator {
        UnaryOp::Negate if operand.is_numeric() => Some(operand),
        UnaryOp::Not if operand == Type::Bool => Some(Type::Bool),
        _ => None,
    }
}
