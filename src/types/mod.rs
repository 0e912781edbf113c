//! Type system module
//!
//! This module defines MiniLang's types and the rules for combining them.

pub mod operators;
pub mod type_def;

pub use operators::{binary_result, unary_result};
pub use type_def::Type;
