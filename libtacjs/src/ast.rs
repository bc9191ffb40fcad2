// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `ast` module defines the syntax tree consumed by semantic analysis and IR building.
//!
//! The tree is produced by an external parser. Nodes own their children, so a whole program is a plain value
//! that can be cloned, compared and (with the `serde` feature) serialized.

mod ast_expression;
mod ast_literals;
mod ast_operators;
mod ast_statement;

pub use self::ast_expression::*;
pub use self::ast_literals::*;
pub use self::ast_operators::*;
pub use self::ast_statement::*;

/// The root of the syntax tree: the program's top-level statements, in source order.
///
/// Function declarations are top-level statements. Every other top-level statement belongs to the program's
/// synthesized entry function.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AstRoot(pub Vec<AstStatement>);

impl AstRoot {
    /// Iterates over the top-level function declarations.
    pub fn functions(&self) -> impl Iterator<Item = &AstFunction> {
        self.0.iter().filter_map(|stmt| match stmt {
            AstStatement::Function(function) => Some(function),
            _ => None,
        })
    }

    /// Iterates over the top-level statements which are not function declarations.
    pub fn entry_statements(&self) -> impl Iterator<Item = &AstStatement> {
        self.0.iter().filter(|stmt| !matches!(stmt, AstStatement::Function(_)))
    }
}
