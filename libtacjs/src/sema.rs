// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `sema` module is responsible for semantic analysis of the syntax tree.
//!
//! Semantic analysis is a single pass which infers the type of every expression, resolves every name through the
//! chain of lexical scopes (see [ScopeStack]) and registers function signatures (see [FunctionTable]). Errors are
//! collected rather than returned early, and a failing expression has the type `TypeTag::Invalid` so that each error
//! is reported once.
//!
//! The IR builder assumes a tree that has passed semantic analysis with zero errors.

mod analyzer;
mod errors;
mod function_table;
mod scope;
mod traverse;


pub use analyzer::{Analyzer, AnalyzerOptions};
pub use errors::SemanticError;
pub use function_table::{FunctionOrigin, FunctionSignature, FunctionTable};
pub use scope::{Djb2Hasher, Scope, ScopeStack, Symbol};

use crate::ast::AstRoot;

/// Type checks the tree, resolving otherwise unknown names in `global_scope`, and returns the number of errors.
pub fn check(tree: &AstRoot, global_scope: &mut Scope) -> usize {
    let mut analyzer = Analyzer::new(global_scope);
    analyzer.check(tree)
}

/// Does the tree type check without errors?
pub fn is_valid(tree: &AstRoot, global_scope: &mut Scope) -> bool {
    check(tree, global_scope) == 0
}
