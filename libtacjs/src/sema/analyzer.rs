// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `analyzer` module defines [Analyzer], which holds the mutable state needed for semantic analysis.

use log::debug;

use crate::ast::AstRoot;
use crate::core::TypeTag;

use super::errors::SemanticError;
use super::function_table::{FunctionSignature, FunctionTable};
use super::scope::{Scope, ScopeStack};
use super::traverse;

/// Options that control semantic analysis.
#[derive(Debug, Copy, Clone, Default)]
pub struct AnalyzerOptions {
    /// Registers every top-level function signature before any statement is checked, so that a function can be
    /// called before its declaration.
    pub prescan_function_signatures: bool,
}

/// The function whose body is being checked.
#[derive(Debug, Clone)]
pub(super) struct FunctionContext {
    pub name: String,
    pub return_type: TypeTag,
}

/// The Analyzer type checks a syntax tree in a single pass and collects the semantic errors it finds.
///
/// The global scope is owned by the caller and injected at the root of the Analyzer's scope stack. Top-level
/// statements are checked in an entry scope above it.
#[derive(Debug)]
pub struct Analyzer<'g> {
    options: AnalyzerOptions,
    pub(super) scopes: ScopeStack<'g>,
    pub(super) functions: FunctionTable,
    function_contexts: Vec<FunctionContext>,
    errors: Vec<SemanticError>,
}

impl<'g> Analyzer<'g> {
    /// Creates an Analyzer with default options which resolves unknown names in the given global scope.
    pub fn new(global_scope: &'g mut Scope) -> Self {
        Self::with_options(global_scope, AnalyzerOptions::default())
    }

    /// Creates an Analyzer with the given options.
    pub fn with_options(global_scope: &'g mut Scope, options: AnalyzerOptions) -> Self {
        let mut scopes = ScopeStack::new();
        scopes.push_existing(global_scope);

        Self { options, scopes, functions: FunctionTable::new(), function_contexts: Vec::new(), errors: Vec::new() }
    }

    /// The Analyzer's options.
    pub fn options(&self) -> AnalyzerOptions {
        self.options
    }

    /// Registers the signature of a function provided by the host environment.
    ///
    /// Host functions survive [Analyzer::reset] and a program cannot redefine them.
    pub fn declare_function(&mut self, signature: FunctionSignature) {
        debug!("Declaring host function '{}'", signature.name);
        self.functions.register(signature);
    }

    /// Type checks the tree and returns the number of semantic errors found.
    ///
    /// Errors accumulate across calls; use [Analyzer::reset] to check an unrelated tree.
    pub fn check(&mut self, tree: &AstRoot) -> usize {
        let errors_before = self.errors.len();

        traverse::typecheck_root(tree, self);

        let new_errors = self.errors.len() - errors_before;
        debug!("Semantic analysis found {new_errors} error(s)");

        self.errors.len()
    }

    /// The semantic errors found so far, in the order they were found.
    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    /// Are there any semantic errors?
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The function signatures registered so far.
    pub fn function_table(&self) -> &FunctionTable {
        &self.functions
    }

    /// Consumes the Analyzer and returns the validated function signatures.
    pub fn into_function_table(self) -> FunctionTable {
        self.functions
    }

    /// Returns the Analyzer to the state it had after construction and any host function declarations.
    pub fn reset(&mut self) {
        self.scopes.pop_to(1);
        self.functions.retain_host_functions();
        self.function_contexts.clear();
        self.errors.clear();
    }

    /// Records a semantic error.
    pub(super) fn report(&mut self, error: SemanticError) {
        debug!("Semantic error: {error}");
        self.errors.push(error);
    }

    /// Enters a function body whose return statements must match `return_type`.
    pub(super) fn begin_function(&mut self, name: &str, return_type: TypeTag) {
        self.function_contexts.push(FunctionContext { name: name.to_string(), return_type });
        self.scopes.push_function();
    }

    /// Leaves the current function body.
    pub(super) fn end_function(&mut self) {
        self.scopes.pop();
        _ = self.function_contexts.pop();
    }

    /// The function whose body is being checked, if any.
    pub(super) fn current_function(&self) -> Option<&FunctionContext> {
        self.function_contexts.last()
    }
}
