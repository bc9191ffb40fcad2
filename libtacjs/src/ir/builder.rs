// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `builder` module defines [IrBuilder], which holds the state needed to lower a syntax tree into IR.
//!
//! Lowering of expressions and statements lives in the `expr` and `stmt` submodules, as free functions which take
//! the builder as their first argument.

mod expr;
mod stmt;

use std::collections::HashMap;

use log::{debug, warn};

use crate::ICE;
use crate::ast::{AstFunction, AstRoot, AstStatement};
use crate::core::{ENTRY_FUNCTION_NAME, TypeTag};
use crate::sema::{FunctionSignature, FunctionTable, Scope};

use super::bindings::{Binding, BindingSnapshot, BindingTable};
use super::{BuildError, IrFunction, IrOperand, IrProgram, TempId};

type BuildResult<T> = Result<T, BuildError>;

/// A lowered expression: the temporary holding its value (none for a call to a void function) and its type.
#[derive(Debug, Copy, Clone)]
struct Lowered {
    temp: Option<TempId>,
    ty: TypeTag,
}

/// The IR builder lowers a validated syntax tree into IR, one function at a time.
#[derive(Debug)]
pub struct IrBuilder<'a> {
    signatures: &'a FunctionTable,
    global_scope: Option<&'a Scope>,
    function: IrFunction,
    bindings: BindingTable,
    name_counts: HashMap<String, u32>,
}

impl<'a> IrBuilder<'a> {
    /// Creates a builder which takes the signature of every called function from `signatures`.
    pub fn new(signatures: &'a FunctionTable) -> Self {
        Self {
            signatures,
            global_scope: None,
            function: IrFunction::new("", TypeTag::Void, Vec::new()),
            bindings: BindingTable::new(),
            name_counts: HashMap::new(),
        }
    }

    /// Sets the global scope which was given to semantic analysis. The builder uses it to know the types of names
    /// which are not declared in the program.
    pub fn with_global_scope(mut self, global_scope: &'a Scope) -> Self {
        self.global_scope = Some(global_scope);
        self
    }

    /// Lowers a whole program: each top-level function in order, then the entry function built from the remaining
    /// top-level statements.
    pub fn build_program(&mut self, tree: &AstRoot) -> BuildResult<IrProgram> {
        let mut functions = Vec::new();

        for function in tree.functions() {
            functions.push(self.build_function(function)?);
        }

        functions.push(self.build_entry_function(tree.entry_statements())?);

        Ok(IrProgram { functions })
    }

    /// Lowers a function declaration.
    pub fn build_function(&mut self, function: &AstFunction) -> BuildResult<IrFunction> {
        debug!("Lowering function '{}'", function.name);

        let ir_function = IrFunction::new(function.name.as_str(), function.return_type, function.param_types());
        let outer_bindings = self.begin_function(ir_function);

        // Parameters live in the body's outermost frame, in the temporaries `t0..tN`.
        let param_temps: Vec<TempId> = self.function.param_temps().collect();
        for (param, temp) in function.params.iter().zip(param_temps) {
            self.declare_variable(&param.name, param.param_type, temp);
        }

        for stmt in &function.body.0 {
            stmt::lower_statement(self, stmt)?;
        }

        if function.return_type.is_void() && !self.function.ends_with_ret() {
            self.function.emit_ret(None);
        }

        self.finish_function(outer_bindings)
    }

    /// Lowers the top-level statements which are not function declarations into the entry function.
    pub fn build_entry_function<'t>(
        &mut self,
        stmts: impl Iterator<Item = &'t AstStatement>,
    ) -> BuildResult<IrFunction> {
        debug!("Lowering function '{ENTRY_FUNCTION_NAME}'");

        let outer_bindings = self.begin_function(IrFunction::new(ENTRY_FUNCTION_NAME, TypeTag::Void, Vec::new()));

        for stmt in stmts {
            stmt::lower_statement(self, stmt)?;
        }

        self.function.emit_ret(None);

        self.finish_function(outer_bindings)
    }

    /// Makes `function` the function being built, with an empty binding table. Returns the previous bindings.
    fn begin_function(&mut self, function: IrFunction) -> BindingSnapshot {
        self.function = function;
        self.name_counts.clear();

        let outer_bindings = self.bindings.snapshot();
        self.bindings = BindingTable::new();
        outer_bindings
    }

    /// Restores the previous bindings and returns the finished function.
    fn finish_function(&mut self, outer_bindings: BindingSnapshot) -> BuildResult<IrFunction> {
        self.bindings.restore(outer_bindings);

        let function = std::mem::replace(&mut self.function, IrFunction::new("", TypeTag::Void, Vec::new()));
        function.verify_labels()?;

        Ok(function)
    }

    /// Gets the signature of a called function.
    fn signature(&self, callee: &str) -> BuildResult<&'a FunctionSignature> {
        self.signatures.get(callee).ok_or_else(|| BuildError::MissingCalleeSignature {
            function: self.function.name.clone(),
            callee: callee.to_string(),
        })
    }

    /// Allocates the readable name for a new variable: its own name the first time it is declared in the function,
    /// then `name$1`, `name$2` and so on.
    fn allocate_readable_name(&mut self, name: &str) -> String {
        let count = self.name_counts.entry(name.to_string()).or_insert(0);
        let readable_name = if *count == 0 { name.to_string() } else { format!("{name}${count}") };
        *count += 1;
        readable_name
    }

    /// Declares a variable in the current frame, holding its initial value in `temp`.
    fn declare_variable(&mut self, name: &str, ty: TypeTag, temp: TempId) {
        let readable_name = self.allocate_readable_name(name);
        self.function.record_local(&readable_name, temp);

        self.bindings.declare(name, Binding { temp, ty, readable_name, is_global: false });
    }

    /// Makes `temp` the current value of an existing variable.
    fn assign_variable(&mut self, binding: &Binding, name: &str, temp: TempId) {
        if binding.is_global {
            self.function.record_global(&binding.readable_name, temp);
        } else {
            self.function.record_local(&binding.readable_name, temp);
        }

        if !self.bindings.rebind(name, temp) {
            ICE!("Variable '{name}' has no binding to update");
        }
    }

    /// Resolves a name to its binding.
    ///
    /// A name with no binding was resolved by semantic analysis in the global scope, so it refers to a value provided
    /// by the host environment. It is bound lazily in the outermost frame.
    fn resolve_variable(&mut self, name: &str) -> Binding {
        if let Some(binding) = self.bindings.lookup(name) {
            return binding.clone();
        }

        let ty = self.global_scope.and_then(|scope| scope.lookup_local(name)).map(|symbol| symbol.symbol_type);

        warn!("'{name}' has no binding in function '{}'; treating it as a host global", self.function.name);

        let temp = self.function.new_temp();
        self.function.record_global(name, temp);

        let binding =
            Binding { temp, ty: ty.unwrap_or(TypeTag::Invalid), readable_name: name.to_string(), is_global: true };
        self.bindings.declare_outermost(name, binding.clone());
        binding
    }

    /// Returns a temporary that can become a variable's value. A temporary which already holds a variable's value is
    /// copied first.
    fn take_temp(&mut self, temp: TempId) -> TempId {
        if self.function.readable_name(temp).is_some() {
            self.function.emit_mov(IrOperand::Temporary(temp))
        } else {
            temp
        }
    }
}
