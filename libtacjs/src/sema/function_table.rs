// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `function_table` module defines [FunctionTable], the flat namespace of function signatures.

use indexmap::IndexMap;

use crate::core::TypeTag;

/// Where a function signature came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FunctionOrigin {
    Host,    // Provided by the host environment, e.g. `print`.
    Prescan, // Registered ahead of time; its declaration has not been checked yet.
    Defined, // Its declaration has been checked.
}

/// A function's name, ordered parameter types and return type.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub param_types: Vec<TypeTag>,
    pub return_type: TypeTag,
    pub origin: FunctionOrigin,
}

impl FunctionSignature {
    /// Creates a signature for a function provided by the host environment.
    pub fn host<S: Into<String>>(name: S, param_types: Vec<TypeTag>, return_type: TypeTag) -> Self {
        Self { name: name.into(), param_types, return_type, origin: FunctionOrigin::Host }
    }
}

/// The function signatures of a program, in registration order. Function names cannot be overloaded.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    signatures: IndexMap<String, FunctionSignature>,
}

impl FunctionTable {
    /// Creates an empty function table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a signature, replacing any existing signature with the same name.
    pub fn register(&mut self, signature: FunctionSignature) {
        self.signatures.insert(signature.name.clone(), signature);
    }

    /// Gets the signature of the named function.
    pub fn get(&self, name: &str) -> Option<&FunctionSignature> {
        self.signatures.get(name)
    }

    /// Is the named function registered?
    pub fn contains(&self, name: &str) -> bool {
        self.signatures.contains_key(name)
    }

    /// Removes every signature that did not come from the host environment.
    pub fn retain_host_functions(&mut self) {
        self.signatures.retain(|_, signature| signature.origin == FunctionOrigin::Host);
    }

    /// Iterates over the signatures in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionSignature> {
        self.signatures.values()
    }

    /// The number of registered signatures.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
