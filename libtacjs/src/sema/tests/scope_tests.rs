// Copyright 2025 Neil Henderson, Blue Tarp Media.

use std::hash::Hasher;

use crate::ast::AstLiteral;
use crate::core::TypeTag;

use super::super::scope::{Djb2Hasher, Scope, ScopeStack};

#[test]
fn djb2_hash() {
    let mut hasher = Djb2Hasher::default();
    assert_eq!(hasher.finish(), 5381);

    hasher.write(b"a");
    assert_eq!(hasher.finish(), 5381 * 33 + 97);

    let mut hasher = Djb2Hasher::default();
    hasher.write(b"ab");
    assert_eq!(hasher.finish(), (5381 * 33 + 97) * 33 + 98);
}

#[test]
fn insert_lookup_remove() {
    let mut scope = Scope::new();
    assert!(scope.is_empty());
    assert!(scope.lookup_local("count").is_none());

    scope.insert("count", TypeTag::Int, None);
    scope.insert("ratio", TypeTag::Float, Some(AstLiteral::Float(0.5)));
    assert_eq!(scope.len(), 2);

    let ratio = scope.lookup_local("ratio").expect("ratio should exist");
    assert_eq!(ratio.name, "ratio");
    assert_eq!(ratio.symbol_type, TypeTag::Float);
    assert_eq!(ratio.value, Some(AstLiteral::Float(0.5)));

    // Insert overwrites an existing symbol
    scope.insert("count", TypeTag::String, None);
    assert_eq!(scope.len(), 2);
    assert!(scope.lookup_local("count").is_some_and(|symbol| symbol.symbol_type == TypeTag::String));

    assert!(scope.remove("count").is_some());
    assert!(scope.remove("count").is_none());
    assert!(scope.lookup_local("count").is_none());
    assert_eq!(scope.len(), 1);
}

#[test]
fn lookup_local_and_chain() {
    let mut stack = ScopeStack::new();
    stack.push_new();
    stack.insert("x", TypeTag::Int, None);

    stack.push_new();
    stack.insert("y", TypeTag::Bool, None);

    assert!(stack.lookup_local("y").is_some());
    assert!(stack.lookup_local("x").is_none());
    assert!(stack.lookup_chain("x").is_some_and(|symbol| symbol.symbol_type == TypeTag::Int));

    // Shadowing in the inner scope hides the outer symbol
    stack.insert("x", TypeTag::Float, None);
    assert!(stack.lookup_chain("x").is_some_and(|symbol| symbol.symbol_type == TypeTag::Float));

    stack.pop();
    assert!(stack.lookup_chain("y").is_none());
    assert!(stack.lookup_chain("x").is_some_and(|symbol| symbol.symbol_type == TypeTag::Int));
    assert_eq!(stack.depth(), 1);
}

#[test]
fn injected_scope_outlives_pop() {
    let mut global = Scope::new();
    global.insert("limit", TypeTag::Int, Some(AstLiteral::Int(10)));

    {
        let mut stack = ScopeStack::new();
        stack.push_existing(&mut global);

        stack.push_new();
        stack.insert("temp", TypeTag::Int, None);
        assert!(stack.lookup_chain("limit").is_some());
        stack.pop();

        stack.insert("added", TypeTag::Bool, None);
        stack.pop();
        assert_eq!(stack.depth(), 0);
    }

    assert!(global.lookup_local("limit").is_some());
    assert!(global.lookup_local("added").is_some());
    assert!(global.lookup_local("temp").is_none());
}

#[test]
fn function_barrier_skips_to_root() {
    let mut global = Scope::new();
    global.insert("host_value", TypeTag::Int, None);

    let mut stack = ScopeStack::new();
    stack.push_existing(&mut global);

    stack.push_new();
    stack.insert("entry_local", TypeTag::Int, None);
    assert!(!stack.in_function());

    stack.push_function();
    stack.insert("param", TypeTag::Float, None);
    stack.push_new();
    assert!(stack.in_function());

    assert!(stack.lookup_chain("param").is_some());
    assert!(stack.lookup_chain("host_value").is_some());
    assert!(stack.lookup_chain("entry_local").is_none());

    stack.pop();
    stack.pop();
    assert!(!stack.in_function());
    assert!(stack.lookup_chain("entry_local").is_some());
    assert!(stack.lookup_chain("param").is_none());
}
