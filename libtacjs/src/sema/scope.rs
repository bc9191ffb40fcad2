// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `scope` module defines [Scope], a table of the symbols declared in one lexical scope, and [ScopeStack], which
//! chains scopes together for name resolution.

use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hasher};

use log::trace;

use crate::ast::AstLiteral;
use crate::core::TypeTag;

/// The djb2 string hash (`hash * 33 + byte`, seeded with 5381).
#[derive(Debug, Copy, Clone)]
pub struct Djb2Hasher(u64);

impl Default for Djb2Hasher {
    fn default() -> Self {
        Self(5381)
    }
}

impl Hasher for Djb2Hasher {
    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 = self.0.wrapping_mul(33).wrapping_add(u64::from(*byte));
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// A declared variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub symbol_type: TypeTag,
    pub value: Option<AstLiteral>, // A bound constant value, e.g. for a host-provided global.
}

/// The symbols declared in one lexical scope.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    symbols: HashMap<String, Symbol, BuildHasherDefault<Djb2Hasher>>,
}

impl Scope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a symbol, replacing any existing symbol with the same name.
    pub fn insert(&mut self, name: &str, symbol_type: TypeTag, value: Option<AstLiteral>) {
        trace!("scope insert '{name}': {symbol_type}");

        let symbol = Symbol { name: name.to_string(), symbol_type, value };
        self.symbols.insert(name.to_string(), symbol);
    }

    /// Looks up a symbol declared in this scope only.
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Removes a symbol from this scope, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<Symbol> {
        self.symbols.remove(name)
    }

    /// The number of symbols in this scope.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Is the scope empty?
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// A scope in the [ScopeStack].
#[derive(Debug)]
enum ScopeFrame<'a> {
    Owned(Scope),             // Created by `push_new` and dropped by `pop`.
    Injected(&'a mut Scope), // Owned by the caller, e.g. the global scope.
}

impl ScopeFrame<'_> {
    fn scope(&self) -> &Scope {
        match self {
            ScopeFrame::Owned(scope) => scope,
            ScopeFrame::Injected(scope) => scope,
        }
    }

    fn scope_mut(&mut self) -> &mut Scope {
        match self {
            ScopeFrame::Owned(scope) => scope,
            ScopeFrame::Injected(scope) => scope,
        }
    }
}

/// A stack of lexical scopes. The bottom of the stack is the root scope.
///
/// A function barrier marks where a function body's scopes begin. Lookups from inside the function walk the
/// function's own scopes and then go straight to the root scope, skipping the scopes in between.
#[derive(Debug, Default)]
pub struct ScopeStack<'a> {
    frames: Vec<ScopeFrame<'a>>,
    barriers: Vec<usize>,
}

impl<'a> ScopeStack<'a> {
    /// Creates an empty scope stack.
    pub fn new() -> Self {
        Self { frames: Vec::new(), barriers: Vec::new() }
    }

    /// Pushes a new, owned scope whose parent is the current top of the stack.
    pub fn push_new(&mut self) {
        self.frames.push(ScopeFrame::Owned(Scope::new()));
    }

    /// Pushes a caller-owned scope. It is never destroyed by [ScopeStack::pop].
    pub fn push_existing(&mut self, scope: &'a mut Scope) {
        self.frames.push(ScopeFrame::Injected(scope));
    }

    /// Pops the top scope, destroying it if it is owned.
    ///
    /// Popping the first scope of a function body also removes its function barrier.
    pub fn pop(&mut self) {
        if self.frames.pop().is_some() && self.barriers.last().is_some_and(|&start| start >= self.frames.len()) {
            _ = self.barriers.pop();
        }
    }

    /// Pops scopes until the stack has the given depth.
    pub fn pop_to(&mut self, depth: usize) {
        while self.frames.len() > depth {
            self.pop();
        }
    }

    /// Pushes a new, owned scope which begins a function body.
    pub fn push_function(&mut self) {
        self.barriers.push(self.frames.len());
        self.push_new();
    }

    /// The number of scopes on the stack.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Is the top of the stack inside a function body?
    pub fn in_function(&self) -> bool {
        !self.barriers.is_empty()
    }

    /// Inserts a symbol into the top scope, replacing any existing symbol with the same name in that scope.
    pub fn insert(&mut self, name: &str, symbol_type: TypeTag, value: Option<AstLiteral>) {
        let Some(frame) = self.frames.last_mut() else {
            crate::ICE!("Cannot insert '{name}' into an empty scope stack");
        };

        frame.scope_mut().insert(name, symbol_type, value);
    }

    /// Looks up a symbol in the top scope only.
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.frames.last().and_then(|frame| frame.scope().lookup_local(name))
    }

    /// Looks up a symbol by walking the visible scopes from the top of the stack to the root.
    pub fn lookup_chain(&self, name: &str) -> Option<&Symbol> {
        self.visible_frames().find_map(|frame| frame.scope().lookup_local(name))
    }

    fn visible_frames(&self) -> impl Iterator<Item = &ScopeFrame<'a>> {
        let function_start = self.barriers.last().copied().unwrap_or(0);

        let function_frames = self.frames[function_start..].iter().rev();
        let root_frame = self.frames.first().filter(|_| function_start > 0);

        function_frames.chain(root_frame)
    }
}
