// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `bindings` module defines [BindingTable], the IR builder's map from variable names to the temporaries that
//! currently hold their values.
//!
//! The table is a chain of frames, one per lexical depth. Frames are shared between the table and its snapshots and
//! are copied only when a shared frame is written, so taking a snapshot is a pointer copy.

use std::collections::HashMap;
use std::rc::Rc;

use crate::ICE;
use crate::core::TypeTag;

use super::TempId;

/// What a variable name is bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub temp: TempId,
    pub ty: TypeTag,
    pub readable_name: String, // The name every temporary of this variable is rendered with.
    pub is_global: bool,       // Provided by the host environment rather than declared in the function.
}

#[derive(Debug, Clone, Default)]
struct Frame {
    bindings: HashMap<String, Binding>,
    parent: Option<Rc<Frame>>,
    depth: usize,
}

impl Frame {
    fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name) || self.parent.as_ref().is_some_and(|parent| parent.contains(name))
    }
}

/// A saved state of a [BindingTable].
#[derive(Debug, Clone)]
pub struct BindingSnapshot(Rc<Frame>);

/// Maps variable names to their current temporaries, with lexical shadowing.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    top: Rc<Frame>,
}

impl BindingTable {
    /// Creates a table with one empty frame at depth 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lexical depth of the innermost frame.
    pub fn depth(&self) -> usize {
        self.top.depth
    }

    /// Enters a new lexical depth.
    pub fn push_frame(&mut self) {
        let parent = Rc::clone(&self.top);
        let depth = parent.depth + 1;
        self.top = Rc::new(Frame { bindings: HashMap::new(), parent: Some(parent), depth });
    }

    /// Leaves the innermost lexical depth, discarding the bindings introduced there.
    pub fn pop_frame(&mut self) {
        let Some(parent) = self.top.parent.clone() else {
            ICE!("Cannot pop the outermost binding frame");
        };

        self.top = parent;
    }

    /// Binds a name in the innermost frame, shadowing any binding in an outer frame.
    pub fn declare(&mut self, name: &str, binding: Binding) {
        Rc::make_mut(&mut self.top).bindings.insert(name.to_string(), binding);
    }

    /// Binds a name in the outermost frame.
    pub fn declare_outermost(&mut self, name: &str, binding: Binding) {
        fn declare_in(frame: &mut Rc<Frame>, name: &str, binding: Binding) {
            let frame = Rc::make_mut(frame);
            match frame.parent.as_mut() {
                Some(parent) => declare_in(parent, name, binding),
                None => {
                    frame.bindings.insert(name.to_string(), binding);
                }
            }
        }

        declare_in(&mut self.top, name, binding);
    }

    /// Looks up the innermost binding of a name.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        let mut frame = Some(&self.top);

        while let Some(current) = frame {
            if let Some(binding) = current.bindings.get(name) {
                return Some(binding);
            }
            frame = current.parent.as_ref();
        }

        None
    }

    /// Updates the innermost binding of a name to a new temporary, in the frame that declared it.
    ///
    /// Returns `false` if the name is not bound.
    pub fn rebind(&mut self, name: &str, temp: TempId) -> bool {
        fn rebind_in(frame: &mut Rc<Frame>, name: &str, temp: TempId) -> bool {
            if !frame.contains(name) {
                return false;
            }

            let frame = Rc::make_mut(frame);

            if let Some(binding) = frame.bindings.get_mut(name) {
                binding.temp = temp;
                return true;
            }

            frame.parent.as_mut().is_some_and(|parent| rebind_in(parent, name, temp))
        }

        rebind_in(&mut self.top, name, temp)
    }

    /// Takes a snapshot of the current bindings.
    pub fn snapshot(&self) -> BindingSnapshot {
        BindingSnapshot(Rc::clone(&self.top))
    }

    /// Restores the bindings to a snapshot.
    pub fn restore(&mut self, snapshot: BindingSnapshot) {
        self.top = snapshot.0;
    }
}
