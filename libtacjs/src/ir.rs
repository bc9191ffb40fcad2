// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `ir` module is responsible for lowering a validated syntax tree into a three-address code intermediate
//! representation (IR).
//!
//! Every function is lowered independently into an [IrFunction] with its own temporaries and labels. The program's
//! top-level statements (other than function declarations) are lowered into a synthesized entry function named
//! `_entry`, which is always the last function of the [IrProgram].

mod bindings;
mod builder;
mod printer;
mod tac;


use log::debug;
use thiserror::Error;

use crate::ast::AstRoot;
use crate::sema::FunctionTable;

pub use bindings::{Binding, BindingSnapshot, BindingTable};
pub use builder::IrBuilder;
pub use tac::{IrBinaryOp, IrFunction, IrInstruction, IrOpcode, IrOperand, IrProgram, LabelId, TempId};

/// An error found while building IR.
///
/// The builder trusts semantic analysis, so these indicate an inconsistency between the tree and the function table
/// it was given, or a defect in lowering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Branch to undefined label '{label}' in function '{function}'")]
    UnresolvedLabel { function: String, label: LabelId },

    #[error("Label '{label}' is defined more than once in function '{function}'")]
    DuplicateLabel { function: String, label: LabelId },

    #[error("No signature for function '{callee}' called from '{function}'")]
    MissingCalleeSignature { function: String, callee: String },
}

/// Lowers a tree which has passed semantic analysis into IR.
///
/// `functions` is the validated function table from the [Analyzer](crate::sema::Analyzer); the return type of every
/// call is taken from it.
pub fn build_program(tree: &AstRoot, functions: &FunctionTable) -> Result<IrProgram, BuildError> {
    debug!("Building IR");

    let mut builder = IrBuilder::new(functions);
    let program = builder.build_program(tree)?;

    debug!("Built IR for {} function(s)", program.functions.len());
    Ok(program)
}
