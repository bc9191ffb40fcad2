// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `compiler_driver` module defines the functions and types which orchestrate the different compilation stages.

pub mod options;

mod diagnostics;
mod driver;


use thiserror::Error;

use crate::codegen::CodegenError;
use crate::ir::BuildError;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use driver::Driver;
pub use options::DriverOptions;

/// An error returned by the compiler driver.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Semantic analysis found {0} error(s)")]
    SemanticErrors(usize),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

/// The output of a successful compiler driver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverOutput {
    /// The tree passed semantic analysis and the driver stopped.
    Validated,

    /// The printed IR of the program.
    Ir(String),

    /// The generated JavaScript program.
    JavaScript(String),
}
