// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `options` module defines the compiler driver's options.

use crate::codegen::CodegenOptions;
use crate::sema::{AnalyzerOptions, FunctionSignature};

/// Options that control the compiler driver's behavior.
#[derive(Debug, Clone, Default)]
pub struct DriverOptions {
    /// Run semantic analysis and then stop.
    pub validate: bool,

    /// Run semantic analysis and IR building, then stop and return the printed IR.
    pub print_ir: bool,

    /// Options for semantic analysis.
    pub analyzer: AnalyzerOptions,

    /// Options for JavaScript code generation.
    pub codegen: CodegenOptions,

    /// Signatures of the functions the host environment provides.
    pub host_functions: Vec<FunctionSignature>,
}
