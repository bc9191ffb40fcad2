// Copyright 2025 Neil Henderson, Blue Tarp Media.

use crate::ast::{AstRoot, AstStatement};
use crate::core::TypeTag;
use crate::sema::{Analyzer, FunctionSignature, Scope};

use super::super::{IrBuilder, IrFunction, IrProgram};

/// Type checks the statements, which must be valid, and lowers them into IR.
///
/// `print(string)` is available as a host function, and `globals` are declared in the global scope.
pub fn build_ir(stmts: Vec<AstStatement>, globals: &[(&str, TypeTag)]) -> IrProgram {
    let _ = env_logger::builder().is_test(true).try_init();

    let tree = AstRoot(stmts);

    let mut global_scope = Scope::new();
    for (name, ty) in globals {
        global_scope.insert(name, *ty, None);
    }

    let mut analyzer = Analyzer::new(&mut global_scope);
    analyzer.declare_function(FunctionSignature::host("print", vec![TypeTag::String], TypeTag::Void));

    let error_count = analyzer.check(&tree);
    assert_eq!(error_count, 0, "{:?}", analyzer.errors());

    let functions = analyzer.into_function_table();

    let mut builder = IrBuilder::new(&functions).with_global_scope(&global_scope);
    builder.build_program(&tree).expect("IR should build")
}

/// Lowers the statements and returns the IR of the named function.
pub fn build_function_ir(stmts: Vec<AstStatement>, name: &str) -> IrFunction {
    let program = build_ir(stmts, &[]);
    program.function(name).cloned().expect("Function should exist")
}
