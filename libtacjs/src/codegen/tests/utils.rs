// Copyright 2025 Neil Henderson, Blue Tarp Media.

use crate::ast::{AstRoot, AstStatement};
use crate::core::TypeTag;
use crate::ir::{IrBuilder, IrProgram};
use crate::sema::{Analyzer, FunctionSignature, Scope};

use super::super::{CodegenOptions, generate_to_string};

/// Type checks the statements, which must be valid, and lowers them into IR.
///
/// `print(string)` is available as a host function, and `globals` are declared in the global scope.
pub fn lower(stmts: Vec<AstStatement>, globals: &[(&str, TypeTag)]) -> IrProgram {
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

/// Lowers the statements and generates JavaScript with the default options.
pub fn to_js(stmts: Vec<AstStatement>) -> String {
    to_js_with_globals(stmts, &[])
}

/// Lowers the statements, with host globals, and generates JavaScript with the default options.
pub fn to_js_with_globals(stmts: Vec<AstStatement>, globals: &[(&str, TypeTag)]) -> String {
    let program = lower(stmts, globals);
    generate_to_string(&program, &CodegenOptions::default()).expect("JavaScript should generate")
}

/// Generates JavaScript for a hand-built program without the header comment.
pub fn program_to_js(program: &IrProgram) -> String {
    let options = CodegenOptions { emit_header: false, ..CodegenOptions::default() };
    generate_to_string(program, &options).expect("JavaScript should generate")
}
