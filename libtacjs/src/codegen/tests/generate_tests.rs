// Copyright 2025 Neil Henderson, Blue Tarp Media.

use indoc::indoc;

use crate::ast::{AstBinaryOp, AstExpression as Expr, AstParameter, AstStatement as Stmt};
use crate::core::TypeTag;
use crate::ir::{IrFunction, IrInstruction, IrOperand, IrProgram, LabelId, TempId};

use super::super::{CodegenError, CodegenOptions, generate, generate_to_string};
use super::utils::{lower, program_to_js, to_js, to_js_with_globals};

#[test]
fn straight_line_entry() {
    let js = to_js(vec![
        Stmt::declare("x", TypeTag::Int, Some(Expr::int(1))),
        Stmt::declare("y", TypeTag::Int, Some(Expr::int(2))),
        Stmt::declare("z", TypeTag::Int, Some(Expr::binary(AstBinaryOp::Add, Expr::ident("x"), Expr::ident("y")))),
    ]);

    assert_eq!(
        js,
        indoc! {"
            // Generated from IR

            function _entry() {
                let x = 1;
                let y = 2;
                let z = x + y;
            }

            _entry();\n"}
    );
}

#[test]
fn empty_program() {
    assert_eq!(
        to_js(vec![]),
        indoc! {"
            // Generated from IR

            function _entry() {
            }

            _entry();\n"}
    );
}

#[test]
fn function_call_and_return_value() {
    let js = to_js(vec![
        Stmt::function(
            "add",
            TypeTag::Int,
            vec![AstParameter::new("a", TypeTag::Int), AstParameter::new("b", TypeTag::Int)],
            vec![Stmt::ret(Some(Expr::binary(AstBinaryOp::Add, Expr::ident("a"), Expr::ident("b"))))],
        ),
        Stmt::declare("r", TypeTag::Int, Some(Expr::call("add", vec![Expr::int(1), Expr::int(2)]))),
    ]);

    assert_eq!(
        js,
        indoc! {"
            // Generated from IR

            function add(a, b) {
                let t2 = a + b;
                return t2;
            }

            function _entry() {
                let t0 = 1;
                let t1 = 2;
                let r = add(t0, t1);
            }

            _entry();\n"}
    );
}

#[test]
fn void_call_is_an_expression_statement() {
    let js = to_js(vec![Stmt::expr(Expr::call("print", vec![Expr::string("hello")]))]);

    assert!(js.contains("    let t0 = \"hello\";\n    print(t0);\n"), "{js}");
}

#[test]
fn reassignment_does_not_redeclare() {
    // int x = 1; int y = x; y = x;
    let js = to_js(vec![
        Stmt::declare("x", TypeTag::Int, Some(Expr::int(1))),
        Stmt::declare("y", TypeTag::Int, Some(Expr::ident("x"))),
        Stmt::expr(Expr::assign("y", Expr::ident("x"))),
    ]);

    assert!(js.contains("    let x = 1;\n    let y = x;\n    y = x;\n"), "{js}");
}

#[test]
fn uninitialized_local_is_declared_first() {
    let js = to_js(vec![
        Stmt::declare("later", TypeTag::Int, None),
        Stmt::declare("now", TypeTag::Int, Some(Expr::int(4))),
    ]);

    assert!(js.contains("function _entry() {\n    let later;\n    let now = 4;\n}"), "{js}");
}

#[test]
fn host_globals_are_never_declared() {
    let js = to_js_with_globals(
        vec![
            Stmt::declare("x", TypeTag::Int, Some(Expr::ident("limit"))),
            Stmt::expr(Expr::assign("limit", Expr::int(3))),
        ],
        &[("limit", TypeTag::Int)],
    );

    assert!(js.contains("    let x = limit;\n    limit = 3;\n"), "{js}");
    assert!(!js.contains("let limit"), "{js}");
}

#[test]
fn casts() {
    let mut entry = IrFunction::new("_entry", TypeTag::Void, vec![]);
    let value = entry.emit_mov(IrOperand::IntLit(7));
    entry.emit_cast(IrOperand::Temporary(value), TypeTag::Float);
    entry.emit_cast(IrOperand::Temporary(value), TypeTag::Int);
    entry.emit_cast(IrOperand::Temporary(value), TypeTag::Bool);
    entry.emit_cast(IrOperand::Temporary(value), TypeTag::String);
    entry.emit_ret(None);

    let js = program_to_js(&IrProgram { functions: vec![entry] });

    assert_eq!(
        js,
        indoc! {"
            function _entry() {
                let t0 = 7;
                let t1 = Number(t0);
                let t2 = Math.trunc(Number(t0));
                let t3 = Boolean(t0);
                let t4 = String(t0);
            }

            _entry();\n"}
    );
}

#[test]
fn cast_to_void_is_unsupported() {
    let mut entry = IrFunction::new("_entry", TypeTag::Void, vec![]);
    let value = entry.emit_mov(IrOperand::IntLit(7));
    entry.emit_cast(IrOperand::Temporary(value), TypeTag::Void);

    let result = generate_to_string(&IrProgram { functions: vec![entry] }, &CodegenOptions::default());

    assert!(matches!(
        result,
        Err(CodegenError::UnsupportedCast { ref function, to: TypeTag::Void }) if function == "_entry"
    ));
}

#[test]
fn failed_generation_writes_nothing() {
    let mut helper = IrFunction::new("helper", TypeTag::Void, vec![]);
    helper.emit_ret(None);

    let mut entry = IrFunction::new("_entry", TypeTag::Void, vec![]);
    let value = entry.emit_mov(IrOperand::IntLit(7));
    entry.emit_cast(IrOperand::Temporary(value), TypeTag::Invalid);

    let mut sink = Vec::new();
    let result = generate(&IrProgram { functions: vec![helper, entry] }, &mut sink, &CodegenOptions::default());

    assert!(matches!(result, Err(CodegenError::UnsupportedCast { to: TypeTag::Invalid, .. })));
    assert!(sink.is_empty());
}

#[test]
fn literals() {
    let mut entry = IrFunction::new("_entry", TypeTag::Void, vec![]);
    entry.emit_mov(IrOperand::FloatLit(2.0));
    entry.emit_mov(IrOperand::FloatLit(f64::NAN));
    entry.emit_mov(IrOperand::FloatLit(f64::NEG_INFINITY));
    entry.emit_mov(IrOperand::IntLit(-5));
    entry.emit_mov(IrOperand::BoolLit(false));
    entry.emit_mov(IrOperand::StringLit("say \"hi\"\\\n".to_string()));
    entry.emit_ret(None);

    let js = program_to_js(&IrProgram { functions: vec![entry] });

    assert_eq!(
        js,
        indoc! {r#"
            function _entry() {
                let t0 = 2.0;
                let t1 = NaN;
                let t2 = -Infinity;
                let t3 = -5;
                let t4 = false;
                let t5 = "say \"hi\"\\\n";
            }

            _entry();
"#}
    );
}

#[test]
fn equality_is_strict() {
    let js = to_js(vec![
        Stmt::declare("same", TypeTag::Bool, Some(Expr::binary(AstBinaryOp::EqualTo, Expr::int(1), Expr::int(1)))),
        Stmt::declare("diff", TypeTag::Bool, Some(Expr::binary(AstBinaryOp::NotEqualTo, Expr::int(1), Expr::int(2)))),
    ]);

    assert!(js.contains("let same = t0 === t1;"), "{js}");
    assert!(js.contains("let diff = t3 !== t4;"), "{js}");
}

#[test]
fn missing_entry_function() {
    let helper = {
        let mut function = IrFunction::new("helper", TypeTag::Void, vec![]);
        function.emit_ret(None);
        function
    };
    let program = IrProgram { functions: vec![helper] };

    let result = generate_to_string(&program, &CodegenOptions::default());
    assert!(matches!(result, Err(CodegenError::MissingEntryFunction)));

    let options = CodegenOptions { require_entry: false, emit_header: false, indent_width: 2 };
    let js = generate_to_string(&program, &options).expect("JavaScript should generate");
    assert_eq!(js, "function helper() {\n}\n\n");
}

#[test]
fn indent_width() {
    let program = lower(vec![Stmt::declare("x", TypeTag::Int, Some(Expr::int(1)))], &[]);

    let options = CodegenOptions { indent_width: 2, emit_header: false, ..CodegenOptions::default() };
    let js = generate_to_string(&program, &options).expect("JavaScript should generate");

    assert_eq!(js, "function _entry() {\n  let x = 1;\n}\n\n_entry();\n");
}

#[test]
fn branch_without_labels_is_unresolved() {
    let mut entry = IrFunction::new("_entry", TypeTag::Void, vec![]);
    entry.emit_br(LabelId(5));

    let result = generate_to_string(&IrProgram { functions: vec![entry] }, &CodegenOptions::default());

    assert!(matches!(
        result,
        Err(CodegenError::UnresolvedLabel { ref function, label: LabelId(5) }) if function == "_entry"
    ));
}

#[test]
fn output_is_deterministic() {
    let stmts = || {
        vec![
            Stmt::declare("b", TypeTag::Bool, Some(Expr::bool(true))),
            Stmt::if_else(
                Expr::ident("b"),
                Stmt::block(vec![Stmt::declare("x", TypeTag::Int, Some(Expr::int(1)))]),
                Some(Stmt::block(vec![Stmt::declare("x", TypeTag::Int, Some(Expr::int(2)))])),
            ),
        ]
    };

    let program = lower(stmts(), &[]);

    let mut first = Vec::new();
    generate(&program, &mut first, &CodegenOptions::default()).expect("JavaScript should generate");

    let second = to_js(stmts());
    assert_eq!(String::from_utf8(first).expect("output should be UTF-8"), second);
}

#[test]
fn label_operand_renders_case_number() {
    let mut entry = IrFunction::new("_entry", TypeTag::Void, vec![]);
    let label = entry.new_label();
    entry.emit_label(label);
    entry.emit(IrInstruction::Mov { dst: TempId(0), src: IrOperand::LabelRef(label) });
    entry.emit_ret(None);

    let js = program_to_js(&IrProgram { functions: vec![entry] });
    assert!(js.contains("t0 = 1;"), "{js}");
}
