// Copyright 2025 Neil Henderson, Blue Tarp Media.

use indoc::indoc;

use crate::ast::{AstBinaryOp, AstExpression as Expr, AstStatement as Stmt};
use crate::core::TypeTag;
use crate::ir::{IrFunction, IrOperand, IrProgram, LabelId};

use super::super::{CodegenError, CodegenOptions, generate_to_string};
use super::utils::{program_to_js, to_js};

#[test]
fn if_else_uses_one_case_per_label() {
    // bool b = true; if (b) { int x = 1; } else { int x = 2; }
    let js = to_js(vec![
        Stmt::declare("b", TypeTag::Bool, Some(Expr::bool(true))),
        Stmt::if_else(
            Expr::ident("b"),
            Stmt::block(vec![Stmt::declare("x", TypeTag::Int, Some(Expr::int(1)))]),
            Some(Stmt::block(vec![Stmt::declare("x", TypeTag::Int, Some(Expr::int(2)))])),
        ),
    ]);

    assert_eq!(
        js,
        indoc! {"
            // Generated from IR

            function _entry() {
                let b, x, x$1;
                let pc = 0;
                while (true) {
                    switch (pc) {
                        case 0:
                            b = true;
                            if (!b) { pc = 1; break; }
                            x = 1;
                            pc = 2;
                            break;
                        case 1:
                            x$1 = 2;
                            pc = 2;
                            break;
                        case 2:
                            return;
                    }
                }
            }

            _entry();\n"}
    );
}

#[test]
fn while_loop_jumps_back_to_condition() {
    // int i = 0; while (i < 3) { i = i + 1; }
    let js = to_js(vec![
        Stmt::declare("i", TypeTag::Int, Some(Expr::int(0))),
        Stmt::while_loop(
            Expr::binary(AstBinaryOp::LessThan, Expr::ident("i"), Expr::int(3)),
            Stmt::block(vec![Stmt::expr(Expr::assign(
                "i",
                Expr::binary(AstBinaryOp::Add, Expr::ident("i"), Expr::int(1)),
            ))]),
        ),
    ]);

    assert_eq!(
        js,
        indoc! {"
            // Generated from IR

            function _entry() {
                let i, t1, t2, t3;
                let pc = 0;
                while (true) {
                    switch (pc) {
                        case 0:
                            i = 0;
                            pc = 1;
                            break;
                        case 1:
                            t1 = 3;
                            t2 = i < t1;
                            if (!t2) { pc = 3; break; }
                            pc = 2;
                            break;
                        case 2:
                            t3 = 1;
                            i = i + t3;
                            pc = 1;
                            break;
                        case 3:
                            return;
                    }
                }
            }

            _entry();\n"}
    );
}

#[test]
fn early_return_skips_unreachable_branch() {
    // void f() { while (true) { return; } } f();
    let js = to_js(vec![
        Stmt::function("f", TypeTag::Void, vec![], vec![Stmt::while_loop(
            Expr::bool(true),
            Stmt::block(vec![Stmt::ret(None)]),
        )]),
        Stmt::expr(Expr::call("f", vec![])),
    ]);

    assert_eq!(
        js,
        indoc! {"
            // Generated from IR

            function f() {
                let t0;
                let pc = 0;
                while (true) {
                    switch (pc) {
                        case 0:
                            pc = 1;
                            break;
                        case 1:
                            t0 = true;
                            if (!t0) { pc = 3; break; }
                            pc = 2;
                            break;
                        case 2:
                            return;
                        case 3:
                            return;
                    }
                }
            }

            function _entry() {
                f();
            }

            _entry();\n"}
    );
}

#[test]
fn final_case_gets_return() {
    let mut f = IrFunction::new("f", TypeTag::Void, vec![]);
    let label = f.new_label();
    f.emit_label(label);
    f.emit_mov(IrOperand::IntLit(1));

    let mut entry = IrFunction::new("_entry", TypeTag::Void, vec![]);
    entry.emit_ret(None);

    let js = program_to_js(&IrProgram { functions: vec![f, entry] });

    assert!(js.contains("case 1:\n                t0 = 1;\n                return;\n        }"), "{js}");
}

#[test]
fn labels_are_numbered_in_order_of_appearance() {
    let mut f = IrFunction::new("_entry", TypeTag::Void, vec![]);
    let first = f.new_label();
    let second = f.new_label();
    f.emit_br(second);
    f.emit_label(second);
    f.emit_br(first);
    f.emit_label(first);
    f.emit_ret(None);

    let js = program_to_js(&IrProgram { functions: vec![f] });

    // L1 appears first, so it is case 1 and L0 is case 2.
    assert!(js.contains("case 0:\n                pc = 1;\n                break;\n            case 1:\n"), "{js}");
    assert!(js.contains("case 1:\n                pc = 2;\n                break;\n            case 2:\n"), "{js}");
    assert!(js.starts_with("function _entry() {\n    let pc = 0;\n"), "{js}");
}

#[test]
fn parameters_are_not_redeclared() {
    let mut f = IrFunction::new("count", TypeTag::Int, vec![TypeTag::Int]);
    f.record_local("n", crate::ir::TempId(0));
    let end = f.new_label();
    let flag = f.emit_mov(IrOperand::BoolLit(false));
    f.emit_brfalse(IrOperand::Temporary(flag), end);
    let next = f.emit_mov(IrOperand::IntLit(2));
    f.record_local("n", next);
    f.emit_label(end);
    f.emit_ret(Some(IrOperand::Temporary(crate::ir::TempId(0))));

    let mut entry = IrFunction::new("_entry", TypeTag::Void, vec![]);
    entry.emit_ret(None);

    let js = program_to_js(&IrProgram { functions: vec![f, entry] });

    assert!(js.contains("function count(n) {\n    let t1;\n    let pc = 0;\n"), "{js}");
    assert!(js.contains("n = 2;"), "{js}");
    assert!(js.contains("return n;"), "{js}");
}

#[test]
fn branch_to_undefined_label() {
    let mut entry = IrFunction::new("_entry", TypeTag::Void, vec![]);
    let defined = entry.new_label();
    entry.emit_label(defined);
    entry.emit_br(LabelId(9));

    let result = generate_to_string(&IrProgram { functions: vec![entry] }, &CodegenOptions::default());

    assert!(matches!(result, Err(CodegenError::UnresolvedLabel { label: LabelId(9), .. })));
}
